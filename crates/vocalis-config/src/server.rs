use std::net::SocketAddr;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the gateway listens on, defaults to 127.0.0.1:8420
    pub listen_address: Option<SocketAddr>,
}

impl ServerConfig {
    /// Listen address with the default applied
    pub fn listen_address_or_default(&self) -> SocketAddr {
        self.listen_address
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8420)))
    }
}
