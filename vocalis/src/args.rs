use std::path::PathBuf;

use clap::Parser;

/// Vocalis speech-synthesis gateway
#[derive(Debug, Parser)]
#[command(name = "vocalis", about = "Bert-VITS speech-synthesis gateway for chat-bot hosts")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "vocalis.toml", env = "VOCALIS_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "VOCALIS_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
