//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use indexmap::IndexMap;
use vocalis_config::{Config, ServerConfig, SpeakerSeed, TtsProviderConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                },
                ..Config::default()
            },
        }
    }

    /// Add a provider with the standard two-speaker test table
    pub fn with_space(self, name: &str, base_url_template: &str) -> Self {
        self.with_space_speakers(name, base_url_template, &[("向晚", "Ava"), ("嘉然", "Diana")])
    }

    /// Add a provider with an explicit inline speaker table
    pub fn with_space_speakers(mut self, name: &str, base_url_template: &str, speakers: &[(&str, &str)]) -> Self {
        let speakers: IndexMap<String, SpeakerSeed> = speakers
            .iter()
            .map(|(speaker, version)| {
                let seed = SpeakerSeed {
                    version: (*version).to_owned(),
                    display_name: None,
                };
                ((*speaker).to_owned(), seed)
            })
            .collect();

        self.config.tts.providers.insert(name.to_owned(), TtsProviderConfig {
            base_url: base_url_template.to_owned(),
            speakers,
            ..TtsProviderConfig::default()
        });
        self
    }

    /// Add templated query parameters to an already-added provider
    pub fn with_space_params(mut self, name: &str, params: &[(&str, &str)]) -> Self {
        let provider = self
            .config
            .tts
            .providers
            .get_mut(name)
            .expect("provider must be added before params");
        provider.params = params
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        self
    }

    /// Override the configured default speaker token
    pub fn with_default_speaker(mut self, speaker: &str) -> Self {
        self.config.synthesis.speaker = speaker.to_owned();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
