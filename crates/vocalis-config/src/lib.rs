#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod server;
pub mod synthesis;
pub mod tts;

use serde::Deserialize;

pub use server::*;
pub use synthesis::*;
pub use tts::*;

/// Top-level Vocalis configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// TTS provider configuration
    #[serde(default)]
    pub tts: TtsConfig,
    /// Synthesis slider defaults
    #[serde(default)]
    pub synthesis: SynthesisConfig,
}
