pub mod gradio;

use async_trait::async_trait;

use crate::{error::Result, payload::PredictPayload, types::AudioResult};

/// Trait for hosted synthesis backends
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Perform a single synthesis call for an already-resolved speaker
    ///
    /// `version` is the speaker's backing identifier, substituted into
    /// the provider's URL template.
    async fn synthesize(&self, payload: &PredictPayload, version: &str) -> Result<AudioResult>;

    /// Get the provider name
    fn name(&self) -> &str;
}
