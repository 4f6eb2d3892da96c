#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod directory;
mod error;
mod http_client;
mod payload;
mod provider;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::{get, post}};

pub use directory::{BASE_SPEAKER_KEY_ID, SpeakerDirectory, SpeakerEntry, parse_speaker_token};
pub use error::{Result, TtsError};
pub use payload::{PredictPayload, build_payload};
pub use provider::SpeechProvider;
pub use server::{Server, TtsServerBuilder};
pub use types::{AudioResult, SpeakerInfo, SpeechRequest, SynthesisOptions};
use request::ExtractPayload;

/// Build the TTS server from configuration
pub fn build_server(config: &vocalis_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        TtsServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize TTS server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for TTS
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/v1/audio/speech", post(synthesize))
        .route("/v1/audio/speakers", get(list_speakers))
}

/// Handle speech synthesis requests
async fn synthesize(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<SpeechRequest>,
) -> Result<Json<AudioResult>> {
    tracing::debug!("TTS speech handler called");

    let result = server.say(request).await?;

    tracing::debug!("Speech synthesis complete");

    Ok(Json(result))
}

/// Handle the speaker listing, the help surface for missing text and
/// legacy numeric-id callers
async fn list_speakers(State(server): State<Arc<Server>>) -> Json<Vec<SpeakerInfo>> {
    Json(server.speakers())
}
