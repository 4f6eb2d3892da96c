use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use vocalis_config::TtsProviderConfig;

use crate::{
    error::TtsError,
    http_client::http_client,
    payload::PredictPayload,
    types::AudioResult,
};

use super::SpeechProvider;

/// A hosted Bert-VITS Gradio instance
///
/// The base URL is a template; `{version}` is replaced with the resolved
/// speaker's backing identifier, so one provider entry can cover a whole
/// family of per-speaker deployments.
pub struct GradioSpace {
    client: Client,
    name: String,
    base_url: String,
    params: IndexMap<String, String>,
    api_key: Option<SecretString>,
}

impl GradioSpace {
    pub fn new(name: String, config: &TtsProviderConfig) -> Self {
        Self {
            client: http_client(),
            name,
            base_url: config.base_url.clone(),
            params: config.params.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Endpoint base for a speaker, with the version placeholder applied
    fn endpoint_base(&self, version: &str) -> String {
        self.base_url.replace("{version}", version)
    }

    /// Render the configured query parameters for one call
    ///
    /// `{version}` takes the backing identifier, `{date}` the current
    /// Unix timestamp in milliseconds.
    fn render_params(&self, version: &str) -> Vec<(String, String)> {
        let now = jiff::Timestamp::now().as_millisecond().to_string();

        self.params
            .iter()
            .map(|(key, value)| {
                let rendered = value.replace("{version}", version).replace("{date}", &now);
                (key.clone(), rendered)
            })
            .collect()
    }
}

/// Response envelope of the predict endpoint
///
/// `data[0]` is the audio widget slot, `data[1]` carries the generated
/// file reference.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

impl PredictResponse {
    fn file_name(&self) -> Option<&str> {
        self.data.get(1)?.get("name")?.as_str()
    }
}

#[async_trait]
impl SpeechProvider for GradioSpace {
    async fn synthesize(&self, payload: &PredictPayload, version: &str) -> crate::error::Result<AudioResult> {
        let base = self.endpoint_base(version);
        let url = format!("{base}/run/predict");

        tracing::debug!("Gradio predict request: provider={}, version={version}", self.name);

        let mut request = self.client.post(&url).query(&self.render_params(version)).json(payload);

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Gradio predict request failed: {e}");
            TtsError::ConnectionError(format!("Failed to send request to '{}': {e}", self.name))
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Gradio API error ({status}): {error_text}");

            return Err(match status.as_u16() {
                401 => TtsError::AuthenticationFailed(error_text),
                400 => TtsError::InvalidRequest(error_text),
                _ => TtsError::ProviderApiError {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let body: PredictResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to decode Gradio response body: {e}");
            TtsError::MalformedResponse(format!("response body is not valid JSON: {e}"))
        })?;

        let file_name = body.file_name().ok_or_else(|| {
            tracing::error!("Gradio response from '{}' is missing data[1].name", self.name);
            TtsError::MalformedResponse("response is missing the generated file name (data[1].name)".into())
        })?;

        tracing::debug!("Gradio synthesis complete, file {file_name}");

        Ok(AudioResult {
            url: format!("{base}/file={file_name}"),
            file_name: file_name.to_owned(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
