use indexmap::IndexMap;
use vocalis_config::SynthesisConfig;

use crate::{
    directory::{SpeakerDirectory, parse_speaker_token},
    error::TtsError,
    provider::{SpeechProvider, gradio::GradioSpace},
    types::{AudioResult, SpeakerInfo, SpeechRequest},
};

/// TTS server that resolves speakers and dispatches to their provider
pub struct Server {
    directory: SpeakerDirectory,
    providers: IndexMap<String, Box<dyn SpeechProvider>>,
    defaults: SynthesisConfig,
}

impl Server {
    /// Synthesize speech for one request
    ///
    /// Picks the speaker token (legacy numeric id first, then the
    /// `speaker` field, then the configured default), resolves it through
    /// the directory, merges options, builds the predict payload, and
    /// forwards it to the provider that owns the speaker. Failures are
    /// logged here at the adapter boundary and re-raised so one failed
    /// synthesis never affects subsequent requests.
    pub async fn say(&self, request: SpeechRequest) -> crate::error::Result<AudioResult> {
        let Some(text) = request.text.as_deref().filter(|text| !text.trim().is_empty()) else {
            return Err(TtsError::InvalidInput(
                "text is required; GET /v1/audio/speakers lists the available voices".into(),
            ));
        };

        let token = match request.speaker_id {
            Some(key_id) => self.directory.name_for_key_id(key_id)?.to_owned(),
            None => request.speaker.clone().unwrap_or_else(|| self.defaults.speaker.clone()),
        };

        let (name, token_language) = parse_speaker_token(&token);
        let entry = self.directory.resolve(name)?;

        let options = crate::types::SynthesisOptions::merge(&self.defaults, &request, token_language)?;
        let payload = crate::payload::build_payload(text, &options, &entry.display_name)?;

        let provider = self
            .providers
            .get(&entry.provider)
            .ok_or_else(|| TtsError::ProviderNotFound(entry.provider.clone()))?;

        match provider.synthesize(&payload, &entry.version).await {
            Ok(result) => Ok(result),
            Err(error) => {
                tracing::error!("Speech synthesis for '{name}' via '{}' failed: {error}", entry.provider);
                Err(error)
            }
        }
    }

    /// Directory listing for the help/usage surface
    pub fn speakers(&self) -> Vec<SpeakerInfo> {
        self.directory
            .iter()
            .map(|(name, entry)| SpeakerInfo {
                name: name.to_owned(),
                key_id: self.directory.key_id(name).unwrap_or_default(),
                provider: entry.provider.clone(),
                version: entry.version.clone(),
            })
            .collect()
    }
}

/// Builder for constructing the TTS server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a vocalis_config::Config,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a vocalis_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let directory = SpeakerDirectory::from_config(&self.config.tts)?;

        let mut providers: IndexMap<String, Box<dyn SpeechProvider>> = IndexMap::new();

        for (name, provider_config) in &self.config.tts.providers {
            tracing::debug!("Initializing TTS provider: {name}");
            providers.insert(name.clone(), Box::new(GradioSpace::new(name.clone(), provider_config)));
        }

        tracing::debug!(
            "TTS server initialized with {} provider(s) and {} speaker(s)",
            providers.len(),
            directory.len()
        );

        Ok(Server {
            directory,
            providers,
            defaults: self.config.synthesis.clone(),
        })
    }
}
