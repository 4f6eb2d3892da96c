use std::path::PathBuf;

use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;

/// Top-level TTS configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Hosted model instances keyed by name, in declaration order
    ///
    /// When the same speaker appears in more than one provider's table,
    /// the first provider in this map wins.
    #[serde(default)]
    pub providers: IndexMap<String, TtsProviderConfig>,
}

/// Configuration for a single hosted Bert-VITS instance
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsProviderConfig {
    /// Base URL template; a `{version}` placeholder is substituted with
    /// the resolved speaker's backing identifier
    pub base_url: String,
    /// Extra query parameters appended to the predict call; values may
    /// use `{version}` and `{date}` placeholders
    #[serde(default)]
    pub params: IndexMap<String, String>,
    /// Bearer token for private instances
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Inline speaker table (name to backing identifier)
    #[serde(default)]
    pub speakers: IndexMap<String, SpeakerSeed>,
    /// Path to a speaker table file (`{ "name": "version" }` JSON)
    ///
    /// Seeded from the bundled default table when the file does not
    /// exist yet. Ignored when an inline table is given.
    #[serde(default)]
    pub speaker_file: Option<PathBuf>,
}

/// One inline speaker entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeakerSeed {
    /// Backing identifier the instance expects in its URL
    pub version: String,
    /// Dropdown value the instance expects, defaults to the speaker name
    #[serde(default)]
    pub display_name: Option<String>,
}
