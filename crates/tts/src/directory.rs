use std::collections::HashMap;

use indexmap::IndexMap;
use vocalis_config::{Language, TtsConfig, TtsProviderConfig};

use crate::error::{Result, TtsError};

/// First numeric id handed out for legacy speaker addressing
pub const BASE_SPEAKER_KEY_ID: u32 = 114_513;

/// Speaker table shipped with the crate, used when a provider configures
/// neither an inline table nor a readable speaker file
const BUNDLED_SPEAKERS: &str = include_str!("../assets/speakers.json");

/// One resolved speaker
#[derive(Debug, Clone)]
pub struct SpeakerEntry {
    /// Name of the provider that owns this speaker
    pub provider: String,
    /// Backing identifier substituted into the provider's URL template
    pub version: String,
    /// Value the remote dropdown expects, usually the speaker name itself
    pub display_name: String,
}

/// Immutable speaker lookup tables, built once at startup
///
/// Holds the forward name map, the inverted version map, and the derived
/// numeric key-id table. Nothing here changes after construction, so the
/// directory can be shared freely across request tasks.
#[derive(Debug)]
pub struct SpeakerDirectory {
    entries: IndexMap<String, SpeakerEntry>,
    name_by_version: HashMap<String, String>,
    name_by_key_id: HashMap<u32, String>,
    key_id_by_name: HashMap<String, u32>,
}

impl SpeakerDirectory {
    /// Build the directory from the configured provider table
    ///
    /// Providers contribute speakers in declaration order; the first
    /// provider wins when two tables list the same name.
    pub fn from_config(config: &TtsConfig) -> Result<Self> {
        let mut entries: IndexMap<String, SpeakerEntry> = IndexMap::new();

        for (provider_name, provider) in &config.providers {
            for (name, entry) in provider_speakers(provider_name, provider)? {
                if entries.contains_key(&name) {
                    tracing::warn!(
                        "Speaker '{name}' of provider '{provider_name}' shadowed by an earlier provider, skipping"
                    );
                    continue;
                }
                entries.insert(name, entry);
            }
        }

        if entries.is_empty() {
            return Err(TtsError::ConfigError("no speakers configured for any provider".into()));
        }

        let mut name_by_version = HashMap::with_capacity(entries.len());
        for (name, entry) in &entries {
            if let Some(previous) = name_by_version.insert(entry.version.clone(), name.clone()) {
                tracing::warn!(
                    "Backing id '{}' is shared by '{previous}' and '{name}', reverse lookup keeps '{previous}'",
                    entry.version
                );
                name_by_version.insert(entry.version.clone(), previous);
            }
        }

        // Legacy ids: descending lexicographic name order, so the base id
        // addresses the lexicographically last speaker
        let mut sorted: Vec<&String> = entries.keys().collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let mut name_by_key_id = HashMap::with_capacity(sorted.len());
        let mut key_id_by_name = HashMap::with_capacity(sorted.len());
        for (index, name) in sorted.into_iter().enumerate() {
            let key_id = BASE_SPEAKER_KEY_ID + u32::try_from(index).expect("speaker count fits u32");
            name_by_key_id.insert(key_id, name.clone());
            key_id_by_name.insert(name.clone(), key_id);
        }

        tracing::debug!("Speaker directory initialized with {} speaker(s)", entries.len());

        Ok(Self {
            entries,
            name_by_version,
            name_by_key_id,
            key_id_by_name,
        })
    }

    /// Exact-match lookup of a speaker name
    pub fn resolve(&self, name: &str) -> Result<&SpeakerEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| TtsError::UnknownSpeaker(name.to_owned()))
    }

    /// Reverse lookup from a backing identifier to the speaker name
    pub fn name_for_version(&self, version: &str) -> Option<&str> {
        self.name_by_version.get(version).map(String::as_str)
    }

    /// Reverse lookup from a legacy numeric id to the speaker name
    pub fn name_for_key_id(&self, key_id: u32) -> Result<&str> {
        self.name_by_key_id
            .get(&key_id)
            .map(String::as_str)
            .ok_or_else(|| TtsError::UnknownSpeaker(key_id.to_string()))
    }

    /// Derived numeric id for a directory name
    pub fn key_id(&self, name: &str) -> Option<u32> {
        self.key_id_by_name.get(name).copied()
    }

    /// All speakers in directory order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpeakerEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a composite speaker token into its name and language suffix
///
/// Only a recognized language code after the final underscore is treated
/// as a suffix; anything else stays part of the name.
pub fn parse_speaker_token(token: &str) -> (&str, Option<Language>) {
    match token.rsplit_once('_') {
        Some((name, suffix)) => match Language::from_suffix(suffix) {
            Some(language) => (name, Some(language)),
            None => (token, None),
        },
        None => (token, None),
    }
}

fn provider_speakers(provider_name: &str, provider: &TtsProviderConfig) -> Result<Vec<(String, SpeakerEntry)>> {
    if !provider.speakers.is_empty() {
        return Ok(provider
            .speakers
            .iter()
            .map(|(name, seed)| {
                let entry = SpeakerEntry {
                    provider: provider_name.to_owned(),
                    version: seed.version.clone(),
                    display_name: seed.display_name.clone().unwrap_or_else(|| name.clone()),
                };
                (name.clone(), entry)
            })
            .collect());
    }

    let raw = match &provider.speaker_file {
        Some(path) => {
            if !path.exists() {
                tracing::info!(
                    "Seeding speaker table for provider '{provider_name}' at {}",
                    path.display()
                );
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        TtsError::ConfigError(format!(
                            "cannot create speaker table directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                std::fs::write(path, BUNDLED_SPEAKERS).map_err(|e| {
                    TtsError::ConfigError(format!("cannot seed speaker table {}: {e}", path.display()))
                })?;
            }

            std::fs::read_to_string(path)
                .map_err(|e| TtsError::ConfigError(format!("cannot read speaker table {}: {e}", path.display())))?
        }
        None => BUNDLED_SPEAKERS.to_owned(),
    };

    let table: IndexMap<String, String> = serde_json::from_str(&raw).map_err(|e| {
        TtsError::ConfigError(format!("speaker table of provider '{provider_name}' is not valid JSON: {e}"))
    })?;

    if table.is_empty() {
        return Err(TtsError::ConfigError(format!(
            "speaker table of provider '{provider_name}' is empty"
        )));
    }

    Ok(table
        .into_iter()
        .map(|(name, version)| {
            let entry = SpeakerEntry {
                provider: provider_name.to_owned(),
                version,
                display_name: name.clone(),
            };
            (name, entry)
        })
        .collect())
}
