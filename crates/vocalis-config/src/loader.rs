use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if no provider is configured, a provider entry is
    /// malformed, or a synthesis default is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_providers()?;
        self.synthesis.validate()?;
        Ok(())
    }

    fn validate_providers(&self) -> anyhow::Result<()> {
        if self.tts.providers.is_empty() {
            anyhow::bail!("at least one TTS provider must be configured");
        }

        for (name, provider) in &self.tts.providers {
            if provider.base_url.trim().is_empty() {
                anyhow::bail!("TTS provider '{name}' has an empty base_url");
            }

            if !provider.speakers.is_empty() && provider.speaker_file.is_some() {
                tracing::warn!("TTS provider '{name}' has both inline speakers and a speaker_file; the file is ignored");
            }

            for (speaker, seed) in &provider.speakers {
                if seed.version.trim().is_empty() {
                    anyhow::bail!("speaker '{speaker}' of TTS provider '{name}' has an empty version");
                }
            }
        }

        Ok(())
    }
}
