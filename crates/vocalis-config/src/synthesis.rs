use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Valid range for the SDP/DP mix ratio slider
pub const SDP_RATIO_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Valid range for the emotion-strength noise slider
pub const NOISE_SCALE_RANGE: RangeInclusive<f64> = 0.1..=2.0;
/// Valid range for the phoneme-length noise slider
pub const NOISE_WIDTH_SCALE_RANGE: RangeInclusive<f64> = 0.1..=2.0;
/// Valid range for the speaking-rate slider
pub const LENGTH_SCALE_RANGE: RangeInclusive<f64> = 0.1..=2.0;
/// Valid range for the main/auxiliary text blend slider
pub const BLEND_WEIGHT_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Synthesis languages accepted by Bert-VITS endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Language {
    #[default]
    ZH,
    JP,
    EN,
    AUTO,
    MIX,
}

impl Language {
    /// Parse a composite speaker token suffix (e.g. the `JP` in `向晚_JP`)
    ///
    /// Only recognized suffixes are stripped from tokens, so speaker names
    /// containing underscores stay intact.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "ZH" => Some(Self::ZH),
            "JP" => Some(Self::JP),
            "EN" => Some(Self::EN),
            "AUTO" => Some(Self::AUTO),
            "MIX" => Some(Self::MIX),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZH => "ZH",
            Self::JP => "JP",
            Self::EN => "EN",
            Self::AUTO => "AUTO",
            Self::MIX => "MIX",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default values for the synthesis sliders
///
/// Each field mirrors a slider exposed to the administrator; callers may
/// override any of them per request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SynthesisConfig {
    /// Default speaker token, may carry a language suffix (`name_LANG`)
    pub speaker: String,
    /// SDP/DP mix ratio
    pub sdp_ratio: f64,
    /// Emotion strength
    pub noise_scale: f64,
    /// Phoneme length variance
    pub noise_width_scale: f64,
    /// Speaking rate, larger is slower
    pub length_scale: f64,
    /// Default synthesis language when the speaker token has no suffix
    pub language: Language,
    /// Style prompt, English with a leading capital (e.g. "Happy")
    pub style_prompt: String,
    /// Blend ratio between main text and the style prompt
    pub blend_weight: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            speaker: "向晚_ZH".to_owned(),
            sdp_ratio: 0.5,
            noise_scale: 0.6,
            noise_width_scale: 0.9,
            length_scale: 1.0,
            language: Language::ZH,
            style_prompt: "Happy".to_owned(),
            blend_weight: 0.7,
        }
    }
}

impl SynthesisConfig {
    /// Check every slider default against its documented range
    pub fn validate(&self) -> anyhow::Result<()> {
        check_range("synthesis.sdp_ratio", self.sdp_ratio, &SDP_RATIO_RANGE)?;
        check_range("synthesis.noise_scale", self.noise_scale, &NOISE_SCALE_RANGE)?;
        check_range(
            "synthesis.noise_width_scale",
            self.noise_width_scale,
            &NOISE_WIDTH_SCALE_RANGE,
        )?;
        check_range("synthesis.length_scale", self.length_scale, &LENGTH_SCALE_RANGE)?;
        check_range("synthesis.blend_weight", self.blend_weight, &BLEND_WEIGHT_RANGE)?;

        if self.speaker.trim().is_empty() {
            anyhow::bail!("synthesis.speaker must not be empty");
        }

        Ok(())
    }
}

fn check_range(field: &str, value: f64, range: &RangeInclusive<f64>) -> anyhow::Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        anyhow::bail!(
            "{field} must be within [{}, {}], got {value}",
            range.start(),
            range.end()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = SynthesisConfig::default();
        assert_eq!(config.speaker, "向晚_ZH");
        assert!((config.sdp_ratio - 0.5).abs() < f64::EPSILON);
        assert!((config.noise_scale - 0.6).abs() < f64::EPSILON);
        assert!((config.noise_width_scale - 0.9).abs() < f64::EPSILON);
        assert!((config.length_scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.language, Language::ZH);
        assert_eq!(config.style_prompt, "Happy");
        assert!((config.blend_weight - 0.7).abs() < f64::EPSILON);
        config.validate().unwrap();
    }

    #[test]
    fn partial_table_fills_remaining_defaults() {
        let config: SynthesisConfig = toml::from_str("sdp_ratio = 0.2\nstyle_prompt = \"Sad\"").unwrap();
        assert!((config.sdp_ratio - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.style_prompt, "Sad");
        assert_eq!(config.speaker, "向晚_ZH");
    }

    #[test]
    fn out_of_range_slider_rejected() {
        let config: SynthesisConfig = toml::from_str("sdp_ratio = 1.5").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sdp_ratio"));
    }

    #[test]
    fn language_suffix_parsing() {
        assert_eq!(Language::from_suffix("ZH"), Some(Language::ZH));
        assert_eq!(Language::from_suffix("JP"), Some(Language::JP));
        assert_eq!(Language::from_suffix("zh"), None);
        assert_eq!(Language::from_suffix("KR"), None);
    }
}
