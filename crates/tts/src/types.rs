use serde::{Deserialize, Serialize};
use vocalis_config::{
    BLEND_WEIGHT_RANGE, LENGTH_SCALE_RANGE, Language, NOISE_SCALE_RANGE, NOISE_WIDTH_SCALE_RANGE, SDP_RATIO_RANGE,
    SynthesisConfig,
};

use crate::error::{Result, TtsError};

/// Speech synthesis request as parsed by the host framework
///
/// Every field except `text` falls back to the configured default.
/// `speaker_id` is the legacy numeric addressing surface and takes
/// precedence over `speaker` when both are present.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeechRequest {
    /// Text to synthesize
    pub text: Option<String>,
    /// Speaker token, may carry a language suffix (`name_LANG`)
    pub speaker: Option<String>,
    /// Legacy numeric speaker id
    pub speaker_id: Option<u32>,
    /// SDP/DP mix ratio override
    pub sdp_ratio: Option<f64>,
    /// Emotion strength override
    pub noise_scale: Option<f64>,
    /// Phoneme length override
    pub noise_width_scale: Option<f64>,
    /// Speaking rate override
    pub length_scale: Option<f64>,
    /// Synthesis language override
    pub language: Option<Language>,
    /// Style prompt override
    pub style_prompt: Option<String>,
    /// Main/auxiliary text blend override
    pub blend_weight: Option<f64>,
}

/// Fully resolved synthesis options, every field populated
///
/// Built by merging caller overrides onto the configured defaults;
/// the caller wins field by field.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOptions {
    pub sdp_ratio: f64,
    pub noise_scale: f64,
    pub noise_width_scale: f64,
    pub length_scale: f64,
    pub language: Language,
    pub style_prompt: String,
    pub blend_weight: f64,
}

impl SynthesisOptions {
    /// Merge caller overrides onto configured defaults
    ///
    /// A language suffix parsed from the speaker token outranks an
    /// explicit `language` field, which outranks the configured default.
    /// Out-of-range slider overrides are rejected before any network
    /// activity.
    pub fn merge(
        defaults: &SynthesisConfig,
        request: &SpeechRequest,
        token_language: Option<Language>,
    ) -> Result<Self> {
        let options = Self {
            sdp_ratio: request.sdp_ratio.unwrap_or(defaults.sdp_ratio),
            noise_scale: request.noise_scale.unwrap_or(defaults.noise_scale),
            noise_width_scale: request.noise_width_scale.unwrap_or(defaults.noise_width_scale),
            length_scale: request.length_scale.unwrap_or(defaults.length_scale),
            language: token_language.or(request.language).unwrap_or(defaults.language),
            style_prompt: request.style_prompt.clone().unwrap_or_else(|| defaults.style_prompt.clone()),
            blend_weight: request.blend_weight.unwrap_or(defaults.blend_weight),
        };

        options.check_bounds()?;

        Ok(options)
    }

    fn check_bounds(&self) -> Result<()> {
        let sliders = [
            ("sdp_ratio", self.sdp_ratio, &SDP_RATIO_RANGE),
            ("noise_scale", self.noise_scale, &NOISE_SCALE_RANGE),
            ("noise_width_scale", self.noise_width_scale, &NOISE_WIDTH_SCALE_RANGE),
            ("length_scale", self.length_scale, &LENGTH_SCALE_RANGE),
            ("blend_weight", self.blend_weight, &BLEND_WEIGHT_RANGE),
        ];

        for (field, value, range) in sliders {
            if !range.contains(&value) {
                return Err(TtsError::InvalidInput(format!(
                    "{field} must be within [{}, {}], got {value}",
                    range.start(),
                    range.end()
                )));
            }
        }

        Ok(())
    }
}

/// Reference to a synthesized audio file, delivered to the host
/// framework as a playable attachment
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioResult {
    /// Downloadable audio URL on the provider instance
    pub url: String,
    /// Server-generated file name, verbatim from the provider response
    pub file_name: String,
}

/// One row of the speaker listing surface
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeakerInfo {
    /// Speaker name
    pub name: String,
    /// Stable numeric id for legacy callers
    pub key_id: u32,
    /// Owning provider
    pub provider: String,
    /// Backing identifier on the provider instance
    pub version: String,
}
