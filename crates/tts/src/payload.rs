use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, TtsError};
use crate::types::SynthesisOptions;

/// Session-correlation token the hosted endpoints expect on every call
const SESSION_HASH: &str = "kg71r7fv3e8";

/// Parallel field-type tags used by the endpoint for server-side
/// validation; must stay aligned with the positional `data` array
const DATA_TYPES: [&str; 12] = [
    "textbox", "dropdown", "slider", "slider", "slider", "slider", "dropdown", "audio", "textbox", "radio", "textbox",
    "slider",
];

/// Request body of the hosted `/run/predict` endpoint
///
/// The `data` array is positional and endpoint-contract-exact: any
/// reordering breaks compatibility with deployed instances and must be
/// versioned, never silently altered.
#[derive(Debug, Serialize)]
pub struct PredictPayload {
    pub data: Vec<Value>,
    pub event_data: Option<()>,
    pub fn_index: u32,
    #[serde(rename = "dataType")]
    pub data_type: Vec<&'static str>,
    pub session_hash: &'static str,
}

/// Assemble the fixed-shape predict payload
///
/// Pure function of its inputs; rejects blank text before anything
/// reaches the network, since the remote endpoint errors unhelpfully
/// on empty input.
pub fn build_payload(text: &str, options: &SynthesisOptions, display_name: &str) -> Result<PredictPayload> {
    if text.trim().is_empty() {
        return Err(TtsError::InvalidInput("input text must not be empty".into()));
    }

    let data = vec![
        Value::from(text),
        Value::from(display_name),
        Value::from(options.sdp_ratio),
        Value::from(options.noise_scale),
        Value::from(options.noise_width_scale),
        Value::from(options.length_scale),
        Value::from(options.language.as_str()),
        Value::Null,
        Value::from(options.style_prompt.as_str()),
        Value::from("Text prompt"),
        Value::from(""),
        Value::from(options.blend_weight),
    ];

    Ok(PredictPayload {
        data,
        event_data: None,
        fn_index: 0,
        data_type: DATA_TYPES.to_vec(),
        session_hash: SESSION_HASH,
    })
}
