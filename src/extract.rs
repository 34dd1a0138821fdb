use serde_json::Value;

use crate::error::GenerateError;

/// What to return when the provider answered but the candidate path is
/// missing. `Debug` passes the raw body through for inspection; `Strict`
/// substitutes a fixed sentinel so callers never see provider internals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractMode {
    Debug,
    Strict,
}

pub const NO_RESPONSE_SENTINEL: &str = "No response generated.";

/// Pull the reply text out of the provider's JSON body by navigating
/// `candidates[0].content.parts[0].text`. A response without that path is
/// not an error, it falls back according to `mode`.
pub fn extract_reply(raw: &str, mode: ExtractMode) -> Result<String, GenerateError> {
    if raw.trim().is_empty() {
        return Err(GenerateError::EmptyResponse);
    }

    let root: Value = serde_json::from_str(raw).map_err(|e| GenerateError::Parse {
        detail: e.to_string(),
    })?;

    if let Some(text) = root["candidates"][0]["content"]["parts"][0]["text"].as_str() {
        return Ok(text.to_string());
    }

    tracing::debug!("Provider response missing candidate text: {}", raw);
    match mode {
        ExtractMode::Debug => Ok(raw.to_string()),
        ExtractMode::Strict => Ok(NO_RESPONSE_SENTINEL.to_string()),
    }
}
