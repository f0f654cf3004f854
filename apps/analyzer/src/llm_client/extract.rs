//! Pulls one JSON object out of a free-form model response.
//!
//! Models asked for "JSON only" still wrap the payload in ```json fences or
//! surround it with prose. Both call sites (detection and scoring) go through
//! `extract_json` so the recovery rules live in one place.

use serde::de::DeserializeOwned;

use crate::errors::AnalyzerError;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Locates the JSON candidate inside `text` without parsing it.
///
/// A ```json fence wins when present: its interior up to the next fence (or the
/// end of the text if the fence is never closed), trimmed. Otherwise the slice
/// from the first `{` to the last `}` inclusive.
pub fn locate_json(text: &str) -> Result<&str, AnalyzerError> {
    if let Some(start) = text.find(JSON_FENCE) {
        let body = &text[start + JSON_FENCE.len()..];
        let end = body.find(FENCE).unwrap_or(body.len());
        return Ok(body[..end].trim());
    }

    let open = text
        .find('{')
        .ok_or_else(|| AnalyzerError::malformed("no JSON object found in response", text))?;
    let close = text
        .rfind('}')
        .filter(|&close| close > open)
        .ok_or_else(|| AnalyzerError::malformed("unbalanced braces in response", text))?;

    Ok(&text[open..=close])
}

/// Locates and deserializes the JSON object in `text`.
/// Every failure is a `MalformedResponse` carrying the full raw text.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, AnalyzerError> {
    let candidate = locate_json(text)?;
    serde_json::from_str(candidate)
        .map_err(|e| AnalyzerError::malformed(format!("invalid JSON: {e}"), text))
}
