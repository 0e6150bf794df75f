//! Normalization of raw model output into JSON.
//!
//! Models asked for "JSON only" still sometimes wrap their answer in a
//! markdown code fence. This module strips that artifact and parses the
//! remainder, classifying empty and unparseable output distinctly so the HTTP
//! layer can map them to different status codes.

use crate::error::GatewayError;

/// Parse raw Gateway text as JSON, stripping code-fence markers first.
///
/// Empty text is `EmptyResponse`; text that survives fence-stripping but
/// still isn't JSON is `MalformedOutput` (the raw text rides along for
/// server-side logging, never for the caller).
pub fn normalize_json(raw: &str) -> Result<serde_json::Value, GatewayError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::EmptyResponse);
    }

    let cleaned = strip_code_fences(trimmed);

    // A fence with nothing inside is still an empty response.
    if cleaned.is_empty() {
        return Err(GatewayError::EmptyResponse);
    }

    serde_json::from_str(cleaned).map_err(|e| GatewayError::MalformedOutput {
        message: e.to_string(),
        raw: raw.to_string(),
    })
}

/// Strip a leading ``` fence (with optional language tag) and its closing
/// fence. Text without a leading fence is returned untouched.
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the info string ("json") up to and including the first newline.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };

    body.trim_end()
        .trim_end_matches("```")
        .trim()
}
