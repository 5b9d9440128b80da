use crate::models::Recommendation;

/// A generative reply that could not be read as structured recommendations
///
/// Carries the unmodified reply text so callers can fall back to showing
/// it verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unparseable generative reply: {detail}")]
pub struct InterpretError {
    /// The reply exactly as received
    pub raw: String,
    pub detail: String,
}

/// Reads a generative reply into a [`Recommendation`]
///
/// Tolerates a reply wrapped in a markdown code fence; anything beyond
/// that must be strict JSON with a `recommendations` array.
pub fn interpret(raw: &str) -> Result<Recommendation, InterpretError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned).map_err(|e| InterpretError {
        raw: raw.to_string(),
        detail: e.to_string(),
    })
}

/// Removes a leading and trailing code fence, if present
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let without_close = without_open.strip_suffix("```").unwrap_or(without_open);
    without_close.trim()
}
