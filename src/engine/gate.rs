use chat_types::RetrievalResult;

/// Retrieval scores below this are treated as noise.
pub const CONFIDENCE_THRESHOLD: f32 = 0.4;

/// Whether retrieved context is trustworthy enough to show the model.
pub fn gate(score: f32, threshold: f32) -> bool {
    score >= threshold
}

/// Context text that survives the gate: verbatim, or empty.
pub fn gated_context(result: &RetrievalResult, threshold: f32) -> &str {
    if gate(result.score, threshold) {
        &result.context
    } else {
        ""
    }
}
