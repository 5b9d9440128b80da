use serde::{Deserialize, Serialize};

/// Validated reply from the generative service
///
/// Deserialization enforces the shape contract: `recommendations` must be
/// present and hold a sequence. Extra fields in the reply are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(default)]
    pub message: String,
    pub recommendations: Vec<RecommendationEntry>,
}

/// One recommended activity with the model's rationale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationEntry {
    /// Catalog id echoed from the prompt's bracketed markers
    pub id: String,
    #[serde(default)]
    pub reason: String,
}
