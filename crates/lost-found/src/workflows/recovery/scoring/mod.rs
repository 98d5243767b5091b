mod completion;
mod local;
mod semantic;
mod weights;

pub use completion::{CompletionClient, CompletionRequest, OpenAiCompletionClient};
pub use local::{LocalScoreBreakdown, LocalSimilarityScorer};
pub(crate) use semantic::resolve;
pub use semantic::{extract_json_object, ScorerFailure, SemanticScorer};
pub use weights::{ScoringWeights, WeightError};

use super::domain::{ClaimAttempt, FoundItemRecord};
use serde::{Deserialize, Serialize};

/// Which scorer produced a [`ScoreResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreSource {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "ai")]
    Ai,
    #[serde(rename = "fallback-local")]
    FallbackLocal,
}

impl ScoreSource {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreSource::Local => "local",
            ScoreSource::Ai => "ai",
            ScoreSource::FallbackLocal => "fallback-local",
        }
    }
}

/// A single evaluation: score in [0, 1], where it came from, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub source: ScoreSource,
    pub rationale: String,
}

/// Deterministic, side-effect-free scorer usable for single claims and batch ranking.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, found: &FoundItemRecord, claim: &ClaimAttempt) -> f64;
}
