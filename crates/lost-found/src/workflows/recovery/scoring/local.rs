use serde::{Deserialize, Serialize};

use super::super::domain::{ClaimAttempt, FoundItemRecord};
use super::super::normalizer::ComparisonCorpora;
use super::weights::{ScoringWeights, WeightError};
use super::{ScoreResult, ScoreSource, SimilarityScorer};

/// Per-field similarities behind a local score, kept for audit trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalScoreBreakdown {
    pub secret: f64,
    pub color: f64,
    pub size: f64,
    pub shape: f64,
    pub context: f64,
    pub total: f64,
}

impl LocalScoreBreakdown {
    pub fn summary(&self) -> String {
        format!(
            "local similarity {:.2} (secret {:.2}, color {:.2}, size {:.2}, shape {:.2}, context {:.2})",
            self.total, self.secret, self.color, self.size, self.shape, self.context
        )
    }
}

/// Weighted bigram-overlap comparison of a found item against claim-side text.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSimilarityScorer {
    weights: ScoringWeights,
}

impl LocalSimilarityScorer {
    pub fn new(weights: ScoringWeights) -> Result<Self, WeightError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn breakdown(&self, found: &FoundItemRecord, claim: &ClaimAttempt) -> LocalScoreBreakdown {
        let found = ComparisonCorpora::for_found(found);
        let claim = ComparisonCorpora::for_claim(claim);
        let empty_pair = self.weights.empty_pair_similarity;

        let secret = similarity(&found.identity, &claim.identity, empty_pair);
        let color = similarity(&found.color, &claim.color, empty_pair);
        let size = similarity(&found.size, &claim.size, empty_pair);
        let shape = similarity(&found.shape, &claim.shape, empty_pair);
        let context = similarity(&found.context, &claim.context, empty_pair);

        let weighted = self.weights.secret * secret
            + self.weights.color * color
            + self.weights.size * size
            + self.weights.shape * shape
            + self.weights.context * context;

        LocalScoreBreakdown {
            secret,
            color,
            size,
            shape,
            context,
            total: weighted.clamp(0.0, 1.0),
        }
    }

    /// Scores and wraps the result with `source = local` and the field breakdown.
    pub fn evaluate(&self, found: &FoundItemRecord, claim: &ClaimAttempt) -> ScoreResult {
        let breakdown = self.breakdown(found, claim);
        ScoreResult {
            score: breakdown.total,
            source: ScoreSource::Local,
            rationale: breakdown.summary(),
        }
    }
}

impl Default for LocalSimilarityScorer {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }
}

impl SimilarityScorer for LocalSimilarityScorer {
    fn score(&self, found: &FoundItemRecord, claim: &ClaimAttempt) -> f64 {
        self.breakdown(found, claim).total
    }
}

/// Sørensen–Dice similarity over character bigrams, whitespace-insensitive.
fn similarity(left: &str, right: &str, empty_pair: f64) -> f64 {
    if left.is_empty() && right.is_empty() {
        return empty_pair;
    }
    let value = strsim::sorensen_dice(left, right);
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
