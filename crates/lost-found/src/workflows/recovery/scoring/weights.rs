use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weight profile for the local scorer.
///
/// `empty_pair_similarity` is what a field contributes when both sides left it blank. The
/// default of 1.0 treats two omissions as agreeing, so a claimant is not penalised for leaving
/// out an attribute the registrar also left out. Set it to 0.0 for a strict profile where only
/// positive evidence earns weight.
///
/// Field similarity ignores whitespace, so word boundaries do not count: "a b" and "ab" compare
/// as identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub secret: f64,
    pub color: f64,
    pub size: f64,
    pub shape: f64,
    pub context: f64,
    pub empty_pair_similarity: f64,
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.secret + self.color + self.size + self.shape + self.context
    }

    pub fn validate(&self) -> Result<(), WeightError> {
        let named = [
            ("secret", self.secret),
            ("color", self.color),
            ("size", self.size),
            ("shape", self.shape),
            ("context", self.context),
        ];
        for (field, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightError::InvalidWeight { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.empty_pair_similarity) {
            return Err(WeightError::InvalidEmptyPairSimilarity(
                self.empty_pair_similarity,
            ));
        }

        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightError::UnbalancedTotal(total));
        }

        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            secret: 0.55,
            color: 0.15,
            size: 0.10,
            shape: 0.10,
            context: 0.10,
            empty_pair_similarity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("weight `{field}` must be a finite, non-negative number (got {value})")]
    InvalidWeight { field: &'static str, value: f64 },
    #[error("empty pair similarity must lie in [0, 1] (got {0})")]
    InvalidEmptyPairSimilarity(f64),
    #[error("field weights must sum to 1.0 (got {0:.4})")]
    UnbalancedTotal(f64),
}
