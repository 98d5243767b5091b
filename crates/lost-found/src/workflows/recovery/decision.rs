use serde::Serialize;
use tracing::info;

use super::domain::{ClaimAttempt, FoundItemId, FoundItemRecord};
use super::scoring::{resolve, ScoreResult, SemanticScorer};

/// Outcome of one claim evaluation.
///
/// `fallback_score` carries the local baseline on rejection so a reviewer can compare the two
/// scorers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimDecision {
    pub found_id: FoundItemId,
    pub accepted: bool,
    pub threshold: f64,
    pub result: ScoreResult,
    pub fallback_score: Option<f64>,
}

impl ClaimDecision {
    pub fn message(&self) -> &'static str {
        if self.accepted {
            "Claim accepted. Contact the lost-and-found office to collect your item."
        } else {
            "Claim rejected. The details provided do not sufficiently match this item."
        }
    }
}

/// Applies an acceptance threshold to the semantic score (local score on fallback).
#[derive(Clone)]
pub struct ClaimDecisionEngine {
    semantic: SemanticScorer,
}

impl ClaimDecisionEngine {
    pub fn new(semantic: SemanticScorer) -> Self {
        Self { semantic }
    }

    pub fn semantic(&self) -> &SemanticScorer {
        &self.semantic
    }

    /// Scores the claim and flips `found.claimed` on acceptance.
    ///
    /// Whether an already-claimed item may be evaluated at all is the caller's call; this
    /// never resets `claimed`.
    pub async fn decide(
        &self,
        found: &mut FoundItemRecord,
        claim: &ClaimAttempt,
        threshold: f64,
    ) -> ClaimDecision {
        let baseline = self.semantic.local().evaluate(found, claim);
        let result = resolve(self.semantic.score(found, claim).await, &baseline);
        let accepted = result.score >= threshold;

        if accepted {
            found.mark_claimed();
        }

        info!(
            found_id = %found.id.0,
            score = result.score,
            fallback_score = baseline.score,
            source = result.source.label(),
            threshold,
            accepted,
            "claim evaluated"
        );

        ClaimDecision {
            found_id: found.id.clone(),
            accepted,
            threshold,
            fallback_score: (!accepted).then_some(baseline.score),
            result,
        }
    }
}
