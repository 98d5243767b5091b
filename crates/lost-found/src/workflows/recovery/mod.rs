//! Lost-and-found recovery workflow.
//!
//! Found items are registered by an administrator, lost items are reported by students, and the
//! two sides are reconciled by scoring a claimant's description against a found item's recorded
//! attributes. The scoring core (normalizer, local scorer, semantic scorer, claim decision
//! engine, match ranker) is pure apart from the single outbound completion call; storage and
//! HTTP transport sit behind the repository traits and the router.

pub mod decision;
pub mod domain;
pub mod normalizer;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use decision::{ClaimDecision, ClaimDecisionEngine};
pub use domain::{
    ClaimAttempt, FoundItemId, FoundItemRecord, FoundItemSubmission, LostItemReport,
    LostReportSubmission, ReportId, ReportStatus,
};
pub use ranking::{MatchCandidate, MatchRanker};
pub use repository::{FoundItemRepository, LostReportRepository, RepositoryError};
pub use router::recovery_router;
pub use scoring::{
    CompletionClient, CompletionRequest, LocalScoreBreakdown, LocalSimilarityScorer,
    OpenAiCompletionClient, ScoreResult, ScoreSource, ScorerFailure, ScoringWeights,
    SemanticScorer, SimilarityScorer, WeightError,
};
pub use service::{IntakeViolation, LostReportOutcome, RecoveryService, RecoveryServiceError};
pub use views::{ClaimResponse, FoundItemView, LostReportResponse, MatchView};
