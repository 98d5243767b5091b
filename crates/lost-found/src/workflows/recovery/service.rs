use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use tracing::info;

use super::decision::{ClaimDecision, ClaimDecisionEngine};
use super::domain::{
    ClaimAttempt, FoundItemId, FoundItemRecord, FoundItemSubmission, LostItemReport,
    LostReportSubmission, ReportId,
};
use super::ranking::MatchRanker;
use super::repository::{FoundItemRepository, LostReportRepository, RepositoryError};
use super::scoring::{LocalSimilarityScorer, SemanticScorer, WeightError};
use super::views::MatchView;
use crate::config::{MatchingConfig, SemanticConfig};

/// Service composing the repositories, match ranker, and claim decision engine.
pub struct RecoveryService<F, L> {
    found_items: Arc<F>,
    reports: Arc<L>,
    ranker: MatchRanker,
    engine: ClaimDecisionEngine,
    claim_threshold: f64,
    top_n: usize,
}

static FOUND_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static REPORT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_found_id() -> FoundItemId {
    let id = FOUND_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    FoundItemId(format!("found-{id:06}"))
}

fn next_report_id() -> ReportId {
    let id = REPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReportId(format!("lost-{id:06}"))
}

/// A freshly filed report and the found items that look like it.
#[derive(Debug, Clone)]
pub struct LostReportOutcome {
    pub report: LostItemReport,
    pub matches: Vec<MatchView>,
}

impl<F, L> RecoveryService<F, L>
where
    F: FoundItemRepository + 'static,
    L: LostReportRepository + 'static,
{
    pub fn new(
        found_items: Arc<F>,
        reports: Arc<L>,
        matching: MatchingConfig,
        semantic: &SemanticConfig,
    ) -> Result<Self, WeightError> {
        let local = LocalSimilarityScorer::new(matching.weights.clone())?;
        let scorer = SemanticScorer::from_config(semantic, local);
        Ok(Self::with_scorer(found_items, reports, &matching, scorer))
    }

    /// Uses the scorer's own weight profile for both claims and ranking.
    pub fn with_scorer(
        found_items: Arc<F>,
        reports: Arc<L>,
        matching: &MatchingConfig,
        scorer: SemanticScorer,
    ) -> Self {
        let ranker = MatchRanker::new(scorer.local().clone());
        Self {
            found_items,
            reports,
            ranker,
            engine: ClaimDecisionEngine::new(scorer),
            claim_threshold: matching.claim_threshold,
            top_n: matching.top_n,
        }
    }

    pub fn claim_threshold(&self) -> f64 {
        self.claim_threshold
    }

    pub fn semantic_enabled(&self) -> bool {
        self.engine.semantic().is_configured()
    }

    /// Register a recovered item on behalf of the office.
    pub fn register_found(
        &self,
        submission: FoundItemSubmission,
    ) -> Result<FoundItemRecord, RecoveryServiceError> {
        if submission.name.trim().is_empty() {
            return Err(IntakeViolation::MissingFoundItemName.into());
        }

        let record = FoundItemRecord::from_submission(next_found_id(), submission, Utc::now());
        let stored = self.found_items.insert(record)?;
        info!(found_id = %stored.id.0, "found item registered");
        Ok(stored)
    }

    pub fn list_found(
        &self,
        unclaimed_only: bool,
    ) -> Result<Vec<FoundItemRecord>, RecoveryServiceError> {
        Ok(self.found_items.list(unclaimed_only)?)
    }

    pub fn get_found(&self, id: &FoundItemId) -> Result<FoundItemRecord, RecoveryServiceError> {
        let record = self
            .found_items
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// File a lost report and rank the unclaimed found items against it.
    pub fn report_lost(
        &self,
        submission: LostReportSubmission,
    ) -> Result<LostReportOutcome, RecoveryServiceError> {
        if submission.item_name.trim().is_empty() {
            return Err(IntakeViolation::MissingLostItemName.into());
        }
        if submission.contact.trim().is_empty() {
            return Err(IntakeViolation::MissingContact.into());
        }

        // Read candidates first so a storage failure leaves no orphaned report behind.
        let candidates = self.found_items.list(true)?;

        let report = LostItemReport::from_submission(next_report_id(), submission, Utc::now());
        let report = self.reports.insert(report)?;

        let matches = self
            .ranker
            .rank(&report, &candidates, self.top_n)
            .iter()
            .map(MatchView::from)
            .collect::<Vec<_>>();

        info!(
            report_id = %report.id.0,
            matches = matches.len(),
            "lost report filed"
        );

        Ok(LostReportOutcome { report, matches })
    }

    pub fn list_reports(&self) -> Result<Vec<LostItemReport>, RecoveryServiceError> {
        Ok(self.reports.list()?)
    }

    /// Evaluate a claim and, on acceptance, mark the item claimed via a conditional update.
    pub async fn claim(
        &self,
        id: &FoundItemId,
        attempt: ClaimAttempt,
    ) -> Result<ClaimDecision, RecoveryServiceError> {
        let mut record = self.get_found(id)?;
        if record.claimed {
            return Err(RecoveryServiceError::AlreadyClaimed(id.clone()));
        }

        let decision = self
            .engine
            .decide(&mut record, &attempt, self.claim_threshold)
            .await;

        if decision.accepted && !self.found_items.mark_claimed_if_unclaimed(id)? {
            return Err(RecoveryServiceError::AlreadyClaimed(id.clone()));
        }

        Ok(decision)
    }
}

/// Boundary validation failures for registrations and reports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("found item requires a name")]
    MissingFoundItemName,
    #[error("lost report requires an item name")]
    MissingLostItemName,
    #[error("lost report requires contact details")]
    MissingContact,
}

/// Error raised by the recovery service.
#[derive(Debug, thiserror::Error)]
pub enum RecoveryServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("found item {} has already been claimed", .0.0)]
    AlreadyClaimed(FoundItemId),
}

impl RecoveryServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecoveryServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RecoveryServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            RecoveryServiceError::Repository(RepositoryError::Conflict)
            | RecoveryServiceError::AlreadyClaimed(_) => StatusCode::CONFLICT,
            RecoveryServiceError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
