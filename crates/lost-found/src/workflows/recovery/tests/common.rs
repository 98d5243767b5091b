use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::config::MatchingConfig;
use crate::workflows::recovery::domain::{
    ClaimAttempt, FoundItemId, FoundItemRecord, LostItemReport, LostReportSubmission, ReportId,
};
use crate::workflows::recovery::repository::{
    FoundItemRepository, LostReportRepository, RepositoryError,
};
use crate::workflows::recovery::scoring::{
    CompletionClient, CompletionRequest, LocalSimilarityScorer, ScorerFailure, SemanticScorer,
};
use crate::workflows::recovery::{recovery_router, RecoveryService};

pub(super) fn found_item(suffix: &str) -> FoundItemRecord {
    FoundItemRecord {
        id: FoundItemId(format!("found-{suffix}")),
        name: "Water bottle".to_string(),
        description: "Steel bottle with a dented base".to_string(),
        color: "Navy blue".to_string(),
        size: "Medium".to_string(),
        shape: "Cylinder".to_string(),
        location_found: "Library second floor".to_string(),
        secret_detail: "Sticker of a fox under the lid".to_string(),
        image_url: "https://images.example/bottle.jpg".to_string(),
        claimed: false,
        created_at: Utc.with_ymd_and_hms(2025, 9, 1, 9, 30, 0).unwrap(),
    }
}

pub(super) fn umbrella(suffix: &str) -> FoundItemRecord {
    FoundItemRecord {
        id: FoundItemId(format!("found-{suffix}")),
        name: "Umbrella".to_string(),
        description: "Folding umbrella with a wooden handle".to_string(),
        color: "Yellow".to_string(),
        size: "Small".to_string(),
        shape: "Long".to_string(),
        location_found: "Cafeteria entrance".to_string(),
        secret_detail: "Name tag reading Priya".to_string(),
        image_url: String::new(),
        claimed: false,
        created_at: Utc.with_ymd_and_hms(2025, 9, 2, 14, 0, 0).unwrap(),
    }
}

/// Claim that repeats every attribute of `item`.
pub(super) fn mirroring_claim(item: &FoundItemRecord) -> ClaimAttempt {
    ClaimAttempt {
        secret_detail: item.secret_detail.clone(),
        claim_description: item.description.clone(),
        claimant_name: "Sam Rivera".to_string(),
        claimant_contact: "sam@example.edu".to_string(),
        color: item.color.clone(),
        size: item.size.clone(),
        shape: item.shape.clone(),
        item_name: item.name.clone(),
        location: item.location_found.clone(),
    }
}

pub(super) fn bottle_claim() -> ClaimAttempt {
    ClaimAttempt {
        secret_detail: "fox sticker under the lid".to_string(),
        claim_description: "navy steel water bottle, dent on the bottom".to_string(),
        claimant_name: "Sam Rivera".to_string(),
        claimant_contact: "sam@example.edu".to_string(),
        color: "navy blue".to_string(),
        size: "medium".to_string(),
        shape: "cylinder".to_string(),
        ..ClaimAttempt::default()
    }
}

pub(super) fn lost_bottle_submission() -> LostReportSubmission {
    LostReportSubmission {
        item_name: "Water bottle".to_string(),
        description: "Navy steel bottle".to_string(),
        color: "Navy blue".to_string(),
        size: "Medium".to_string(),
        shape: "Cylinder".to_string(),
        location_lost: "Library".to_string(),
        secret_detail: "Fox sticker under the lid".to_string(),
        contact: "sam@example.edu".to_string(),
    }
}

pub(super) fn lost_report(suffix: &str) -> LostItemReport {
    LostItemReport::from_submission(
        ReportId(format!("lost-{suffix}")),
        lost_bottle_submission(),
        Utc.with_ymd_and_hms(2025, 9, 3, 8, 0, 0).unwrap(),
    )
}

pub(super) fn matching_config() -> MatchingConfig {
    MatchingConfig::default()
}

#[derive(Default, Clone)]
pub(super) struct MemoryFoundItems {
    pub(super) records: Arc<Mutex<BTreeMap<FoundItemId, FoundItemRecord>>>,
}

impl MemoryFoundItems {
    pub(super) fn seeded(items: Vec<FoundItemRecord>) -> Self {
        let store = Self::default();
        for item in items {
            store.insert(item).expect("seed insert");
        }
        store
    }
}

impl FoundItemRepository for MemoryFoundItems {
    fn insert(&self, record: FoundItemRecord) -> Result<FoundItemRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &FoundItemId) -> Result<Option<FoundItemRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, unclaimed_only: bool) -> Result<Vec<FoundItemRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| !unclaimed_only || !record.claimed)
            .cloned()
            .collect())
    }

    fn mark_claimed_if_unclaimed(&self, id: &FoundItemId) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(id) {
            Some(record) if record.claimed => Ok(false),
            Some(record) => {
                record.mark_claimed();
                Ok(true)
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryReports {
    pub(super) reports: Arc<Mutex<BTreeMap<ReportId, LostItemReport>>>,
}

impl LostReportRepository for MemoryReports {
    fn insert(&self, report: LostItemReport) -> Result<LostItemReport, RepositoryError> {
        let mut guard = self.reports.lock().expect("repository mutex poisoned");
        guard.insert(report.id.clone(), report.clone());
        Ok(report)
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<LostItemReport>, RepositoryError> {
        let guard = self.reports.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<LostItemReport>, RepositoryError> {
        let guard = self.reports.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// Reads fine but loses every conditional claim update, as if a concurrent claim won.
pub(super) struct RacingFoundItems {
    pub(super) inner: MemoryFoundItems,
}

impl FoundItemRepository for RacingFoundItems {
    fn insert(&self, record: FoundItemRecord) -> Result<FoundItemRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn fetch(&self, id: &FoundItemId) -> Result<Option<FoundItemRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn list(&self, unclaimed_only: bool) -> Result<Vec<FoundItemRecord>, RepositoryError> {
        self.inner.list(unclaimed_only)
    }

    fn mark_claimed_if_unclaimed(&self, _id: &FoundItemId) -> Result<bool, RepositoryError> {
        Ok(false)
    }
}

pub(super) struct UnavailableFoundItems;

impl FoundItemRepository for UnavailableFoundItems {
    fn insert(&self, _record: FoundItemRecord) -> Result<FoundItemRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &FoundItemId) -> Result<Option<FoundItemRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _unclaimed_only: bool) -> Result<Vec<FoundItemRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn mark_claimed_if_unclaimed(&self, _id: &FoundItemId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Completion client returning a canned reply and recording every request.
pub(super) struct StubCompletion {
    reply: Result<String, ScorerFailure>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubCompletion {
    pub(super) fn text(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn failing(failure: ScorerFailure) -> Self {
        Self {
            reply: Err(failure),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("request mutex poisoned").clone()
    }
}

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ScorerFailure> {
        self.requests
            .lock()
            .expect("request mutex poisoned")
            .push(request);
        self.reply.clone()
    }
}

/// Completion client that never answers.
pub(super) struct StalledCompletion;

#[async_trait]
impl CompletionClient for StalledCompletion {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, ScorerFailure> {
        std::future::pending::<()>().await;
        Err(ScorerFailure::Transport("unreachable".to_string()))
    }
}

pub(super) fn semantic_with(client: Arc<dyn CompletionClient>) -> SemanticScorer {
    SemanticScorer::new(
        client,
        "test-model",
        Duration::from_millis(250),
        LocalSimilarityScorer::default(),
    )
}

pub(super) fn semantic_replying(reply: &str) -> SemanticScorer {
    semantic_with(Arc::new(StubCompletion::text(reply)))
}

pub(super) fn local_only() -> SemanticScorer {
    SemanticScorer::local_only(LocalSimilarityScorer::default())
}

pub(super) type MemoryService = RecoveryService<MemoryFoundItems, MemoryReports>;

pub(super) fn build_service(
    scorer: SemanticScorer,
    items: Vec<FoundItemRecord>,
) -> (Arc<MemoryService>, Arc<MemoryFoundItems>, Arc<MemoryReports>) {
    let found_items = Arc::new(MemoryFoundItems::seeded(items));
    let reports = Arc::new(MemoryReports::default());
    let service = RecoveryService::with_scorer(
        found_items.clone(),
        reports.clone(),
        &matching_config(),
        scorer,
    );
    (Arc::new(service), found_items, reports)
}

pub(super) fn router_for(service: Arc<MemoryService>) -> axum::Router {
    recovery_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
