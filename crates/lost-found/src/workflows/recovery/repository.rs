use super::domain::{FoundItemId, FoundItemRecord, LostItemReport, ReportId};

/// Storage abstraction for found items so the service can be exercised in isolation.
///
/// `list` must return items in registration order; ranking ties fall back to it.
pub trait FoundItemRepository: Send + Sync {
    fn insert(&self, record: FoundItemRecord) -> Result<FoundItemRecord, RepositoryError>;
    fn fetch(&self, id: &FoundItemId) -> Result<Option<FoundItemRecord>, RepositoryError>;
    fn list(&self, unclaimed_only: bool) -> Result<Vec<FoundItemRecord>, RepositoryError>;
    /// Conditional update: sets `claimed` only if it is currently unset.
    ///
    /// Returns `Ok(false)` when another claim got there first.
    fn mark_claimed_if_unclaimed(&self, id: &FoundItemId) -> Result<bool, RepositoryError>;
}

/// Storage abstraction for lost-item reports.
pub trait LostReportRepository: Send + Sync {
    fn insert(&self, report: LostItemReport) -> Result<LostItemReport, RepositoryError>;
    fn fetch(&self, id: &ReportId) -> Result<Option<LostItemReport>, RepositoryError>;
    fn list(&self) -> Result<Vec<LostItemReport>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
