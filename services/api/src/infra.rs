use lost_found::workflows::recovery::{
    FoundItemId, FoundItemRecord, FoundItemRepository, LostItemReport, LostReportRepository,
    ReportId, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) semantic_enabled: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
}

/// Records in insertion order with an id index for point lookups.
struct InsertionOrdered<K, V> {
    records: Vec<V>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for InsertionOrdered<K, V> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K, V> InsertionOrdered<K, V>
where
    K: Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Result<(), RepositoryError> {
        if self.index.contains_key(&key) {
            return Err(RepositoryError::Conflict);
        }
        self.index.insert(key, self.records.len());
        self.records.push(value);
        Ok(())
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.index
            .get(key)
            .and_then(|position| self.records.get(*position))
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let position = *self.index.get(key)?;
        self.records.get_mut(position)
    }

    fn values(&self) -> impl Iterator<Item = &V> {
        self.records.iter()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryFoundItemRepository {
    records: Arc<Mutex<InsertionOrdered<FoundItemId, FoundItemRecord>>>,
}

impl FoundItemRepository for InMemoryFoundItemRepository {
    fn insert(&self, record: FoundItemRecord) -> Result<FoundItemRecord, RepositoryError> {
        let mut guard = lock(&self.records)?;
        guard.insert(record.id.clone(), record.clone())?;
        Ok(record)
    }

    fn fetch(&self, id: &FoundItemId) -> Result<Option<FoundItemRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self, unclaimed_only: bool) -> Result<Vec<FoundItemRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard
            .values()
            .filter(|record| !unclaimed_only || !record.claimed)
            .cloned()
            .collect())
    }

    fn mark_claimed_if_unclaimed(&self, id: &FoundItemId) -> Result<bool, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if record.claimed {
            return Ok(false);
        }
        record.mark_claimed();
        Ok(true)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLostReportRepository {
    reports: Arc<Mutex<InsertionOrdered<ReportId, LostItemReport>>>,
}

impl LostReportRepository for InMemoryLostReportRepository {
    fn insert(&self, report: LostItemReport) -> Result<LostItemReport, RepositoryError> {
        let mut guard = lock(&self.reports)?;
        guard.insert(report.id.clone(), report.clone())?;
        Ok(report)
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<LostItemReport>, RepositoryError> {
        let guard = lock(&self.reports)?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<LostItemReport>, RepositoryError> {
        let guard = lock(&self.reports)?;
        Ok(guard.values().cloned().collect())
    }
}
