use ats_dashboard::config::ProjectionConfig;
use ats_dashboard::dashboard::{DashboardService, RecordStore, StoreError};
use ats_dashboard::error::AppError;
use ats_dashboard::records::{
    load_records, Candidate, Customer, Interview, Job, Projectable, RecordId, RecordSnapshot,
};
use ats_dashboard::session::Session;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local record store. Every successful write bumps the generation so
/// later snapshots supersede earlier ones.
#[derive(Clone)]
pub(crate) struct InMemoryRecordStore<R> {
    records: Arc<Mutex<Vec<R>>>,
    generation: Arc<AtomicU64>,
}

impl<R> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self::with_records(Vec::new())
    }
}

impl<R> InMemoryRecordStore<R> {
    pub(crate) fn with_records(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            generation: Arc::new(AtomicU64::new(1)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<R>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("record store mutex poisoned".to_string()))
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl<R> RecordStore<R> for InMemoryRecordStore<R>
where
    R: Projectable + Clone + Send + Sync,
{
    fn snapshot(&self) -> Result<RecordSnapshot<R>, StoreError> {
        let guard = self.lock()?;
        Ok(RecordSnapshot::new(
            self.generation.load(Ordering::Acquire),
            guard.clone(),
        ))
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<R>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|record| record.record_id() == id).cloned())
    }

    fn insert(&self, session: &Session, record: R) -> Result<R, StoreError> {
        let mut guard = self.lock()?;
        if guard
            .iter()
            .any(|existing| existing.record_id() == record.record_id())
        {
            return Err(StoreError::Conflict);
        }
        guard.push(record.clone());
        self.bump();
        debug!(?session, id = %record.record_id(), "inserted record");
        Ok(record)
    }

    fn update(&self, session: &Session, record: R) -> Result<R, StoreError> {
        let mut guard = self.lock()?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.record_id() == record.record_id())
            .ok_or(StoreError::NotFound)?;
        *slot = record.clone();
        self.bump();
        debug!(?session, id = %record.record_id(), "updated record");
        Ok(record)
    }

    fn delete(&self, session: &Session, id: &RecordId) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        let position = guard
            .iter()
            .position(|record| record.record_id() == id)
            .ok_or(StoreError::NotFound)?;
        guard.remove(position);
        self.bump();
        debug!(?session, %id, "deleted record");
        Ok(())
    }
}

pub(crate) type MemoryService<R> = DashboardService<R, InMemoryRecordStore<R>>;

/// One dashboard service per record kind.
#[derive(Clone)]
pub(crate) struct DashboardServices {
    pub(crate) jobs: Arc<MemoryService<Job>>,
    pub(crate) candidates: Arc<MemoryService<Candidate>>,
    pub(crate) interviews: Arc<MemoryService<Interview>>,
    pub(crate) customers: Arc<MemoryService<Customer>>,
}

impl DashboardServices {
    /// Build the services, seeding each store from `<kind>.json` in
    /// `seed_dir` when the file exists.
    pub(crate) fn load(
        seed_dir: Option<&Path>,
        projection: ProjectionConfig,
    ) -> Result<Self, AppError> {
        Ok(Self {
            jobs: Arc::new(seeded_service::<Job>(seed_dir, projection)?),
            candidates: Arc::new(seeded_service::<Candidate>(seed_dir, projection)?),
            interviews: Arc::new(seeded_service::<Interview>(seed_dir, projection)?),
            customers: Arc::new(seeded_service::<Customer>(seed_dir, projection)?),
        })
    }
}

fn seeded_service<R>(
    seed_dir: Option<&Path>,
    projection: ProjectionConfig,
) -> Result<MemoryService<R>, AppError>
where
    R: Projectable + Clone + PartialEq + DeserializeOwned + Send + Sync + 'static,
{
    let records = match seed_dir {
        Some(dir) => seed_records::<R>(dir)?,
        None => Vec::new(),
    };
    let store = Arc::new(InMemoryRecordStore::with_records(records));
    Ok(DashboardService::new(store, projection))
}

pub(crate) fn seed_records<R>(dir: &Path) -> Result<Vec<R>, AppError>
where
    R: Projectable + DeserializeOwned,
{
    let path = dir.join(format!("{}.json", R::KIND.path_segment()));
    if !path.is_file() {
        debug!(kind = %R::KIND, path = %path.display(), "no seed file, starting empty");
        return Ok(Vec::new());
    }

    let records = load_records::<R, _>(&path)?;
    info!(kind = %R::KIND, count = records.len(), path = %path.display(), "seeded record store");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn session() -> Session {
        Session::bearer("infra-token").expect("session")
    }

    fn job(id: &str, status: &str) -> Job {
        Job {
            id: RecordId::from(id),
            title: Some(format!("Role {id}")),
            department: None,
            location: None,
            employment_type: None,
            status: status.to_string(),
            openings: None,
            salary_min: None,
            salary_max: None,
            created_at: None,
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "ats-dashboard-api-{name}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("scratch dir");
        dir
    }

    #[test]
    fn writes_advance_the_generation() {
        let store = InMemoryRecordStore::with_records(vec![job("1", "open")]);
        let first = store.snapshot().expect("snapshot");

        store.insert(&session(), job("2", "draft")).expect("insert");
        let second = store.snapshot().expect("snapshot");
        assert!(second.supersedes(&first));
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);

        assert!(matches!(
            store.insert(&session(), job("2", "open")),
            Err(StoreError::Conflict)
        ));
    }

    #[test]
    fn update_and_delete_require_existing_records() {
        let store = InMemoryRecordStore::with_records(vec![job("1", "open")]);
        assert!(matches!(
            store.update(&session(), job("9", "open")),
            Err(StoreError::NotFound)
        ));

        store
            .update(&session(), job("1", "closed"))
            .expect("update");
        let fetched = store
            .fetch(&RecordId::from("1"))
            .expect("fetch")
            .expect("present");
        assert_eq!(fetched.status, "closed");

        store
            .delete(&session(), &RecordId::from("1"))
            .expect("delete");
        assert!(matches!(
            store.delete(&session(), &RecordId::from("1")),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn seeding_skips_missing_files() {
        let dir = scratch_dir("seed");
        fs::write(
            dir.join("jobs.json"),
            r#"[{"id": 1, "title": "Senior React Developer", "status": "open"}]"#,
        )
        .expect("write seed");

        let jobs = seed_records::<Job>(&dir).expect("jobs seed");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id.as_str(), "1");

        let customers = seed_records::<Customer>(&dir).expect("missing seed skipped");
        assert!(customers.is_empty());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn malformed_seed_file_is_an_error() {
        let dir = scratch_dir("bad-seed");
        fs::write(dir.join("candidates.json"), "{ not json").expect("write seed");

        let result = seed_records::<Candidate>(&dir);
        assert!(matches!(result, Err(AppError::Import(_))));

        fs::remove_dir_all(&dir).ok();
    }
}
