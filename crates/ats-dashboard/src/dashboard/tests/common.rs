use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;

use crate::config::ProjectionConfig;
use crate::dashboard::{dashboard_router, DashboardService, RecordStore, StoreError};
use crate::records::{Candidate, Projectable, RecordId, RecordSnapshot};
use crate::session::Session;

pub(super) fn candidate(id: &str, name: &str, status: &str) -> Candidate {
    Candidate {
        id: RecordId::from(id),
        name: Some(name.to_string()),
        email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        phone: None,
        job_title: Some("Frontend Engineer".to_string()),
        status: status.to_string(),
        experience_years: None,
        rating: None,
        created_at: Some(format!("2024-04-{:02}", id.parse::<u32>().unwrap_or(1))),
    }
}

/// Nine applied, two interviewing, one hired.
pub(super) fn pipeline() -> Vec<Candidate> {
    let mut records: Vec<Candidate> = (1..=9)
        .map(|index| candidate(&index.to_string(), &format!("Applicant {index}"), "Applied"))
        .collect();
    records.push(candidate("10", "Grace Hopper", "Interview"));
    records.push(candidate("11", "Alan Turing", "Interview"));
    records.push(candidate("12", "Ada Lovelace", "Hired"));
    records
}

pub(super) fn projection() -> ProjectionConfig {
    ProjectionConfig {
        page_size: 5,
        visible_per_stage: 6,
    }
}

pub(super) fn session() -> Session {
    Session::bearer("test-token").expect("valid session")
}

pub(super) struct MemoryStore<R> {
    records: Mutex<Vec<R>>,
    generation: AtomicU64,
    writes: AtomicUsize,
    tokens: Mutex<Vec<String>>,
}

impl<R> MemoryStore<R> {
    pub(super) fn with_records(records: Vec<R>) -> Self {
        Self {
            records: Mutex::new(records),
            generation: AtomicU64::new(1),
            writes: AtomicUsize::new(0),
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(super) fn tokens(&self) -> Vec<String> {
        self.tokens.lock().expect("token mutex poisoned").clone()
    }

    fn record_write(&self, session: &Session) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.tokens
            .lock()
            .expect("token mutex poisoned")
            .push(session.token().to_string());
    }
}

impl<R> RecordStore<R> for MemoryStore<R>
where
    R: Projectable + Clone + Send + Sync,
{
    fn snapshot(&self) -> Result<RecordSnapshot<R>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(RecordSnapshot::new(
            self.generation.load(Ordering::SeqCst),
            guard.clone(),
        ))
    }

    fn fetch(&self, id: &RecordId) -> Result<Option<R>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.iter().find(|record| record.record_id() == id).cloned())
    }

    fn insert(&self, session: &Session, record: R) -> Result<R, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.record_id() == record.record_id())
        {
            return Err(StoreError::Conflict);
        }
        guard.push(record.clone());
        self.record_write(session);
        Ok(record)
    }

    fn update(&self, session: &Session, record: R) -> Result<R, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.record_id() == record.record_id())
            .ok_or(StoreError::NotFound)?;
        *slot = record.clone();
        self.record_write(session);
        Ok(record)
    }

    fn delete(&self, session: &Session, id: &RecordId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let before = guard.len();
        guard.retain(|record| record.record_id() != id);
        if guard.len() == before {
            return Err(StoreError::NotFound);
        }
        self.record_write(session);
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl RecordStore<Candidate> for UnavailableStore {
    fn snapshot(&self) -> Result<RecordSnapshot<Candidate>, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    fn fetch(&self, _id: &RecordId) -> Result<Option<Candidate>, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    fn insert(&self, _session: &Session, _record: Candidate) -> Result<Candidate, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    fn update(&self, _session: &Session, _record: Candidate) -> Result<Candidate, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }

    fn delete(&self, _session: &Session, _id: &RecordId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    DashboardService<Candidate, MemoryStore<Candidate>>,
    Arc<MemoryStore<Candidate>>,
) {
    let store = Arc::new(MemoryStore::with_records(pipeline()));
    let service = DashboardService::new(store.clone(), projection());
    (service, store)
}

pub(super) fn candidate_router() -> (axum::Router, Arc<MemoryStore<Candidate>>) {
    let (service, store) = build_service();
    (dashboard_router(Arc::new(service)), store)
}

pub(super) fn request(method: Method, uri: &str, body: Option<Value>, authorized: bool) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if authorized {
        builder = builder.header(header::AUTHORIZATION, session().authorization_header());
    }
    match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds"),
        None => builder.body(Body::empty()).expect("request builds"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
