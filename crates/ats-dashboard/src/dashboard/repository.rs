use crate::records::{RecordId, RecordSnapshot};
use crate::session::Session;

/// Storage abstraction so the dashboard service can run against the remote
/// backend or an in-memory store.
///
/// Write calls receive the caller's [`Session`] so a backend-facing store can
/// forward the bearer token.
pub trait RecordStore<R>: Send + Sync {
    /// Current collection; each call may return a newer generation.
    fn snapshot(&self) -> Result<RecordSnapshot<R>, StoreError>;
    fn fetch(&self, id: &RecordId) -> Result<Option<R>, StoreError>;
    fn insert(&self, session: &Session, record: R) -> Result<R, StoreError>;
    fn update(&self, session: &Session, record: R) -> Result<R, StoreError>;
    fn delete(&self, session: &Session, id: &RecordId) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
