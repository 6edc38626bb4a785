use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ProjectionConfig;
use crate::projector::{observed_statuses, project, ProjectedView, ViewParameters};
use crate::records::{Draft, Projectable, RecordId, RecordSnapshot};
use crate::session::Session;

use super::repository::{RecordStore, StoreError};

/// Service composing a record store with the list view projector.
pub struct DashboardService<R, S> {
    store: Arc<S>,
    projection: ProjectionConfig,
    _records: PhantomData<fn() -> R>,
}

impl<R, S> DashboardService<R, S>
where
    R: Projectable + Clone + PartialEq + Send + Sync + 'static,
    S: RecordStore<R> + 'static,
{
    pub fn new(store: Arc<S>, projection: ProjectionConfig) -> Self {
        Self {
            store,
            projection,
            _records: PhantomData,
        }
    }

    pub fn projection(&self) -> ProjectionConfig {
        self.projection
    }

    /// View parameters a request starts from before applying its own query.
    pub fn default_parameters(&self) -> ViewParameters {
        ViewParameters::new().with_page_size(self.projection.page_size)
    }

    pub fn snapshot(&self) -> Result<RecordSnapshot<R>, DashboardError> {
        Ok(self.store.snapshot()?)
    }

    /// Project the current snapshot. Never fails once the snapshot is read.
    pub fn view(&self, params: &ViewParameters) -> Result<ProjectedView<R>, DashboardError> {
        let snapshot = self.store.snapshot()?;
        let view = project(
            snapshot.records(),
            params,
            self.projection.visible_per_stage,
        );

        debug!(
            kind = %R::KIND,
            generation = snapshot.generation(),
            fetched_at = %snapshot.fetched_at(),
            total = view.total(),
            page = view.page,
            total_pages = view.total_pages,
            "projected record view"
        );

        Ok(view)
    }

    pub fn statuses(&self) -> Result<Vec<String>, DashboardError> {
        let snapshot = self.store.snapshot()?;
        Ok(observed_statuses(snapshot.records()))
    }

    pub fn get(&self, id: &RecordId) -> Result<R, DashboardError> {
        let record = self.store.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }

    pub fn create(&self, session: &Session, record: R) -> Result<R, DashboardError> {
        let stored = self.store.insert(session, record)?;
        info!(kind = %R::KIND, id = %stored.record_id(), "record created");
        Ok(stored)
    }

    /// Start editing a shadow copy of a stored record.
    pub fn begin_edit(&self, id: &RecordId) -> Result<Draft<R>, DashboardError> {
        let record = self.get(id)?;
        Ok(Draft::from_record(&record))
    }

    /// Persist a draft. Clean drafts are returned without a store round trip.
    pub fn save(&self, session: &Session, draft: Draft<R>) -> Result<R, DashboardError> {
        if !draft.is_dirty() {
            return Ok(draft.into_record());
        }

        let original = draft.original().record_id().clone();
        let edited = draft.current().record_id();
        if &original != edited {
            return Err(DashboardError::IdMismatch {
                expected: original,
                found: edited.clone(),
            });
        }

        let stored = self.store.update(session, draft.into_record())?;
        info!(kind = %R::KIND, id = %original, "record updated");
        Ok(stored)
    }

    pub fn delete(&self, session: &Session, id: &RecordId) -> Result<(), DashboardError> {
        self.store.delete(session, id)?;
        info!(kind = %R::KIND, id = %id, "record deleted");
        Ok(())
    }
}

/// Error raised by the dashboard service.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("record id '{found}' does not match '{expected}'")]
    IdMismatch { expected: RecordId, found: RecordId },
}
