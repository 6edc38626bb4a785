use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::records::{Projectable, RecordId};
use crate::session::Session;

use super::query::ViewQuery;
use super::repository::{RecordStore, StoreError};
use super::service::{DashboardError, DashboardService};

/// Records that can travel through the HTTP surface.
pub trait DashboardRecord:
    Projectable + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> DashboardRecord for T where
    T: Projectable + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// Router exposing list, view, and write endpoints for one record kind under
/// `/api/v1/<kind>`.
pub fn dashboard_router<R, S>(service: Arc<DashboardService<R, S>>) -> Router
where
    R: DashboardRecord,
    S: RecordStore<R> + 'static,
{
    let base = format!("/api/v1/{}", R::KIND.path_segment());

    Router::new()
        .route(
            &base,
            get(list_handler::<R, S>).post(create_handler::<R, S>),
        )
        .route(&format!("{base}/view"), get(view_handler::<R, S>))
        .route(&format!("{base}/statuses"), get(statuses_handler::<R, S>))
        .route(
            &format!("{base}/:record_id"),
            get(fetch_handler::<R, S>)
                .put(update_handler::<R, S>)
                .delete(delete_handler::<R, S>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R, S>(
    State(service): State<Arc<DashboardService<R, S>>>,
) -> Response
where
    R: DashboardRecord,
    S: RecordStore<R> + 'static,
{
    match service.snapshot() {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot.records().to_vec())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn view_handler<R, S>(
    State(service): State<Arc<DashboardService<R, S>>>,
    Query(query): Query<ViewQuery>,
) -> Response
where
    R: DashboardRecord,
    S: RecordStore<R> + 'static,
{
    let params = match query.into_parameters::<R>(service.default_parameters()) {
        Ok(params) => params,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.view(&params) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn statuses_handler<R, S>(
    State(service): State<Arc<DashboardService<R, S>>>,
) -> Response
where
    R: DashboardRecord,
    S: RecordStore<R> + 'static,
{
    match service.statuses() {
        Ok(statuses) => {
            let payload = json!({ "kind": R::KIND, "statuses": statuses });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn fetch_handler<R, S>(
    State(service): State<Arc<DashboardService<R, S>>>,
    Path(record_id): Path<String>,
) -> Response
where
    R: DashboardRecord,
    S: RecordStore<R> + 'static,
{
    match service.get(&RecordId(record_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<R, S>(
    State(service): State<Arc<DashboardService<R, S>>>,
    session: Session,
    payload: Result<axum::Json<R>, JsonRejection>,
) -> Response
where
    R: DashboardRecord,
    S: RecordStore<R> + 'static,
{
    let record = match payload {
        Ok(axum::Json(record)) => record,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.create(&session, record) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R, S>(
    State(service): State<Arc<DashboardService<R, S>>>,
    session: Session,
    Path(record_id): Path<String>,
    payload: Result<axum::Json<R>, JsonRejection>,
) -> Response
where
    R: DashboardRecord,
    S: RecordStore<R> + 'static,
{
    let record = match payload {
        Ok(axum::Json(record)) => record,
        Err(rejection) => return rejection_response(rejection),
    };

    let id = RecordId(record_id);
    if record.record_id() != &id {
        return error_response(DashboardError::IdMismatch {
            expected: id,
            found: record.record_id().clone(),
        });
    }

    let mut draft = match service.begin_edit(&id) {
        Ok(draft) => draft,
        Err(err) => return error_response(err),
    };
    draft.edit(|current| *current = record);

    match service.save(&session, draft) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R, S>(
    State(service): State<Arc<DashboardService<R, S>>>,
    session: Session,
    Path(record_id): Path<String>,
) -> Response
where
    R: DashboardRecord,
    S: RecordStore<R> + 'static,
{
    match service.delete(&session, &RecordId(record_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

/// Body decoding failures keep axum's status but use the JSON error shape.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({ "error": rejection.body_text() });
    (rejection.status(), axum::Json(payload)).into_response()
}

fn error_response(err: DashboardError) -> Response {
    let status = match &err {
        DashboardError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        DashboardError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        DashboardError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
        DashboardError::Store(StoreError::Unavailable(_)) => {
            warn!(error = %err, "record store unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
