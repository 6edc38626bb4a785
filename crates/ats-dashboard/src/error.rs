use crate::config::ConfigError;
use crate::dashboard::{DashboardError, StoreError, ViewParameterError};
use crate::records::{ParseEntityKindError, RecordImportError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Import(RecordImportError),
    Kind(ParseEntityKindError),
    Parameters(ViewParameterError),
    Dashboard(DashboardError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Import(err) => write!(f, "record import error: {}", err),
            AppError::Kind(err) => write!(f, "{}", err),
            AppError::Parameters(err) => write!(f, "invalid view parameters: {}", err),
            AppError::Dashboard(err) => write!(f, "dashboard error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Kind(err) => Some(err),
            AppError::Parameters(err) => Some(err),
            AppError::Dashboard(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Import(_)
            | AppError::Kind(_)
            | AppError::Parameters(_)
            | AppError::Dashboard(DashboardError::IdMismatch { .. }) => StatusCode::BAD_REQUEST,
            AppError::Dashboard(DashboardError::Store(StoreError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Dashboard(DashboardError::Store(StoreError::Conflict)) => {
                StatusCode::CONFLICT
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Dashboard(DashboardError::Store(StoreError::Unavailable(_))) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RecordImportError> for AppError {
    fn from(value: RecordImportError) -> Self {
        Self::Import(value)
    }
}

impl From<ParseEntityKindError> for AppError {
    fn from(value: ParseEntityKindError) -> Self {
        Self::Kind(value)
    }
}

impl From<ViewParameterError> for AppError {
    fn from(value: ViewParameterError) -> Self {
        Self::Parameters(value)
    }
}

impl From<DashboardError> for AppError {
    fn from(value: DashboardError) -> Self {
        Self::Dashboard(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_status_codes() {
        let missing = AppError::from(DashboardError::Store(StoreError::NotFound));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let conflict = AppError::from(DashboardError::Store(StoreError::Conflict));
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);

        let offline = AppError::from(DashboardError::Store(StoreError::Unavailable(
            "timeout".to_string(),
        )));
        assert_eq!(
            offline.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn input_errors_are_client_errors() {
        let err = AppError::from(ParseEntityKindError("widgets".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = AppError::from(ViewParameterError::InvalidDirection("up".to_string()));
        assert!(err.to_string().starts_with("invalid view parameters"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
