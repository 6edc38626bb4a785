use std::fmt;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Bearer credentials for the current caller.
///
/// Handed explicitly to whatever performs writes; nothing reads tokens from
/// ambient state. Issuing and validating tokens belongs to the auth service.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn bearer(token: impl Into<String>) -> Result<Self, SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::Missing);
        }
        Ok(Self { token })
    }

    /// Parse an `Authorization: Bearer <token>` header value.
    pub fn from_authorization(value: &str) -> Result<Self, SessionError> {
        let value = value.trim();
        let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(SessionError::InvalidScheme);
        }
        Self::bearer(token.trim())
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("missing bearer token")]
    Missing,
    #[error("authorization header must use the Bearer scheme")]
    InvalidScheme,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            body,
        )
            .into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = SessionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(SessionError::Missing)?
            .to_str()
            .map_err(|_| SessionError::InvalidScheme)?;
        Session::from_authorization(value)
    }
}
