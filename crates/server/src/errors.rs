use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub const INVALID_BODY: &str = "Corps de requête JSON invalide";

/// Error rendered as `{"error": message}` with the given status.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Client errors keep their own message; storage failures are logged and
    /// replaced by the operation's generic `fallback` message.
    pub fn from_service(err: ServiceError, fallback: &str) -> Self {
        if err.is_client_error() {
            warn!(error = %err, "request rejected");
            return Self::new(StatusCode::BAD_REQUEST, err.to_string());
        }
        error!(error = %err, "{fallback}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
    }
}

impl From<BytesRejection> for JsonApiError {
    fn from(rejection: BytesRejection) -> Self {
        warn!(status = %rejection.status(), reason = %rejection.body_text(), "unreadable request body");
        Self::new(StatusCode::BAD_REQUEST, INVALID_BODY)
    }
}

impl From<serde_json::Error> for JsonApiError {
    fn from(err: serde_json::Error) -> Self {
        warn!(error = %err, "invalid JSON body");
        Self::new(StatusCode::BAD_REQUEST, INVALID_BODY)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage initialization failed: {0}")]
    Storage(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
