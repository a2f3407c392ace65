//! Maps domain and extraction failures onto HTTP responses.
//!
//! Every error body has the shape `{"error": "..."}`.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::DomainError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request could not be turned into typed input.
    #[error("{0}")]
    BadRequest(String),

    /// Body failed while streaming; keeps the status axum assigned (e.g. 413).
    #[error("{message}")]
    Body { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            ApiError::Domain(DomainError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Domain(DomainError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Body { status, .. } => *status,
        }
    }

    /// Client-facing text. Internal details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Domain(err @ DomainError::NotFound { .. }) => err.to_string(),
            ApiError::Domain(DomainError::InvalidArgument(msg))
            | ApiError::Domain(DomainError::Unauthorized(msg))
            | ApiError::Domain(DomainError::Conflict(msg))
            | ApiError::BadRequest(msg)
            | ApiError::Body { message: msg, .. } => msg.clone(),
            ApiError::Domain(DomainError::Internal(_)) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(%status, error = %self, "request rejected");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Body { status: err.status(), message: err.body_text() }
    }
}
