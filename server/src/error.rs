//! API failures and their HTTP mapping.
//!
//! Every handler returns `Result<_, AppError>`; the `IntoResponse` impl below
//! is the one place where a failure turns into a status code and an
//! `{"error": message}` body.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input.
    #[error("{0}")]
    InvalidArgument(String),

    /// No item at the requested id.
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unclassified(String),
}

impl AppError {
    /// The 404 raised for an id token that matches nothing.
    pub fn not_found(token: &str) -> Self {
        AppError::NotFound(format!("{token} is not found."))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // The body itself could not be read; not a problem with its content.
            JsonRejection::BytesRejection(_) => AppError::Unclassified(rejection.body_text()),
            _ => AppError::InvalidArgument(rejection.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidArgument(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
