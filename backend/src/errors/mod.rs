//! Global application error types and handlers.
//!
//! Validation problems become a 400 with their message. Anything that goes wrong
//! while talking to the upstream becomes a 500 with one fixed message; the cause
//! is logged and never sent to the browser.

use adapters::AdapterError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] AdapterError),

    #[error("malformed upstream response: {0}")]
    MalformedUpstream(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::MalformedUpstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message the browser sees.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(message) => message.clone(),
            AppError::Upstream(_) | AppError::MalformedUpstream(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => AppError::MalformedUpstream(err.to_string()),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "relay failed");
        }
        (status, Json(json!({ "message": self.public_message() }))).into_response()
    }
}
