//! Request-level errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Everything that can stop a request from producing a result.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Calculator path had no segments at all.
    #[error("missing operation")]
    MissingOperation,

    #[error("{op} expects 2 operands, got {got}")]
    MissingOperands { op: &'static str, got: usize },

    #[error("invalid integer operand: {0:?}")]
    InvalidInteger(String),

    #[error("invalid number operand: {0:?}")]
    InvalidNumber(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    Overflow,

    /// Multiply path contained nothing that looks like an integer.
    #[error("no integer segments in path")]
    NoOperands,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ServiceError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Upstream(UpstreamError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Rejected request");
        }
        (status, format!("{self}\n")).into_response()
    }
}
