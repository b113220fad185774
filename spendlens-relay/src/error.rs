//! Error types for the classification relay

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Relay-wide result type
pub type Result<T> = std::result::Result<T, RelayError>;

/// Failure of one call to the generative model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Provider answered 429 for the key used on this attempt
    #[error("rate limited (429): {0}")]
    RateLimited(String),

    #[error("model API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}

impl ModelError {
    /// Only rate limiting is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ModelError::RateLimited(_))
    }
}

/// Errors surfaced at the HTTP boundary
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("rate limit retries exhausted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("{context}: {source}")]
    Model {
        context: &'static str,
        #[source]
        source: ModelError,
    },

    /// Model output that does not fit the response contract
    #[error("{context}: {message}")]
    InvalidOutput {
        context: &'static str,
        message: String,
    },

    #[error("{message}")]
    BadRequest { status: StatusCode, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::RetriesExhausted { .. } => StatusCode::TOO_MANY_REQUESTS,
            RelayError::BadRequest { status, .. } => *status,
            RelayError::Model { .. }
            | RelayError::InvalidOutput { .. }
            | RelayError::Config(_)
            | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        (status, Json(ErrorBody { detail: self.to_string() })).into_response()
    }
}
