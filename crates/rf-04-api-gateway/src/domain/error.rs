//! Gateway error types.
//!
//! `ApiError` is what a handler returns: an HTTP status plus a message,
//! rendered as `{"status": 404, "error": "Not Found", "message": "..."}`.
//! `GatewayError` covers the server lifecycle.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared_types::{ErrorClass, ServiceError};
use thiserror::Error;
use tracing::debug;

/// Error returned from a request handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// Wraps a rejected launch as `Launch failed: <stage> (<reason>)`,
    /// keeping the status of the underlying failure.
    pub fn launch_failed(err: ServiceError) -> Self {
        let stage = match &err {
            ServiceError::NotFound { .. } => "no rocket",
            ServiceError::AlreadyLaunched(_) => "already launched",
            ServiceError::NotReady(_) => "rocket not ready",
            // The rocket is already LAUNCHED; only its audit record is missing.
            ServiceError::DuplicateKey { .. } => "record not stored",
            _ => return err.into(),
        };
        let inner = Self::from(err);
        Self::new(
            inner.status,
            format!("Launch failed: {stage} ({})", inner.message),
        )
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match err.class() {
            ErrorClass::NotFound => StatusCode::NOT_FOUND,
            ErrorClass::BadRequest => StatusCode::BAD_REQUEST,
            ErrorClass::Conflict => StatusCode::CONFLICT,
        };
        let message = match err {
            ServiceError::IllegalTransition { requested, .. } => format!(
                "Status can't be set to {requested} through /rockets API. Use /launch API instead"
            ),
            other => other.to_string(),
        };
        Self::new(status, message)
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(status = %self.status, message = %self.message, "Request rejected");
        let body = ErrorBody {
            status: self.status.as_u16(),
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Gateway lifecycle errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to bind the listener
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Server terminated with an error
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}
