//! Server error types and the HTTP mapping of action errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use blink_types::{ActionError, ErrorBody};
use thiserror::Error;
use tracing::{error, warn};

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// An [`ActionError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub ActionError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ActionError::MissingField(_)
            | ActionError::InvalidAccount(_)
            | ActionError::InvalidQuantity(_)
            | ActionError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ActionError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ActionError::UpstreamTimeout { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ActionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ActionError> for ApiError {
    fn from(err: ActionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // The response carries only the Display text; the detail stays in the log.
        match &self.0 {
            err if err.is_validation() => {
                warn!(status = status.as_u16(), error = %err, "rejected submission")
            }
            ActionError::Internal(detail) => {
                error!(status = status.as_u16(), detail = %detail, "internal failure")
            }
            err => error!(status = status.as_u16(), error = ?err, "upstream failure"),
        }
        (status, Json(ErrorBody::new(self.0.to_string()))).into_response()
    }
}
