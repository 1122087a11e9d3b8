use blink_types::{ActionError, UpstreamService};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("order request timed out: {0}")]
    Timeout(String),

    #[error("HTTP request to order endpoint failed: {0}")]
    RequestFailed(String),

    #[error("invalid response from order endpoint: {0}")]
    InvalidResponse(String),

    #[error("order rejected: {0}")]
    Rejected(String),
}

impl From<OrderError> for ActionError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Timeout(_) => ActionError::UpstreamTimeout {
                service: UpstreamService::OrderApi,
            },
            other => ActionError::upstream(UpstreamService::OrderApi, other.to_string()),
        }
    }
}
