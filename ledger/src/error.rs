use blink_types::{ActionError, UpstreamService};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger RPC unreachable: {0}")]
    Unreachable(String),

    #[error("ledger RPC timed out: {0}")]
    Timeout(String),

    #[error("ledger RPC returned HTTP {0}")]
    HttpStatus(u16),

    #[error("ledger RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid ledger RPC response: {0}")]
    InvalidResponse(String),

    #[error("transaction serialization failed: {0}")]
    Serialization(String),
}

impl From<LedgerError> for ActionError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::Timeout(_) => ActionError::UpstreamTimeout {
                service: UpstreamService::Ledger,
            },
            // Encoding our own transaction is not a downstream failure.
            LedgerError::Serialization(detail) => ActionError::Internal(detail),
            other => ActionError::upstream(UpstreamService::Ledger, other.to_string()),
        }
    }
}
