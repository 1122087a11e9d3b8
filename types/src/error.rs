//! Error types shared across crates.

use std::fmt;
use thiserror::Error;

/// The downstream collaborator an upstream failure came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpstreamService {
    /// The order-creation (KYC) API.
    OrderApi,
    /// The ledger JSON-RPC endpoint.
    Ledger,
}

impl UpstreamService {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderApi => "order API",
            Self::Ledger => "ledger RPC",
        }
    }
}

impl fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single action request.
///
/// Validation variants are the client's fault and never reach a collaborator.
/// Upstream variants carry a `detail` meant for logs, not for the response body.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Missing \"fullName\", \"email\", or \"country\" in the request")]
    MissingField(&'static str),

    #[error("Invalid \"account\" provided")]
    InvalidAccount(String),

    #[error("Invalid \"routers\" value provided")]
    InvalidQuantity(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{service} request failed")]
    Upstream {
        service: UpstreamService,
        detail: String,
    },

    #[error("{service} request timed out")]
    UpstreamTimeout { service: UpstreamService },

    /// A fault in this service itself; the detail is for logs only.
    #[error("Internal server error")]
    Internal(String),
}

impl ActionError {
    pub fn upstream(service: UpstreamService, detail: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            detail: detail.into(),
        }
    }

    /// True for failures caused by client input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_)
                | Self::InvalidAccount(_)
                | Self::InvalidQuantity(_)
                | Self::InvalidBody(_)
        )
    }

    /// The collaborator at fault, if any.
    pub fn upstream_service(&self) -> Option<UpstreamService> {
        match self {
            Self::Upstream { service, .. } | Self::UpstreamTimeout { service } => Some(*service),
            _ => None,
        }
    }
}

/// Errors from parsing a decimal SOL amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,

    #[error("invalid digit in amount: {0}")]
    InvalidDigit(String),

    #[error("amount has more than 9 fractional digits: {0}")]
    TooPrecise(String),

    #[error("amount overflows u64 lamports: {0}")]
    Overflow(String),
}

/// Violations of the action-link invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("placeholder {{{placeholder}}} in {href} has no matching parameter")]
    UnboundPlaceholder { href: String, placeholder: String },

    #[error("duplicate parameter name: {0}")]
    DuplicateParameter(String),

    #[error("unterminated placeholder in {0}")]
    UnterminatedPlaceholder(String),
}
