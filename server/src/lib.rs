//! HTTP surface of the buy-router action flow.
//!
//! Routes:
//! - `GET|OPTIONS|POST /api/actions/buy-router-chaining` (collection step)
//! - `GET|OPTIONS|POST /api/actions/buy-router-chaining/router-purchase`
//! - `GET /health`
//!
//! Every response carries the CORS and action-protocol headers.

pub mod config;
pub mod error;
pub mod handlers;
pub mod headers;
pub mod origin;
pub mod server;
pub mod shutdown;

pub use config::{ActionHeaders, ConfigError, ServiceConfig};
pub use error::{ApiError, ServerError};
pub use origin::RequestOrigin;
pub use server::{router, serve, ActionServer, AppState};
pub use shutdown::shutdown_signal;
