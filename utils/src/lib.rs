//! Shared utilities for the buy-router action service.

pub mod logging;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
