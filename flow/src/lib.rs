//! The buy-router action flow.
//!
//! Two chained steps, each a pure function of its request:
//! 1. **Collection**: `GET` describes the personal-information form; `POST`
//!    validates it, creates an order, and answers with the router-selection
//!    descriptor inline.
//! 2. **Purchase**: `POST` with a quantity returns an unsigned transfer
//!    transaction for the wallet to sign.
//!
//! No session state exists between steps; everything the purchase step needs
//! travels in its URL and body.

pub mod collect;
pub mod descriptors;
pub mod flow;
pub mod purchase;
pub mod settings;

pub use collect::{PersonalInfo, COLLECTED_MESSAGE};
pub use descriptors::{COLLECT_PATH, PURCHASE_PATH};
pub use flow::ActionFlow;
pub use purchase::PurchaseQuery;
pub use settings::{FlowSettings, SettingsError};
