//! Order-creation collaborator.
//!
//! The collection step hands validated personal information to an external
//! order (KYC) system and only looks at the success flag and order id it
//! returns. Two implementations:
//! - [`StubOrderApi`]: fixed success after a simulated delay (the default).
//! - [`HttpOrderClient`]: `POST`s the order to a configured endpoint.

pub mod error;
pub mod http;
pub mod stub;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::OrderError;
pub use http::HttpOrderClient;
pub use stub::StubOrderApi;

/// Personal information submitted for one order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub full_name: String,
    pub email: String,
    pub country: String,
    /// Base58 account address.
    pub account: String,
}

/// What the order system reports back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub success: bool,
    #[serde(default)]
    pub order_id: String,
}

/// Creates orders in the downstream system.
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderReceipt, OrderError>;

    /// Human-readable name of this implementation, for logs.
    fn name(&self) -> &str;
}
