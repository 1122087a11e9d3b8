//! Stand-in order system: always succeeds after a fixed delay.

use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use crate::{OrderApi, OrderError, OrderReceipt, OrderRequest};

/// Delay the stub waits before answering.
pub const DEFAULT_STUB_DELAY: Duration = Duration::from_secs(1);

/// Order id returned for every stubbed order.
pub const STUB_ORDER_ID: &str = "1234ABC";

pub struct StubOrderApi {
    delay: Duration,
}

impl StubOrderApi {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for StubOrderApi {
    fn default() -> Self {
        Self::new(DEFAULT_STUB_DELAY)
    }
}

#[async_trait]
impl OrderApi for StubOrderApi {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderReceipt, OrderError> {
        info!(
            account = %request.account,
            country = %request.country,
            "creating stub order"
        );
        tokio::time::sleep(self.delay).await;
        Ok(OrderReceipt {
            success: true,
            order_id: STUB_ORDER_ID.to_string(),
        })
    }

    fn name(&self) -> &str {
        "stub"
    }
}
