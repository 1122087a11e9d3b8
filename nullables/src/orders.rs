//! Nullable order API: record orders without sending them.

use async_trait::async_trait;
use blink_orders::{OrderApi, OrderError, OrderReceipt, OrderRequest};
use std::sync::Mutex;
use std::time::Duration;

/// How the next calls should be answered.
#[derive(Clone, Debug)]
enum Behavior {
    Succeed(String),
    Decline,
    Fail(String),
    Stall(Duration),
}

/// A test order API that records requests instead of sending them.
pub struct NullOrderApi {
    /// All orders "created".
    received: Mutex<Vec<OrderRequest>>,
    behavior: Mutex<Behavior>,
}

impl NullOrderApi {
    /// Accept every order with the given id.
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            received: Mutex::new(Vec::new()),
            behavior: Mutex::new(Behavior::Succeed(order_id.into())),
        }
    }

    /// Answer with `success: false`.
    pub fn declining() -> Self {
        let api = Self::default();
        *api.behavior.lock().unwrap() = Behavior::Decline;
        api
    }

    /// Fail every call as unreachable.
    pub fn failing(reason: impl Into<String>) -> Self {
        let api = Self::default();
        *api.behavior.lock().unwrap() = Behavior::Fail(reason.into());
        api
    }

    /// Sleep `delay` before answering successfully.
    pub fn stalling(delay: Duration) -> Self {
        let api = Self::default();
        *api.behavior.lock().unwrap() = Behavior::Stall(delay);
        api
    }

    /// Get all received orders (for assertions).
    pub fn received(&self) -> Vec<OrderRequest> {
        self.received.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    /// Clear recorded orders.
    pub fn reset(&self) {
        self.received.lock().unwrap().clear();
    }
}

impl Default for NullOrderApi {
    fn default() -> Self {
        Self::new("NULL-ORDER-1")
    }
}

#[async_trait]
impl OrderApi for NullOrderApi {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderReceipt, OrderError> {
        self.received.lock().unwrap().push(request.clone());
        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            Behavior::Succeed(order_id) => Ok(OrderReceipt {
                success: true,
                order_id,
            }),
            Behavior::Decline => Ok(OrderReceipt {
                success: false,
                order_id: String::new(),
            }),
            Behavior::Fail(reason) => Err(OrderError::Unreachable(reason)),
            Behavior::Stall(delay) => {
                tokio::time::sleep(delay).await;
                Ok(OrderReceipt {
                    success: true,
                    order_id: "NULL-ORDER-STALLED".to_string(),
                })
            }
        }
    }

    fn name(&self) -> &str {
        "null-orders"
    }
}
