//! The assembled flow: settings plus both collaborators.

use blink_ledger::LedgerClient;
use blink_orders::OrderApi;
use blink_types::{ActionError, PostRequest, ResultEnvelope, StepDescriptor};
use std::collections::HashMap;
use std::sync::Arc;

use crate::purchase::PurchaseQuery;
use crate::settings::FlowSettings;
use crate::{collect, descriptors, purchase};

/// Stateless entry point for every step of the buy-router flow.
///
/// Cheap to clone; all fields are shared read-only.
#[derive(Clone)]
pub struct ActionFlow {
    settings: Arc<FlowSettings>,
    orders: Arc<dyn OrderApi>,
    ledger: Arc<dyn LedgerClient>,
}

impl ActionFlow {
    pub fn new(
        settings: FlowSettings,
        orders: Arc<dyn OrderApi>,
        ledger: Arc<dyn LedgerClient>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            orders,
            ledger,
        }
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// GET on the collection step.
    pub fn describe_collection(&self, origin: &str) -> StepDescriptor {
        descriptors::collection_descriptor(&self.settings, origin)
    }

    /// GET on the purchase step.
    pub fn describe_purchase(&self, origin: &str) -> StepDescriptor {
        descriptors::router_purchase_descriptor(&self.settings, origin)
    }

    /// POST on the collection step.
    pub async fn collect(
        &self,
        origin: &str,
        request: &PostRequest,
        query: &HashMap<String, String>,
    ) -> Result<ResultEnvelope, ActionError> {
        collect::collect(&self.settings, self.orders.as_ref(), origin, request, query).await
    }

    /// POST on the purchase step.
    pub async fn purchase(
        &self,
        query: &PurchaseQuery,
        request: &PostRequest,
    ) -> Result<ResultEnvelope, ActionError> {
        purchase::purchase(&self.settings, self.ledger.as_ref(), query, request).await
    }
}
