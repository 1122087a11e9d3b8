//! Collection step: validate personal information, create the order, chain
//! into router selection.

use blink_orders::{OrderApi, OrderError, OrderRequest};
use blink_types::{
    AccountAddress, ActionError, PostRequest, ResultEnvelope, Submission, UpstreamService,
};
use std::collections::HashMap;
use tracing::info;

use crate::descriptors::{router_selection_descriptor, PERSONAL_FIELDS};
use crate::settings::FlowSettings;

/// Confirmation returned with the router-selection descriptor.
pub const COLLECTED_MESSAGE: &str =
    "KYC information submitted successfully. Please proceed to select your router.";

/// Validated personal information.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub country: String,
}

impl PersonalInfo {
    /// All three fields must be present and non-empty. Only presence is checked.
    pub fn from_submission(submission: &Submission) -> Result<Self, ActionError> {
        let [full_name, email, country] = PERSONAL_FIELDS.map(|name| submission.field(name));
        match (full_name, email, country) {
            (Some(full_name), Some(email), Some(country)) => Ok(Self {
                full_name: full_name.to_string(),
                email: email.to_string(),
                country: country.to_string(),
            }),
            _ => {
                let missing = PERSONAL_FIELDS
                    .into_iter()
                    .find(|name| submission.field(name).is_none())
                    .unwrap_or(PERSONAL_FIELDS[0]);
                Err(ActionError::MissingField(missing))
            }
        }
    }
}

/// Run the collection step.
///
/// Validation happens before the order call; a request that fails validation
/// never reaches `orders`.
pub async fn collect(
    settings: &FlowSettings,
    orders: &dyn OrderApi,
    origin: &str,
    request: &PostRequest,
    query: &HashMap<String, String>,
) -> Result<ResultEnvelope, ActionError> {
    let submission = Submission::normalize(request, query, &PERSONAL_FIELDS);
    let info = PersonalInfo::from_submission(&submission)?;
    let account = AccountAddress::parse(&submission.account)?;

    let order = OrderRequest {
        full_name: info.full_name,
        email: info.email,
        country: info.country,
        account: account.to_base58(),
    };

    let receipt = tokio::time::timeout(settings.order_timeout, orders.create_order(&order))
        .await
        .map_err(|_| ActionError::UpstreamTimeout {
            service: UpstreamService::OrderApi,
        })??;

    if !receipt.success {
        return Err(OrderError::Rejected(format!(
            "order system reported failure (order id {:?})",
            receipt.order_id
        ))
        .into());
    }

    info!(
        %account,
        order_id = %receipt.order_id,
        backend = orders.name(),
        "order created"
    );

    Ok(ResultEnvelope::chained(
        COLLECTED_MESSAGE,
        router_selection_descriptor(settings, origin, &account),
    ))
}
