//! Transaction-building step: turn a quantity and an account into an
//! unsigned transfer to the administrative address.

use blink_ledger::{build_transfer, encode_transaction, LedgerClient};
use blink_types::{AccountAddress, ActionError, Lamports, PostRequest, ResultEnvelope};
use serde::Deserialize;
use tracing::{info, warn};

use crate::settings::FlowSettings;

/// Query string of a purchase POST.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PurchaseQuery {
    pub routers: Option<String>,
    /// Echo of the account embedded by the selection step. Informational:
    /// the body's account is authoritative.
    pub account: Option<String>,
}

/// Parse the requested router count; must be an integer greater than zero.
pub fn parse_quantity(raw: Option<&str>) -> Result<u64, ActionError> {
    let raw = raw.unwrap_or_default();
    match raw.trim().parse::<u64>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(ActionError::InvalidQuantity(raw.to_string())),
    }
}

/// Total price of `quantity` routers, exact in lamports.
pub fn purchase_total(unit_price: Lamports, quantity: u64) -> Result<Lamports, ActionError> {
    unit_price
        .checked_mul(quantity)
        .ok_or_else(|| ActionError::InvalidQuantity(format!("{quantity} overflows the total")))
}

/// Confirmation shown by the wallet alongside the transaction.
pub fn purchase_message(quantity: u64, total: Lamports) -> String {
    format!(
        "Purchased {quantity} routers for {} SOL!",
        total.to_sol_string()
    )
}

/// Run the purchase step.
///
/// Quantity and account are validated before the ledger is contacted.
pub async fn purchase(
    settings: &FlowSettings,
    ledger: &dyn LedgerClient,
    query: &PurchaseQuery,
    request: &PostRequest,
) -> Result<ResultEnvelope, ActionError> {
    let quantity = parse_quantity(query.routers.as_deref())?;
    let account = AccountAddress::parse(request.account.as_deref().unwrap_or_default())?;
    let total = purchase_total(settings.unit_price, quantity)?;

    if let Some(echoed) = query.account.as_deref() {
        if echoed != account.to_base58() {
            warn!(%account, echoed, "query account differs from body account; using body");
        }
    }

    let latest = ledger.latest_blockhash().await?;
    let tx = build_transfer(&account, &settings.admin, total, latest.blockhash);
    let encoded = encode_transaction(&tx)?;

    info!(
        %account,
        quantity,
        lamports = total.raw(),
        blockhash = %latest.blockhash,
        "built purchase transaction"
    );

    Ok(ResultEnvelope::transaction(
        encoded,
        purchase_message(quantity, total),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn quantity_must_be_a_positive_integer() {
        assert_eq!(parse_quantity(Some("5")).unwrap(), 5);
        assert_eq!(parse_quantity(Some(" 10 ")).unwrap(), 10);
        assert_eq!(parse_quantity(Some("+5")).unwrap(), 5);
        for raw in [None, Some(""), Some("0"), Some("-1"), Some("abc"), Some("1.5"), Some("5abc")] {
            assert!(
                matches!(parse_quantity(raw), Err(ActionError::InvalidQuantity(_))),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn five_routers_cost_7_107_sol() {
        let total = purchase_total(Lamports::new(1_421_400_000), 5).unwrap();
        assert_eq!(total.raw(), 7_107_000_000);
        assert_eq!(purchase_message(5, total), "Purchased 5 routers for 7.107 SOL!");
    }

    #[test]
    fn overflowing_quantity_is_rejected() {
        assert!(matches!(
            purchase_total(Lamports::new(1_421_400_000), u64::MAX),
            Err(ActionError::InvalidQuantity(_))
        ));
    }

    proptest! {
        /// The transfer amount is exactly routers * 1.4214 SOL in lamports.
        #[test]
        fn total_is_exact_multiple(routers in 1u64..12_000_000_000) {
            let total = purchase_total(Lamports::new(1_421_400_000), routers).unwrap();
            prop_assert_eq!(total.raw(), routers * 1_421_400_000);
        }
    }
}
