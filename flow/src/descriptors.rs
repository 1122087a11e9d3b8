//! Step descriptors for the buy-router flow.
//!
//! Every builder is a pure function of the settings and the request origin;
//! identical inputs always yield identical descriptors.

use blink_types::{
    AccountAddress, ActionLink, DescriptorError, ParameterSpec, ParameterType, StepDescriptor,
};

use crate::settings::{absolute_url, FlowSettings};

/// Path of the personal-information (collection) step.
pub const COLLECT_PATH: &str = "/api/actions/buy-router-chaining";

/// Path of the router-purchase (transaction) step.
pub const PURCHASE_PATH: &str = "/api/actions/buy-router-chaining/router-purchase";

/// Names of the personal-information fields, in display order.
pub const PERSONAL_FIELDS: [&str; 3] = ["fullName", "email", "country"];

/// Descriptor for the personal-information step.
pub fn collection_descriptor(settings: &FlowSettings, origin: &str) -> StepDescriptor {
    let href = format!(
        "{COLLECT_PATH}?fullName={{fullName}}&email={{email}}&country={{country}}"
    );

    StepDescriptor::new(
        "Provide Personal Information",
        settings.icon_url(origin),
        "Please enter your personal details below before purchasing a router.",
        "Next Step",
    )
    .with_action(
        ActionLink::post("Submit Information", href)
            .with_parameter(
                ParameterSpec::required("fullName", "Full Name")
                    .of_type(ParameterType::Text)
                    .described("Please enter your full name"),
            )
            .with_parameter(
                ParameterSpec::required("email", "Email Address")
                    .of_type(ParameterType::Email)
                    .described("Please enter a valid email address"),
            )
            .with_parameter(
                ParameterSpec::required("country", "Country/Region")
                    .of_type(ParameterType::Text)
                    .described("Please enter your country or region"),
            ),
    )
}

/// Inline descriptor returned after a successful collection step.
///
/// Each preset embeds the quantity and the validated account in its href so
/// the next POST carries all state; nothing is kept server-side.
pub fn router_selection_descriptor(
    settings: &FlowSettings,
    origin: &str,
    account: &AccountAddress,
) -> StepDescriptor {
    let account = account.to_base58();
    settings.presets.iter().fold(
        StepDescriptor::new(
            "Select Your Router",
            settings.icon_url(origin),
            "Select the number of routers you want to buy.",
            "Select Router",
        ),
        |descriptor, &quantity| {
            descriptor.with_action(ActionLink::transaction(
                buy_label(quantity),
                format!("{PURCHASE_PATH}?routers={quantity}&account={account}"),
            ))
        },
    )
}

/// Stand-alone descriptor for the purchase step, reachable without the
/// collection step. Offers the presets plus a free-form quantity.
pub fn router_purchase_descriptor(settings: &FlowSettings, origin: &str) -> StepDescriptor {
    let base_href = absolute_url(origin, PURCHASE_PATH);

    let descriptor = settings.presets.iter().fold(
        StepDescriptor::new(
            "Buy Router - Solana Action",
            settings.icon_url(origin),
            "Select the number of routers to buy",
            "Buy Router",
        ),
        |descriptor, &quantity| {
            descriptor.with_action(ActionLink::transaction(
                buy_label(quantity),
                format!("{base_href}?routers={quantity}"),
            ))
        },
    );

    descriptor.with_action(
        ActionLink::transaction(
            "Buy Custom Number of Routers",
            format!("{base_href}?routers={{routers}}"),
        )
        .with_parameter(ParameterSpec::required("routers", "Enter number of routers")),
    )
}

/// Check every descriptor the flow can emit under `settings`: each href
/// placeholder must be bound by a parameter of its link.
pub fn validate_all(settings: &FlowSettings) -> Result<(), DescriptorError> {
    const ORIGIN: &str = "http://localhost";
    collection_descriptor(settings, ORIGIN).validate(&[])?;
    router_selection_descriptor(settings, ORIGIN, &settings.admin_address()).validate(&[])?;
    router_purchase_descriptor(settings, ORIGIN).validate(&[])
}

fn buy_label(quantity: u64) -> String {
    if quantity == 1 {
        "Buy 1 Router".to_string()
    } else {
        format!("Buy {quantity} Routers")
    }
}
