//! Process-wide flow settings: price, administrative address, presets.
//!
//! Loaded once at startup and shared read-only by every request.

use blink_types::{AccountAddress, DescriptorError, Lamports};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Address that receives router payments.
pub const DEFAULT_ADMIN_ADDRESS: &str = "3MKLb89FZvGeLTY8QHAfGevSTkqdmRVAYU97Qc1Roct2";

/// Price of one router in SOL.
pub const DEFAULT_ROUTER_PRICE_SOL: &str = "1.4214";

/// Quantities offered as one-click actions.
pub const DEFAULT_ROUTER_PRESETS: [u64; 3] = [1, 5, 10];

/// Icon path, resolved against the request origin.
pub const DEFAULT_ICON_PATH: &str = "/image.png";

/// Upper bound on the order-creation call.
pub const DEFAULT_ORDER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid admin address {0:?}")]
    AdminAddress(String),

    #[error("invalid router price: {0}")]
    Price(#[from] blink_types::AmountError),

    #[error("router price must be positive")]
    ZeroPrice,

    #[error("at least one router preset is required")]
    NoPresets,

    #[error("router presets must be positive")]
    ZeroPreset,

    #[error("invalid action descriptor: {0}")]
    Descriptor(#[from] DescriptorError),
}

/// Validated runtime settings for the action flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowSettings {
    /// Recipient of every purchase transfer.
    pub admin: Pubkey,
    /// Price of one router.
    pub unit_price: Lamports,
    /// Quantities offered as one-click purchase actions, in display order.
    pub presets: Vec<u64>,
    /// Icon path or absolute URL.
    pub icon_path: String,
    pub order_timeout: Duration,
}

impl FlowSettings {
    /// Validate raw configuration values.
    pub fn new(
        admin_address: &str,
        router_price_sol: &str,
        presets: Vec<u64>,
        icon_path: impl Into<String>,
        order_timeout: Duration,
    ) -> Result<Self, SettingsError> {
        let admin = Pubkey::from_str(admin_address)
            .map_err(|_| SettingsError::AdminAddress(admin_address.to_string()))?;
        let unit_price = Lamports::from_sol_str(router_price_sol)?;
        if unit_price.is_zero() {
            return Err(SettingsError::ZeroPrice);
        }
        if presets.is_empty() {
            return Err(SettingsError::NoPresets);
        }
        if presets.contains(&0) {
            return Err(SettingsError::ZeroPreset);
        }

        let settings = Self {
            admin,
            unit_price,
            presets,
            icon_path: icon_path.into(),
            order_timeout,
        };
        crate::descriptors::validate_all(&settings)?;
        Ok(settings)
    }

    pub fn admin_address(&self) -> AccountAddress {
        AccountAddress::from(self.admin)
    }

    /// Absolute icon URL for a request arriving at `origin`.
    pub fn icon_url(&self, origin: &str) -> String {
        absolute_url(origin, &self.icon_path)
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            admin: Pubkey::from_str(DEFAULT_ADMIN_ADDRESS).unwrap_or_default(),
            unit_price: Lamports::new(1_421_400_000),
            presets: DEFAULT_ROUTER_PRESETS.to_vec(),
            icon_path: DEFAULT_ICON_PATH.to_string(),
            order_timeout: DEFAULT_ORDER_TIMEOUT,
        }
    }
}

/// Resolve `path` against `origin` unless it is already absolute.
pub fn absolute_url(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_validated_constants() {
        let validated = FlowSettings::new(
            DEFAULT_ADMIN_ADDRESS,
            DEFAULT_ROUTER_PRICE_SOL,
            DEFAULT_ROUTER_PRESETS.to_vec(),
            DEFAULT_ICON_PATH,
            DEFAULT_ORDER_TIMEOUT,
        )
        .unwrap();
        assert_eq!(validated, FlowSettings::default());
        assert_eq!(validated.admin_address().to_base58(), DEFAULT_ADMIN_ADDRESS);
    }

    #[test]
    fn rejects_bad_values() {
        let new = |admin: &str, price: &str, presets: Vec<u64>| {
            FlowSettings::new(admin, price, presets, "/i.png", DEFAULT_ORDER_TIMEOUT)
        };
        assert!(matches!(
            new("nope", "1", vec![1]),
            Err(SettingsError::AdminAddress(_))
        ));
        assert!(matches!(
            new(DEFAULT_ADMIN_ADDRESS, "abc", vec![1]),
            Err(SettingsError::Price(_))
        ));
        assert_eq!(
            new(DEFAULT_ADMIN_ADDRESS, "0", vec![1]),
            Err(SettingsError::ZeroPrice)
        );
        assert_eq!(
            new(DEFAULT_ADMIN_ADDRESS, "1", vec![]),
            Err(SettingsError::NoPresets)
        );
        assert_eq!(
            new(DEFAULT_ADMIN_ADDRESS, "1", vec![1, 0]),
            Err(SettingsError::ZeroPreset)
        );
    }

    #[test]
    fn icon_url_resolution() {
        let settings = FlowSettings::default();
        assert_eq!(
            settings.icon_url("https://shop.example"),
            "https://shop.example/image.png"
        );
        assert_eq!(
            settings.icon_url("https://shop.example/"),
            "https://shop.example/image.png"
        );
        assert_eq!(
            absolute_url("http://a", "https://cdn.example/i.png"),
            "https://cdn.example/i.png"
        );
        assert_eq!(absolute_url("http://a", "img/i.png"), "http://a/img/i.png");
    }
}
