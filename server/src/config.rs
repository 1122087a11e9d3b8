//! Service configuration with TOML file support.

use axum::http::HeaderValue;
use blink_flow::settings::{
    DEFAULT_ADMIN_ADDRESS, DEFAULT_ICON_PATH, DEFAULT_ROUTER_PRESETS, DEFAULT_ROUTER_PRICE_SOL,
};
use blink_flow::{FlowSettings, SettingsError};
use blink_ledger::DEFAULT_RPC_URL;
use blink_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid bind address {0:?}")]
    BindAddress(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("{name} is not a valid header value: {value:?}")]
    HeaderValue { name: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Configuration for the action service.
///
/// Loaded from a TOML file via [`ServiceConfig::from_toml_file`] or built
/// programmatically (e.g. for tests). Every key is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Interface to listen on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin used for absolute URLs in descriptors. When unset the origin
    /// is derived from the request's `Host` header. Set this in production.
    #[serde(default)]
    pub public_base_url: Option<String>,

    /// Honour `X-Forwarded-Proto` / `X-Forwarded-Host` when deriving the
    /// origin. Only enable behind a proxy that overwrites both headers.
    #[serde(default)]
    pub trust_forwarded_headers: bool,

    /// Ledger JSON-RPC endpoint.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Recipient of purchase transfers (base58).
    #[serde(default = "default_admin_address")]
    pub admin_address: String,

    /// Price of one router as a decimal SOL string.
    #[serde(default = "default_router_price_sol")]
    pub router_price_sol: String,

    #[serde(default = "default_router_presets")]
    pub router_presets: Vec<u64>,

    /// Downstream order endpoint. The built-in stub is used when unset.
    #[serde(default)]
    pub order_api_url: Option<String>,

    #[serde(default = "default_order_timeout_secs")]
    pub order_timeout_secs: u64,

    #[serde(default = "default_ledger_timeout_secs")]
    pub ledger_timeout_secs: u64,

    /// Artificial latency of the stub order API.
    #[serde(default = "default_stub_order_delay_ms")]
    pub stub_order_delay_ms: u64,

    #[serde(default = "default_icon_path")]
    pub icon_path: String,

    /// Value of the `X-Action-Version` header.
    #[serde(default = "default_action_version")]
    pub action_version: String,

    /// Value of the `X-Blockchain-Ids` header.
    #[serde(default = "default_blockchain_id")]
    pub blockchain_id: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_admin_address() -> String {
    DEFAULT_ADMIN_ADDRESS.to_string()
}

fn default_router_price_sol() -> String {
    DEFAULT_ROUTER_PRICE_SOL.to_string()
}

fn default_router_presets() -> Vec<u64> {
    DEFAULT_ROUTER_PRESETS.to_vec()
}

fn default_order_timeout_secs() -> u64 {
    10
}

fn default_ledger_timeout_secs() -> u64 {
    10
}

fn default_stub_order_delay_ms() -> u64 {
    1_000
}

fn default_icon_path() -> String {
    DEFAULT_ICON_PATH.to_string()
}

fn default_action_version() -> String {
    "2.1.3".to_string()
}

fn default_blockchain_id() -> String {
    // Devnet genesis hash.
    "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|_| ConfigError::BindAddress(self.bind_address.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Validate the flow-related keys into runtime settings.
    pub fn flow_settings(&self) -> Result<FlowSettings, ConfigError> {
        if self.order_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("order_timeout_secs"));
        }
        Ok(FlowSettings::new(
            &self.admin_address,
            &self.router_price_sol,
            self.router_presets.clone(),
            self.icon_path.clone(),
            Duration::from_secs(self.order_timeout_secs),
        )?)
    }

    pub fn ledger_timeout(&self) -> Result<Duration, ConfigError> {
        match self.ledger_timeout_secs {
            0 => Err(ConfigError::ZeroTimeout("ledger_timeout_secs")),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    pub fn stub_order_delay(&self) -> Duration {
        Duration::from_millis(self.stub_order_delay_ms)
    }

    /// Protocol headers attached to every action response.
    pub fn action_headers(&self) -> Result<ActionHeaders, ConfigError> {
        Ok(ActionHeaders {
            action_version: header_value("action_version", &self.action_version)?,
            blockchain_ids: header_value("blockchain_id", &self.blockchain_id)?,
        })
    }

    /// Normalised public origin, if configured.
    pub fn public_origin(&self) -> Option<String> {
        self.public_base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            public_base_url: None,
            trust_forwarded_headers: false,
            rpc_url: default_rpc_url(),
            admin_address: default_admin_address(),
            router_price_sol: default_router_price_sol(),
            router_presets: default_router_presets(),
            order_api_url: None,
            order_timeout_secs: default_order_timeout_secs(),
            ledger_timeout_secs: default_ledger_timeout_secs(),
            stub_order_delay_ms: default_stub_order_delay_ms(),
            icon_path: default_icon_path(),
            action_version: default_action_version(),
            blockchain_id: default_blockchain_id(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

/// Validated values for the `X-Action-Version` and `X-Blockchain-Ids` headers.
#[derive(Clone, Debug)]
pub struct ActionHeaders {
    pub action_version: HeaderValue,
    pub blockchain_ids: HeaderValue,
}

impl Default for ActionHeaders {
    fn default() -> Self {
        Self {
            action_version: HeaderValue::from_static("2.1.3"),
            blockchain_ids: HeaderValue::from_static("solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1"),
        }
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|_| ConfigError::HeaderValue {
        name,
        value: value.to_string(),
    })
}
