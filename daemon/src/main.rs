//! Buy-router action daemon: serves the two-step Solana Action over HTTP.

use anyhow::Context;
use blink_flow::ActionFlow;
use blink_ledger::{LedgerClient, RpcLedgerClient};
use blink_orders::{HttpOrderClient, OrderApi, StubOrderApi};
use blink_server::{shutdown_signal, ActionServer, ServiceConfig};
use blink_utils::LogFormat;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "blink-daemon", about = "Buy-router Solana Action server")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "BLINK_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to listen on.
    #[arg(long, env = "BLINK_BIND_ADDRESS")]
    bind_address: Option<String>,

    /// HTTP port.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Public origin used in descriptor URLs (e.g. "https://shop.example").
    #[arg(long, env = "BLINK_PUBLIC_BASE_URL")]
    public_base_url: Option<String>,

    /// Honour X-Forwarded-Proto/Host (only behind a proxy that sets them).
    #[arg(long, env = "BLINK_TRUST_FORWARDED_HEADERS")]
    trust_forwarded_headers: bool,

    /// Ledger JSON-RPC endpoint.
    #[arg(long, env = "SOLANA_RPC")]
    rpc_url: Option<String>,

    /// Recipient of purchase transfers (base58).
    #[arg(long, env = "BLINK_ADMIN_ADDRESS")]
    admin_address: Option<String>,

    /// Price of one router in SOL (decimal, at most 9 fractional digits).
    #[arg(long, env = "BLINK_ROUTER_PRICE_SOL")]
    router_price_sol: Option<String>,

    /// Preset quantities (comma-separated: "1,5,10").
    #[arg(long, env = "BLINK_ROUTER_PRESETS", value_delimiter = ',')]
    router_presets: Vec<u64>,

    /// Downstream order endpoint; the built-in stub is used when unset.
    #[arg(long, env = "BLINK_ORDER_API_URL")]
    order_api_url: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BLINK_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BLINK_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Run the action server (default).
    Serve,
    /// Print the effective configuration as TOML and exit.
    Config,
}

impl Cli {
    /// Overlay every flag that was given onto `base`.
    fn merge_into(self, base: ServiceConfig) -> ServiceConfig {
        ServiceConfig {
            bind_address: self.bind_address.unwrap_or(base.bind_address),
            port: self.port.unwrap_or(base.port),
            public_base_url: self.public_base_url.or(base.public_base_url),
            trust_forwarded_headers: self.trust_forwarded_headers || base.trust_forwarded_headers,
            rpc_url: self.rpc_url.unwrap_or(base.rpc_url),
            admin_address: self.admin_address.unwrap_or(base.admin_address),
            router_price_sol: self.router_price_sol.unwrap_or(base.router_price_sol),
            router_presets: if self.router_presets.is_empty() {
                base.router_presets
            } else {
                self.router_presets
            },
            order_api_url: self.order_api_url.or(base.order_api_url),
            log_format: self.log_format.unwrap_or(base.log_format),
            log_level: self.log_level.unwrap_or(base.log_level),
            ..base
        }
    }
}

fn order_api(config: &ServiceConfig) -> anyhow::Result<Arc<dyn OrderApi>> {
    let timeout = std::time::Duration::from_secs(config.order_timeout_secs);
    Ok(match &config.order_api_url {
        Some(url) => Arc::new(
            HttpOrderClient::with_timeout(url.clone(), timeout)
                .context("failed to build order API client")?,
        ),
        None => Arc::new(StubOrderApi::new(config.stub_order_delay())),
    })
}

fn ledger(config: &ServiceConfig) -> anyhow::Result<Arc<dyn LedgerClient>> {
    let client = RpcLedgerClient::with_timeout(config.rpc_url.clone(), config.ledger_timeout()?)
        .context("failed to build ledger RPC client")?;
    Ok(Arc::new(client))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => ServiceConfig::from_toml_file(path)?,
        None => ServiceConfig::default(),
    };
    let command = cli.command.take().unwrap_or(Command::Serve);
    let config_path = cli.config.clone();
    let config = cli.merge_into(base);

    if command == Command::Config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    blink_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = config_path {
        tracing::info!("Loaded config from {}", path.display());
    }

    let settings = config.flow_settings()?;
    let orders = order_api(&config)?;
    let ledger = ledger(&config)?;
    tracing::info!(
        admin = %settings.admin,
        price_lamports = settings.unit_price.raw(),
        presets = ?settings.presets,
        orders = orders.name(),
        ledger = ledger.name(),
        rpc_url = %config.rpc_url,
        "starting buy-router action server"
    );

    let flow = ActionFlow::new(settings, orders, ledger);
    let server = ActionServer::new(&config, flow)?;

    server.start(shutdown_signal()).await?;

    tracing::info!("blink daemon exited cleanly");
    Ok(())
}
