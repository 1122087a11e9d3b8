//! Axum-based action server.

use axum::routing::get;
use axum::Router;
use blink_flow::{ActionFlow, COLLECT_PATH, PURCHASE_PATH};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{ActionHeaders, ServiceConfig};
use crate::error::ServerError;
use crate::handlers;
use crate::headers::with_action_headers;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub flow: ActionFlow,
    /// Overrides request-derived origins when set.
    pub public_origin: Option<Arc<str>>,
    /// Whether `X-Forwarded-*` may shape request-derived origins.
    pub trust_forwarded_headers: bool,
}

impl AppState {
    pub fn new(flow: ActionFlow, public_origin: Option<String>) -> Self {
        Self {
            flow,
            public_origin: public_origin.map(Arc::from),
            trust_forwarded_headers: false,
        }
    }

    pub fn trusting_forwarded_headers(mut self, trust: bool) -> Self {
        self.trust_forwarded_headers = trust;
        self
    }
}

/// Build the full route table with shared headers and request tracing.
pub fn router(state: AppState, headers: &ActionHeaders) -> Router {
    let routes = Router::new()
        .route(
            COLLECT_PATH,
            get(handlers::describe_collection)
                .options(handlers::preflight)
                .post(handlers::submit_collection),
        )
        .route(
            PURCHASE_PATH,
            get(handlers::describe_purchase)
                .options(handlers::preflight)
                .post(handlers::submit_purchase),
        )
        .route("/health", get(handlers::health))
        .with_state(state);

    with_action_headers(routes, headers).layer(TraceLayer::new_for_http())
}

pub struct ActionServer {
    addr: SocketAddr,
    app: Router,
}

impl ActionServer {
    pub fn new(config: &ServiceConfig, flow: ActionFlow) -> Result<Self, ServerError> {
        let state = AppState::new(flow, config.public_origin())
            .trusting_forwarded_headers(config.trust_forwarded_headers);
        Ok(Self {
            addr: config.socket_addr()?,
            app: router(state, &config.action_headers()?),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Bind the configured address and serve until `shutdown` fires.
    pub async fn start<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.addr.to_string(),
                source,
            })?;
        serve(listener, self.app, shutdown).await
    }
}

/// Serve `app` on an already-bound listener until `shutdown` fires.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(addr = %listener.local_addr()?, "action server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("action server stopped");
    Ok(())
}
