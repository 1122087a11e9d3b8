//! Signal-driven shutdown for the daemon.

use tokio::signal;
use tracing::{info, warn};

/// Resolves on the first SIGINT or SIGTERM.
///
/// Hand it to [`ActionServer::start`](crate::ActionServer::start); in-flight
/// requests finish before the server returns.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to listen for SIGINT: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, draining requests"),
        _ = terminate => info!("received SIGTERM, draining requests"),
    }
}
