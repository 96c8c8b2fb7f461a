use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{BackendError, app::App};

/// Open the listening socket. Fails if `addr` is already held by another
/// listener, so two instances never share a port.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, BackendError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| BackendError::Bind { addr, source })
}

/// Serve `app` on `listener` until Ctrl+C or SIGTERM.
pub async fn run(app: App, listener: TcpListener) -> Result<(), BackendError> {
    run_until(app, listener, shutdown_signal()).await
}

/// Serve `app` until `shutdown` resolves, then close the database pool.
pub async fn run_until<F>(
    app: App,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), BackendError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = app.router()?;
    let addr = listener.local_addr()?;
    if app.config().debug {
        warn!("debug mode enabled; error responses are verbose, do not use in production");
    }
    info!("HTTP server listening on {}", addr);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await;

    if let Some(db) = app.database() {
        db.close().await;
    }
    served?;
    info!("server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("received SIGTERM, starting graceful shutdown");
        }
    }
}
