//! Main entry point for the SSO gate.
//!
//! Loads configuration, initializes logging, connects the upstream adapter and
//! serves the router until Ctrl-C or SIGTERM.

use std::sync::Arc;

use adapters::HttpIdentityProvider;
use backend::{app, logging, AppState, Config};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.log_filter, config.log_format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.addr(),
        upstream = %config.upstream_url,
        env = %config.app_env,
        "Starting SSO gate"
    );

    let provider =
        match HttpIdentityProvider::with_timeout(&config.upstream_url, config.upstream_timeout) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create upstream client");
                std::process::exit(1);
            }
        };

    let addr = config.addr();
    let state = AppState::new(config, Arc::new(provider));

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };
    info!(%addr, "listening");

    if let Err(e) = axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
