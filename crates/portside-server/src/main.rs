#![forbid(unsafe_code)]

use std::process;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use portside_server::config::{Cli, ServerConfig};
use portside_server::handler::routes;
use portside_server::service::ServiceState;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

// Tracing target constants
const TRACING_TARGET_STARTUP: &str = "portside_server::startup";
const TRACING_TARGET_SHUTDOWN: &str = "portside_server::shutdown";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting portside server"
    );

    let state = ServiceState::from_config(cli.hasura, cli.role_mapper, cli.warehouse)
        .context("failed to create service state")?;
    let router = routes(state).layer(TraceLayer::new_for_http());

    serve(router, &cli.server).await
}

/// Binds the listener and serves until a shutdown signal arrives.
async fn serve(app: Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.server_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        addr = %addr,
        "Server is ready and listening for connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.shutdown_timeout()))
        .await
        .context("server encountered an error")?;

    tracing::info!(target: TRACING_TARGET_SHUTDOWN, "Server shut down gracefully");
    Ok(())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT/Ctrl+C).
async fn shutdown_signal(shutdown_timeout: Duration) {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(
                target: TRACING_TARGET_SHUTDOWN,
                error = %error,
                "Failed to install Ctrl+C handler"
            );
        } else {
            tracing::info!(
                target: TRACING_TARGET_SHUTDOWN,
                "Received Ctrl+C signal, initiating graceful shutdown"
            );
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!(
                    target: TRACING_TARGET_SHUTDOWN,
                    "Received SIGTERM signal, initiating graceful shutdown"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_SHUTDOWN,
                    error = %error,
                    "Failed to install SIGTERM handler"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        timeout_secs = shutdown_timeout.as_secs(),
        "Waiting for in-flight requests to complete"
    );
}
