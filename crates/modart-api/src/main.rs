//! Modart REST API entry point.
//!
//! Binary name: `modart`
//!
//! Parses configuration, opens the selected storage backend, then serves the
//! authors and articles API until Ctrl+C or SIGTERM.

mod cli;
mod http;
mod state;

use std::sync::Arc;

use clap::Parser;

use modart_infra::crypto::jwt::JwtTokenIssuer;
use modart_observe::tracing_setup::{init_tracing, shutdown_tracing};
use modart_types::config::StorageConfig;

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.tracing_options())
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let storage = cli.storage_config();
    if matches!(storage, StorageConfig::Relational { .. }) && cli.database_url.is_none() {
        tokio::fs::create_dir_all(cli.data_dir()).await?;
    }

    let token_issuer = JwtTokenIssuer::from_env()?;
    let state = AppState::init(&storage, Arc::new(token_issuer), cli.cookie_max_age_secs).await?;

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, backend = %storage.backend(), "modart API listening");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    shutdown_tracing();

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
}
