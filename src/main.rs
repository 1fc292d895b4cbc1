//! round-ledger server entry point.
//!
//! Loads configuration, selects the round store, and starts the Axum
//! HTTP server.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use round_ledger::api;
use round_ledger::app_state::AppState;
use round_ledger::config::{LedgerConfig, LogFormat};
use round_ledger::persistence::{MemoryRoundStore, PostgresRoundStore, RoundStore};
use round_ledger::service::RoundService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = LedgerConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, "starting round-ledger");

    // Build persistence layer
    let store = build_store(&config).await?;

    // Build service layer and application state
    let round_service = Arc::new(RoundService::new(store));
    let app_state = AppState::new(round_service, config.locale);

    // Build router
    let app = api::build_app(app_state, &config).context("building router")?;

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

/// Picks PostgreSQL or the in-memory store.
///
/// The PostgreSQL pool connects lazily. A failed migration at startup is
/// logged rather than fatal so the process still answers `/health` while
/// the database is unreachable.
async fn build_store(config: &LedgerConfig) -> anyhow::Result<Arc<dyn RoundStore>> {
    if !config.persistence_enabled {
        tracing::warn!("persistence disabled; rounds are kept in memory only");
        return Ok(Arc::new(MemoryRoundStore::new()));
    }

    let store = PostgresRoundStore::connect_lazy(config).context("configuring database pool")?;
    match store.migrate().await {
        Ok(()) => tracing::info!("database migrations applied"),
        Err(e) => tracing::error!(error = %e, "database migrations failed"),
    }
    Ok(Arc::new(store))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
