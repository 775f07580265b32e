//! Proposal Master server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use proposal_master::adapters::http::{app_router, ProposalAppState};
use proposal_master::adapters::storage::SessionSweeper;
use proposal_master::adapters::{HttpProviderFactory, InMemoryDraftSessionStore, PdfTextExtractor};
use proposal_master::application::DraftingSettings;
use proposal_master::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let sessions =
        Arc::new(InMemoryDraftSessionStore::new().with_max_sessions(config.server.max_sessions));
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let sweeper = SessionSweeper::new(sessions.clone(), config.server.session_idle());
    let sweeper_task = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

    let state = ProposalAppState::new(
        Arc::new(HttpProviderFactory::new(config.ai.clone())?),
        Arc::new(PdfTextExtractor::new()),
        sessions,
        DraftingSettings::from_config(&config),
    );
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        openai_key = config.ai.has_key(proposal_master::domain::proposal::ProviderKind::OpenAI),
        anthropic_key = config.ai.has_key(proposal_master::domain::proposal::ProviderKind::Anthropic),
        "Proposal Master listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Err(err) = sweeper_task.await {
        tracing::warn!(error = %err, "Session sweeper ended abnormally");
    }
    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over
/// the configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
