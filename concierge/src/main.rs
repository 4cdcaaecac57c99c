use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use concierge::api::{create_router, AppState};
use concierge::config::Config;
use concierge::db::{InMemoryStorage, StorageBackend};
use concierge::intelligence::SpecialistRegistry;
use concierge::llm::LlmProvider;

#[derive(Parser)]
#[command(name = "concierge")]
#[command(about = "Health concierge chat service with specialist routing")]
struct Args {
    /// Overrides CONCIERGE_HOST
    #[arg(long)]
    host: Option<String>,

    /// Overrides CONCIERGE_PORT
    #[arg(long)]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long, env = "CONCIERGE_LOG_JSON")]
    log_json: bool,

    /// Start with empty storage instead of the demo member and history
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "concierge=info,tower_http=debug".into());
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let registry = Arc::new(SpecialistRegistry::standard()?);
    tracing::info!(specialists = registry.all().len(), "Specialist registry loaded");

    let storage: Arc<dyn StorageBackend> = if args.no_seed {
        Arc::new(InMemoryStorage::new())
    } else {
        tracing::info!("Seeding demo member and conversation history");
        Arc::new(InMemoryStorage::seeded())
    };

    if let Some(llm_config) = &config.llm {
        tracing::info!("Initializing LLM provider: {}...", llm_config.model);
    }
    let llm = LlmProvider::new(config.llm.as_ref());
    if !llm.is_available() {
        tracing::warn!("LLM unavailable - chat will answer with fallback responses");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, storage, registry, llm);
    let app = create_router(state);

    tracing::info!("Concierge starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
