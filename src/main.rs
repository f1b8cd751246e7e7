use airwatch::agent::AgentService;
use airwatch::api::{
    catch_panic_layer, create_agent_router, create_fixture_router, AgentAppState, FixtureAppState,
};
use airwatch::config::{load_config, AirwatchConfig};
use airwatch::fixtures::FixtureStore;
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airwatch=info,tower_http=info".into()),
        )
        .init();

    info!("Airwatch starting...");

    let config = match std::env::var("AIRWATCH_CONFIG") {
        Ok(path) => load_config(&path)
            .map_err(|e| anyhow!("Failed to load config from {}: {}", path, e))?,
        Err(_) => AirwatchConfig::default(),
    }
    .apply_env();

    info!(
        bind_addr = %config.server.bind_addr,
        simulated_latency_ms = config.agent.simulated_latency_ms,
        fixtures = ?config.fixtures.path,
        "Configuration loaded"
    );

    // Fixture store is loaded once and never mutated
    let store = match &config.fixtures.path {
        Some(path) => FixtureStore::load(path),
        None => FixtureStore::embedded(),
    }
    .context("Failed to load fixture dataset")?;
    let store = Arc::new(store);
    info!(features = store.len(), "Fixture store ready");

    let agent = Arc::new(AgentService::new(
        Arc::clone(&store),
        config.agent.simulated_latency(),
    ));

    let app = create_agent_router(AgentAppState { agent })
        .merge(create_fixture_router(Arc::new(FixtureAppState {
            store: Arc::clone(&store),
        })))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    info!(addr = %config.server.bind_addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Airwatch stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl_c signal");
    }
    info!("Shutdown signal received");
}
