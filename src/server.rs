/// Server setup and initialization
///
/// Wires together all components: CRM client, trigger registry, execution engine, and HTTP routes.
/// Provides the main application factory function for creating the Axum app.

use crate::{
    api::{create_node_routes, create_option_routes, create_webhook_routes, AppState},
    config::Config,
    crm::CrmClient,
    runtime::{ExecutionEngine, NodeExecutor},
    workflow::TriggerRegistry,
};
use anyhow::Result;
use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Create the main Axum application with all routes
///
/// Builds the CRM client from configuration and wires it into a fresh application state.
pub async fn create_app(config: Config) -> Result<Router> {
    tracing::info!("🔌 Initializing Customermates client for {}", config.crm.base_url);
    if config.crm.api_key.is_empty() {
        tracing::warn!("⚠️ CUSTOMERMATES_API_KEY is not set, API calls will be rejected");
    }
    let client = CrmClient::new(&config.crm)
        .map_err(|e| anyhow::anyhow!("Failed to initialize Customermates client: {}", e))?;

    tracing::info!("🚀 Initializing execution engine");
    let executor = Arc::new(NodeExecutor::new(client));
    let engine = Arc::new(ExecutionEngine::new(executor));

    tracing::info!("📊 Initializing webhook trigger registry");
    let registry = Arc::new(TriggerRegistry::new());

    let app = build_router(AppState::new(engine, registry));
    tracing::info!("✅ Application initialized successfully");

    Ok(app)
}

/// Assemble the router over an existing state
pub fn build_router(state: AppState) -> Router {
    tracing::info!("📡 Creating HTTP router with all endpoints");
    Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))
        // Action node execution
        .merge(create_node_routes())
        // Option loaders and credential test
        .merge(create_option_routes())
        // Webhook intake and trigger management
        .merge(create_webhook_routes())
        .with_state(state)
}

/// Start the HTTP server with the given configuration
///
/// Creates the application and starts the Axum server on the configured address and port.
pub async fn start_server(config: Config) -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting Customermates node server...");

    let app = create_app(config.clone()).await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
