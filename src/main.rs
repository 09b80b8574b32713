/// Customermates nodes server
///
/// Main entry point. Loads configuration from the environment and starts the HTTP server.

use customermates_nodes::{config::Config, server::start_server};

/// Application entry point
///
/// The server provides:
/// - Node execution at /api/nodes/customermates/execute
/// - Webhook intake at /webhook/{trigger_id} and trigger management at /api/triggers
/// - Option loaders at /api/options/{method} and credential test at /api/credentials/test
/// - Health check at /healthz
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (CUSTOMERMATES_* env vars, defaults to 0.0.0.0:3004)
    let config = Config::default();

    start_server(config).await?;

    Ok(())
}
