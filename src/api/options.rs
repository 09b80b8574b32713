/// Dropdown option loaders and credential test
///
/// Editor-facing helpers: list users, records and custom columns as `{ name, value }`
/// entries, and verify the configured API key.

use crate::api::AppState;
use crate::crm::CrmError;
use crate::operations::options::{load_options, OptionEntry, OptionSource};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};

/// Create option loader and credential routes
pub fn create_option_routes() -> Router<AppState> {
    Router::new()
        .route("/api/options/{method}", get(load_option_list))
        .route("/api/credentials/test", get(test_credentials))
}

/// Run a named option loader
///
/// GET /api/options/{method}, e.g. /api/options/loadDealCustomColumnOptions
async fn load_option_list(
    State(state): State<AppState>,
    Path(method): Path<String>,
) -> Result<Json<Vec<OptionEntry>>, (StatusCode, Json<Value>)> {
    let source: OptionSource = method.parse().map_err(|e| {
        tracing::warn!("❌ Unknown option loader requested: {}", method);
        (StatusCode::BAD_REQUEST, Json(json!({ "error": format!("{}", e) })))
    })?;

    let entries = load_options(state.engine.executor().client(), source).await;
    tracing::debug!("📋 Loader {} returned {} option(s)", method, entries.len());
    Ok(Json(entries))
}

/// Verify the API key against the current-user endpoint
///
/// GET /api/credentials/test
async fn test_credentials(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.engine.executor().client().test_credentials().await {
        Ok(user) => {
            tracing::info!("✅ Customermates credentials verified");
            Ok(Json(json!({ "status": "ok", "user": user })))
        }
        Err(e) => {
            tracing::warn!("❌ Credential test failed: {}", e);
            let status = match &e {
                CrmError::Api { status: 401 | 403, .. } => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_GATEWAY,
            };
            let detail = e.server_body().cloned().unwrap_or_else(|| json!(e.to_string()));
            Err((status, Json(json!({ "status": "error", "error": detail }))))
        }
    }
}
