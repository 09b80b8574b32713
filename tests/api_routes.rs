use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use customermates_nodes::{
    api::AppState,
    config::CrmConfig,
    crm::CrmClient,
    runtime::{ExecutionEngine, NodeExecutor},
    server::build_router,
    workflow::TriggerRegistry,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Helper to build the app against a mock CRM
fn create_test_state(server: &MockServer) -> AppState {
    let client = CrmClient::new(&CrmConfig::new(server.uri(), "test-key")).unwrap();
    let engine = Arc::new(ExecutionEngine::new(Arc::new(NodeExecutor::new(client))));
    AppState::new(engine, Arc::new(TriggerRegistry::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;
    let app = build_router(create_test_state(&mock_server));

    let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_execute_create_contact() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/contacts"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contact": { "id": "c1", "firstName": "Ada", "lastName": "Lovelace" }
        })))
        .mount(&mock_server)
        .await;
    let app = build_router(create_test_state(&mock_server));

    let (status, body) = send(
        &app,
        "POST",
        "/api/nodes/customermates/execute",
        Some(json!({
            "params": {
                "resource": "contact",
                "operation": "create",
                "firstName": "$json.first",
                "lastName": "Lovelace"
            },
            "items": [{ "first": "Ada" }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "items": [{
                "json": { "id": "c1", "firstName": "Ada", "lastName": "Lovelace" },
                "pairedItem": { "item": 0 }
            }]
        })
    );
}

#[tokio::test]
async fn test_execute_failure_returns_item_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/services/s1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Service not found" })))
        .mount(&mock_server)
        .await;
    let app = build_router(create_test_state(&mock_server));

    let (status, body) = send(
        &app,
        "POST",
        "/api/nodes/customermates/execute",
        Some(json!({
            "params": { "resource": "service", "operation": "delete", "serviceId": "s1" }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["itemIndex"], json!(0));
    assert_eq!(body["description"], json!({ "error": "Service not found" }));
}

#[tokio::test]
async fn test_execute_continue_on_fail_keeps_going() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/services/s1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Service not found" })))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/services/s2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&mock_server)
        .await;
    let app = build_router(create_test_state(&mock_server));

    let (status, body) = send(
        &app,
        "POST",
        "/api/nodes/customermates/execute",
        Some(json!({
            "params": { "resource": "service", "operation": "delete", "serviceId": "$json.id" },
            "items": [{ "id": "s1" }, { "id": "s2" }],
            "continueOnFail": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["items"],
        json!([
            { "json": { "error": { "error": "Service not found" } }, "pairedItem": { "item": 0 } },
            { "json": { "id": { "success": true } }, "pairedItem": { "item": 1 } }
        ])
    );
}

#[tokio::test]
async fn test_webhook_trigger_lifecycle() {
    let mock_server = MockServer::start().await;
    let state = create_test_state(&mock_server);
    let mut deliveries = state.deliveries.subscribe();
    let app = build_router(state);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/triggers/crm-events",
        Some(json!({ "events": ["contact.created", "deal.updated"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!("crm-events"));

    let (status, body) = send(
        &app,
        "POST",
        "/webhook/crm-events",
        Some(json!({
            "event": "deal.updated",
            "data": { "id": "d1", "name": "Renewal" },
            "timestamp": "2026-03-01T09:30:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "json": {
                "event": "deal.updated",
                "data": { "id": "d1", "name": "Renewal" },
                "timestamp": "2026-03-01T09:30:00Z"
            }
        }])
    );

    let delivery = deliveries.try_recv().unwrap();
    assert_eq!(delivery.trigger_id, "crm-events");
    assert_eq!(delivery.items.len(), 1);

    // Events outside the allow-list produce no output
    let (status, body) = send(
        &app,
        "POST",
        "/webhook/crm-events",
        Some(json!({ "event": "task.deleted", "data": { "id": "t1" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert!(deliveries.try_recv().is_err());

    let (status, body) = send(&app, "GET", "/api/triggers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["triggers"]["crm-events"]["events"],
        json!(["contact.created", "deal.updated"])
    );

    let (status, _) = send(&app, "DELETE", "/api/triggers/crm-events", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", "/api/triggers/crm-events", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_webhook_rejects_unknown_trigger_and_bad_body() {
    let mock_server = MockServer::start().await;
    let app = build_router(create_test_state(&mock_server));

    let (status, _) = send(
        &app,
        "POST",
        "/webhook/missing",
        Some(json!({ "event": "contact.created" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Unknown trigger wins over a malformed body
    let request = Request::builder()
        .uri("/webhook/missing")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/triggers/crm-events",
        Some(json!({ "events": ["contact.created"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder()
        .uri("/webhook/crm-events")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_trigger_rejects_unknown_event() {
    let mock_server = MockServer::start().await;
    let app = build_router(create_test_state(&mock_server));

    let (status, _) = send(
        &app,
        "PUT",
        "/api/triggers/crm-events",
        Some(json!({ "events": ["invoice.created"] })),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_credentials_endpoint() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "u1", "email": "ada@example.com" })))
        .mount(&mock_server)
        .await;
    let app = build_router(create_test_state(&mock_server));

    let (status, body) = send(&app, "GET", "/api/credentials/test", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["user"]["id"], json!("u1"));
}

#[tokio::test]
async fn test_credentials_endpoint_rejected_key() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid API key" })))
        .mount(&mock_server)
        .await;
    let app = build_router(create_test_state(&mock_server));

    let (status, body) = send(&app, "GET", "/api/credentials/test", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!({ "error": "Invalid API key" }));
}

#[tokio::test]
async fn test_unknown_option_loader() {
    let mock_server = MockServer::start().await;
    let app = build_router(create_test_state(&mock_server));

    let (status, body) = send(&app, "GET", "/api/options/loadInvoiceOptions", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("loadInvoiceOptions"));
}

#[tokio::test]
async fn test_option_loader_swallows_crm_errors() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/deals/configuration"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    let app = build_router(create_test_state(&mock_server));

    let (status, body) = send(&app, "GET", "/api/options/loadDealCustomColumnOptions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
