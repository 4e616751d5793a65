mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["backend"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_backend_down() {
    let (state, backend) = common::create_test_state();
    backend.set_healthy(false);
    let server = common::create_test_server(state);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["backend"]["status"], "error");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("backend").is_some());
    assert!(json["checks"].get("cache").is_some());
}
