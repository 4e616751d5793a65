mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_analytics_requires_token() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/api/analytics/summary").await;

    response.assert_status_unauthorized();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_analytics_with_bearer_token() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .get("/api/analytics/trips-by-company?from=2026-01-01&to=2026-01-31")
        .authorization_bearer(common::VALID_TOKEN)
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["from"], "2026-01-01");
    assert_eq!(json["to"], "2026-01-31");
    assert_eq!(json["data"][0]["label"], "Northwind Cabs");
    assert_eq!(json["data"][0]["share"], 75.0);
    assert_eq!(json["data"][1]["share"], 25.0);
}

#[tokio::test]
async fn test_analytics_with_session_cookie() {
    let (state, _backend) = common::create_test_state();
    let cookie = common::session_cookie(&state);
    let server = common::create_test_server(state);

    let response = server
        .get("/api/analytics/summary")
        .add_header("Cookie", cookie)
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["trips_this_month"], 42);
}

#[tokio::test]
async fn test_analytics_rejects_tampered_cookie() {
    let (state, _backend) = common::create_test_state();
    let cookie = format!("{}tampered", common::session_cookie(&state));
    let server = common::create_test_server(state);

    let response = server
        .get("/api/analytics/summary")
        .add_header("Cookie", cookie)
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_analytics_passes_backend_401_through() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .get("/api/analytics/summary")
        .authorization_bearer("token-revoked")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_trips_over_time_fills_every_day() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .get("/api/analytics/trips-over-time?from=2026-03-01&to=2026-03-07")
        .authorization_bearer(common::VALID_TOKEN)
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 7);
    assert_eq!(data[0]["date"], "2026-03-01");
    assert_eq!(data[0]["value"], 5.0);
    assert_eq!(data[6]["value"], 0.0);
}

#[tokio::test]
async fn test_analytics_rejects_reversed_range() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .get("/api/analytics/trips-by-company?from=2026-02-01&to=2026-01-01")
        .authorization_bearer(common::VALID_TOKEN)
        .await;

    response.assert_status_bad_request();
}
