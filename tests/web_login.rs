mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_login_page_renders() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/dashboard/login").await;

    response.assert_status_ok();
    assert!(response.text().contains("action=\"/dashboard/login\""));
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/dashboard/login")
        .form(&[("email", common::ADMIN_EMAIL), ("password", common::ADMIN_PASSWORD)])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/dashboard");

    let cookie = response.header("set-cookie");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("fleet_session="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_normalizes_email() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/dashboard/login")
        .form(&[("email", "  Admin@Fleet.Test "), ("password", common::ADMIN_PASSWORD)])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/dashboard/login")
        .form(&[("email", common::ADMIN_EMAIL), ("password", "wrong")])
        .await;

    response.assert_status_unauthorized();
    let body = response.text();
    assert!(body.contains("Invalid email or password"));
    assert!(body.contains(common::ADMIN_EMAIL));
}

#[tokio::test]
async fn test_login_invalid_email() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/dashboard/login")
        .form(&[("email", "not-an-email"), ("password", "x")])
        .await;

    response.assert_status_bad_request();
    assert!(response.text().contains("Enter a valid email address"));
}

#[tokio::test]
async fn test_protected_page_redirects_without_session() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/dashboard/drivers").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/dashboard/login");
}

#[tokio::test]
async fn test_expired_backend_session_redirects_to_login() {
    let (state, _backend) = common::create_test_state();
    let cookie = common::expired_session_cookie(&state);
    let server = common::create_test_server(state);

    let response = server
        .get("/dashboard/drivers")
        .add_header("Cookie", cookie)
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/dashboard/login");
    assert!(response.header("set-cookie").to_str().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (state, _backend) = common::create_test_state();
    let cookie = common::session_cookie(&state);
    let server = common::create_test_server(state);

    let response = server
        .post("/dashboard/logout")
        .add_header("Cookie", cookie)
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/dashboard/login?notice=logged_out");
    assert!(response.header("set-cookie").to_str().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn test_dashboard_home_renders_summary() {
    let (state, backend) = common::create_test_state();
    backend.add_driver("Alice Moreau", "+33 612 345 678");
    let cookie = common::session_cookie(&state);
    let server = common::create_test_server(state);

    let response = server.get("/dashboard").add_header("Cookie", cookie).await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("trips-by-company"));
    assert!(body.contains("42"));
}
