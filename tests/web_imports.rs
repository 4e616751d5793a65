mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};

fn upload_form(file_name: &str, bytes: &'static [u8]) -> MultipartForm {
    MultipartForm::new().add_text("kind", "payroll").add_part(
        "file",
        Part::bytes(bytes).file_name(file_name).mime_type("text/csv"),
    )
}

#[tokio::test]
async fn test_imports_page_renders() {
    let (state, _backend) = common::create_test_state();
    let cookie = common::session_cookie(&state);
    let server = common::create_test_server(state);

    let response = server
        .get("/dashboard/imports")
        .add_header("Cookie", cookie)
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("10 MB"));
}

#[tokio::test]
async fn test_upload_csv() {
    let (state, backend) = common::create_test_state();
    let cookie = common::session_cookie(&state);
    let server = common::create_test_server(state);

    let response = server
        .post("/dashboard/imports")
        .add_header("Cookie", cookie.clone())
        .multipart(upload_form("march-payroll.csv", b"driver_id,net\n101,950.00\n"))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/dashboard/imports?notice=uploaded");
    assert_eq!(backend.import_count(), 1);

    let history = server
        .get("/dashboard/imports")
        .add_header("Cookie", cookie)
        .await;
    assert!(history.text().contains("march-payroll.csv"));
}

#[tokio::test]
async fn test_import_pager_keeps_page_size() {
    let (state, backend) = common::create_test_state();
    let cookie = common::session_cookie(&state);
    let server = common::create_test_server(state);

    for name in ["jan.csv", "feb.csv", "mar.csv"] {
        server
            .post("/dashboard/imports")
            .add_header("Cookie", cookie.clone())
            .multipart(upload_form(name, b"driver_id,net\n101,950.00\n"))
            .await
            .assert_status(StatusCode::SEE_OTHER);
    }
    assert_eq!(backend.import_count(), 3);

    let response = server
        .get("/dashboard/imports?page_size=2")
        .add_header("Cookie", cookie)
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Showing 1-2 of 3"));
    assert!(body.contains(r#"href="/dashboard/imports?page_size=2&amp;page=2""#));
}

#[tokio::test]
async fn test_upload_rejects_unknown_extension() {
    let (state, backend) = common::create_test_state();
    let cookie = common::session_cookie(&state);
    let server = common::create_test_server(state);

    let response = server
        .post("/dashboard/imports")
        .add_header("Cookie", cookie)
        .multipart(upload_form("notes.txt", b"hello"))
        .await;

    response.assert_status_bad_request();
    assert_eq!(backend.import_count(), 0);
}

#[tokio::test]
async fn test_upload_rejects_empty_file() {
    let (state, backend) = common::create_test_state();
    let cookie = common::session_cookie(&state);
    let server = common::create_test_server(state);

    let response = server
        .post("/dashboard/imports")
        .add_header("Cookie", cookie)
        .multipart(upload_form("empty.csv", b""))
        .await;

    response.assert_status_bad_request();
    assert_eq!(backend.import_count(), 0);
}

#[tokio::test]
async fn test_upload_requires_file() {
    let (state, _backend) = common::create_test_state();
    let cookie = common::session_cookie(&state);
    let server = common::create_test_server(state);

    let response = server
        .post("/dashboard/imports")
        .add_header("Cookie", cookie)
        .multipart(MultipartForm::new().add_text("kind", "trips"))
        .await;

    response.assert_status_bad_request();
    assert!(response.text().contains("Choose a file to upload"));
}

#[tokio::test]
async fn test_record_pages_render_empty_state() {
    let (state, _backend) = common::create_test_state();
    let cookie = common::session_cookie(&state);
    let server = common::create_test_server(state);

    let payments = server
        .get("/dashboard/records/payments?from=2026-01-01&to=2026-01-31&driver_id=")
        .add_header("Cookie", cookie.clone())
        .await;
    payments.assert_status_ok();
    assert!(payments.text().contains("2026-01-31"));

    let trips = server
        .get("/dashboard/records/trips")
        .add_header("Cookie", cookie)
        .await;
    trips.assert_status_ok();
}

#[tokio::test]
async fn test_record_page_rejects_reversed_range() {
    let (state, _backend) = common::create_test_state();
    let cookie = common::session_cookie(&state);
    let server = common::create_test_server(state);

    let response = server
        .get("/dashboard/records/trips?from=2026-02-01&to=2026-01-01")
        .add_header("Cookie", cookie)
        .await;

    response.assert_status_bad_request();
}
