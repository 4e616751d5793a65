mod common;

use serde_json::json;

#[tokio::test]
async fn test_pager_middle_window() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .get("/api/pager")
        .add_query_param("page", 5)
        .add_query_param("total_pages", 10)
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "current_page": 5,
        "total_pages": 10,
        "items": [
            {"page": 1}, {"ellipsis": true}, {"page": 4}, {"page": 5},
            {"page": 6}, {"ellipsis": true}, {"page": 10}
        ]
    }));
}

#[tokio::test]
async fn test_pager_short_list_has_no_ellipsis() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let json = server
        .get("/api/pager?page=2&total_pages=3")
        .await
        .json::<serde_json::Value>();

    assert_eq!(json["items"], json!([{"page": 1}, {"page": 2}, {"page": 3}]));
}

#[tokio::test]
async fn test_pager_clamps_current_page() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let json = server
        .get("/api/pager?page=99&total_pages=10")
        .await
        .json::<serde_json::Value>();

    assert_eq!(json["current_page"], 10);
    assert_eq!(json["items"][json["items"].as_array().unwrap().len() - 1], json!({"page": 10}));
}

#[tokio::test]
async fn test_pager_zero_pages() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let json = server
        .get("/api/pager?page=1&total_pages=0")
        .await
        .json::<serde_json::Value>();

    assert_eq!(json["items"], json!([]));
}

#[tokio::test]
async fn test_pager_rejects_missing_total() {
    let (state, _backend) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/api/pager?page=1").await;

    response.assert_status_bad_request();
}
