use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::test_server;

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let server = test_server();

    let response = server.get("/nope").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Not Found", "status": 404 })
    );
}

#[tokio::test]
async fn test_index_page_is_served() {
    let server = test_server();

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("<html"));
}

#[tokio::test]
async fn test_index_page_has_account_forms() {
    let server = test_server();

    let page = server.get("/").await.text();

    assert!(page.contains(r#"<form id="signup">"#));
    assert!(page.contains(r#"<form id="login">"#));
    assert!(page.contains(r#"id="logout""#));
    assert!(page.contains("/api/productos/me"));
}
