/**
 * Authentication Test Helpers
 */

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use storefront::backend::auth::handlers::types::AuthResponse;

/// Sign up through the API and return the issued response
pub async fn signup_user(server: &TestServer, username: &str, password: &str) -> AuthResponse {
    let response = server
        .post("/api/productos/signup")
        .json(&json!({ "username": username, "password": password }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<AuthResponse>()
}

/// `Authorization` header value for `token`
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
