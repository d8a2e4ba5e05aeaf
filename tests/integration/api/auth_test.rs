/**
 * Authentication API Integration Tests
 *
 * Signup, login and the bearer-protected `/me` endpoint against in-memory
 * user storage.
 */

use axum::http::StatusCode;
use serde_json::{json, Value};

use storefront::backend::auth::{AuthResponse, UserResponse};

use crate::common::{bearer, signup_user, test_server};

#[tokio::test]
async fn test_signup_returns_token_and_user() {
    let server = test_server();

    let auth = signup_user(&server, "ana", "correct-horse").await;

    assert!(!auth.token.is_empty());
    assert_eq!(auth.user.username, "ana");
}

#[tokio::test]
async fn test_signup_duplicate_username_conflicts() {
    let server = test_server();
    signup_user(&server, "ana", "correct-horse").await;

    let response = server
        .post("/api/productos/signup")
        .json(&json!({ "username": "ana", "password": "another-pass" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["status"], json!(409));
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    let server = test_server();

    let response = server
        .post("/api/productos/signup")
        .json(&json!({ "username": "ana", "password": "short" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_rejects_invalid_username() {
    let server = test_server();

    let response = server
        .post("/api/productos/signup")
        .json(&json!({ "username": "no spaces allowed", "password": "correct-horse" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_without_password_is_json_400() {
    let server = test_server();

    let response = server
        .post("/api/productos/signup")
        .json(&json!({ "username": "ana" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["status"], json!(400));
    assert!(body["error"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_login_with_malformed_json_is_json_400() {
    let server = test_server();

    let response = server
        .post("/api/productos/login")
        .text("{ not json")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["status"], json!(400));
}

#[tokio::test]
async fn test_login_with_correct_password() {
    let server = test_server();
    let created = signup_user(&server, "ana", "correct-horse").await;

    let response = server
        .post("/api/productos/login")
        .json(&json!({ "username": "ana", "password": "correct-horse" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let auth = response.json::<AuthResponse>();
    assert_eq!(auth.user, created.user);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let server = test_server();
    signup_user(&server, "ana", "correct-horse").await;

    let response = server
        .post("/api/productos/login")
        .json(&json!({ "username": "ana", "password": "wrong-horse" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_user_matches_wrong_password() {
    let server = test_server();

    let response = server
        .post("/api/productos/login")
        .json(&json!({ "username": "nobody", "password": "whatever-pass" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"],
        json!("Invalid username or password")
    );
}

#[tokio::test]
async fn test_me_with_bearer_token() {
    let server = test_server();
    let auth = signup_user(&server, "ana", "correct-horse").await;

    let response = server
        .get("/api/productos/me")
        .add_header("Authorization", bearer(&auth.token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<UserResponse>(), auth.user);
}

#[tokio::test]
async fn test_me_without_token_is_unauthorized() {
    let server = test_server();

    let response = server.get("/api/productos/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_garbage_token_is_unauthorized() {
    let server = test_server();

    let response = server
        .get("/api/productos/me")
        .add_header("Authorization", bearer("not-a-jwt"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
