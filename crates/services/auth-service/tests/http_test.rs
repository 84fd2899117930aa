//! Integration tests for the HTTP surface.
//!
//! These run the real router against the in-memory user store and the JWT
//! issuer, without a database.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use auth_service_lib::api::{create_router, AppState};
use auth_service_lib::repository::MemoryUserStore;
use auth_service_lib::service::Authenticator;
use auth_service_lib::token::JwtIssuer;

const SECRET: &str = "test-secret-key-for-testing-only-32chars";

fn app() -> (Router, Arc<MemoryUserStore>, JwtIssuer) {
    let store = Arc::new(MemoryUserStore::new());
    let issuer = JwtIssuer::new(SECRET, 24).unwrap();
    let service = Authenticator::new(store.clone(), Arc::new(issuer.clone()));
    let state = AppState::new(Arc::new(service), Duration::from_secs(5));

    (create_router(state), store, issuer)
}

async fn post_register(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

fn bob() -> Value {
    json!({
        "username": " Bob ",
        "email": " BOB@gmail.com ",
        "password": "password",
        "confirm_password": "password"
    })
}

#[tokio::test]
async fn test_register_created() {
    let (app, store, issuer) = app();

    let (status, body) = post_register(&app, bob()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["username"], "Bob");
    assert_eq!(body["user"]["email"], "bob@gmail.com");
    assert!(body["user"].get("password").is_none());

    let token = body["access_token"].as_str().unwrap();
    let claims = issuer.verify(token).unwrap();
    assert_eq!(claims.sub, body["user"]["id"].as_str().unwrap());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_register_validation_error() {
    let (app, store, _) = app();

    let (status, body) = post_register(
        &app,
        json!({
            "username": "bob",
            "email": "bob",
            "password": "password",
            "confirm_password": "password"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Invalid email format");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_register_username_conflict() {
    let (app, _, _) = app();
    post_register(&app, bob()).await;

    let (status, body) = post_register(
        &app,
        json!({
            "username": "Bob",
            "email": "other@gmail.com",
            "password": "password",
            "confirm_password": "password"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Username already exists");
}

#[tokio::test]
async fn test_register_email_conflict_ignores_case() {
    let (app, _, _) = app();
    post_register(&app, bob()).await;

    let (status, body) = post_register(
        &app,
        json!({
            "username": "alice",
            "email": "Bob@Gmail.com",
            "password": "password",
            "confirm_password": "password"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Email already exists");
}

#[tokio::test]
async fn test_register_malformed_body() {
    let (app, _, _) = app();

    let (status, body) = post_register(&app, json!({ "username": "bob" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_health() {
    let (app, _, _) = app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
