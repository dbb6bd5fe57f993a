#![allow(dead_code)]

//! Test infrastructure for id-server API tests

use id_auth::{JwtSigner, JwtValidator, SigningKey, TokenIssuer};
use id_cache::CacheSettings;
use id_server::{AppState, build_router};

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-that-is-at-least-32-bytes!";
pub const TEST_ISSUER: &str = "id-server-tests";
pub const TEST_KID: &str = "test";

/// AppState over an in-memory database with an HS256 issuer
pub async fn create_test_app_state(handler_timeout: Duration) -> AppState {
    let pool = id_db::connect_in_memory()
        .await
        .expect("Failed to create test database");

    let signer = JwtSigner::new()
        .with_key(
            TEST_KID,
            SigningKey::HS256 {
                secret: TEST_SECRET.as_bytes().to_vec(),
            },
        )
        .expect("Failed to build signer");
    let issuer = TokenIssuer::new(Arc::new(signer), TEST_ISSUER, TEST_KID);

    AppState::new(pool, CacheSettings::default(), issuer, handler_timeout)
}

pub async fn create_test_router() -> Router {
    build_router(create_test_app_state(Duration::from_secs(10)).await)
}

pub fn test_validator() -> JwtValidator {
    JwtValidator::new(TEST_ISSUER).with_secret(TEST_KID, TEST_SECRET.as_bytes())
}

/// POST a raw body and return status plus parsed JSON
pub async fn post_raw(router: &Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

pub async fn post_json(
    router: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_raw(router, uri, &body.to_string()).await
}

pub fn register_body(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Test User",
        "email": email,
        "department": "Engineering",
        "password": password,
        "password_confirm": password,
        "roles": ["admin", "user"],
    })
}

pub fn login_body(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": password })
}
