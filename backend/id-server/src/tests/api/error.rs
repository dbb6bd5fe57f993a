use crate::ApiError;

use id_business::BusinessError;
use id_core::StoreError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_validation_error_when_rendered_then_400_with_field() {
    let (status, json) = body_json(ApiError::validation("password", "too short")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["message"], "too short");
    assert_eq!(json["error"]["field"], "password");
}

#[tokio::test]
async fn given_unauthenticated_when_rendered_then_401_uniform_message_without_field() {
    let (status, json) = body_json(ApiError::unauthenticated()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHENTICATED");
    assert_eq!(json["error"]["message"], "invalid email or password");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn given_internal_error_when_rendered_then_500_without_details() {
    let error = ApiError::Internal {
        message: "sqlite: disk I/O error".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"]["message"], "internal error");
}

#[tokio::test]
async fn given_timeout_when_rendered_then_500_timeout_code() {
    let error = ApiError::Timeout {
        millis: 10,
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "TIMEOUT");
}

#[tokio::test]
async fn given_duplicate_email_business_error_when_converted_then_409_on_email_field() {
    let store_error = StoreError::DuplicateEmail {
        email: "a@x.com".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let error = ApiError::from(BusinessError::from_store("create", store_error));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(json["error"]["message"], "email already registered");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn given_backend_business_error_when_converted_then_500() {
    let store_error = StoreError::backend("query_by_email", "connection reset");
    let error = ApiError::from(BusinessError::from_store("query_by_email", store_error));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        !json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("connection reset")
    );
}

#[test]
fn given_business_unauthenticated_when_converted_then_api_unauthenticated() {
    let error = ApiError::from(BusinessError::unauthenticated());

    assert!(matches!(error, ApiError::Unauthenticated { .. }));
    assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn given_not_found_business_error_when_converted_then_404() {
    let store_error = StoreError::not_found("id");
    let error = ApiError::from(BusinessError::from_store("query_by_id", store_error));

    assert_eq!(error.status(), StatusCode::NOT_FOUND);
}
