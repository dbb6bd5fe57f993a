//! REST API error types
//!
//! Every failure leaves the server as `{ "error": { code, message, field? } }`
//! with a status code chosen from the error kind. Messages are the safe
//! client-facing text only; details stay in the log.

use id_business::{BusinessError, ErrorKind, UNAUTHENTICATED_MESSAGE};

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "CONFLICT", "VALIDATION_ERROR")
    pub code: String,
    pub message: String,
    /// Field name if the error concerns a specific request field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or invalid request (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Login failure of any cause (401)
    #[error("Unauthenticated {location}")]
    Unauthenticated { location: ErrorLocation },

    /// Email already registered (409)
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// No such identity (404)
    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },

    /// Handler exceeded its deadline (500)
    #[error("Request timed out after {millis}ms {location}")]
    Timeout { millis: u128, location: ErrorLocation },
}

impl ApiError {
    #[track_caller]
    pub fn validation<S: Into<String>>(field: &str, message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } | Self::Timeout { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("{}", self);
        }

        let body = match self {
            ApiError::Validation { message, field, .. } => ApiErrorBody {
                code: "VALIDATION_ERROR".into(),
                message,
                field,
            },
            ApiError::Unauthenticated { .. } => ApiErrorBody {
                code: "UNAUTHENTICATED".into(),
                message: UNAUTHENTICATED_MESSAGE.into(),
                field: None,
            },
            ApiError::Conflict { message, field, .. } => ApiErrorBody {
                code: "CONFLICT".into(),
                message,
                field,
            },
            ApiError::NotFound { message, .. } => ApiErrorBody {
                code: "NOT_FOUND".into(),
                message,
                field: None,
            },
            // Internal details never reach the client
            ApiError::Internal { .. } => ApiErrorBody {
                code: "INTERNAL_ERROR".into(),
                message: "internal error".into(),
                field: None,
            },
            ApiError::Timeout { .. } => ApiErrorBody {
                code: "TIMEOUT".into(),
                message: "request timed out".into(),
                field: None,
            },
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

impl From<BusinessError> for ApiError {
    #[track_caller]
    fn from(e: BusinessError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let message = e.safe_message();
        let field = e.field().map(str::to_string);

        match e.kind() {
            ErrorKind::InvalidArgument => ApiError::Validation {
                message,
                field,
                location,
            },
            ErrorKind::Conflict => ApiError::Conflict {
                message,
                field,
                location,
            },
            ErrorKind::NotFound => ApiError::NotFound { message, location },
            ErrorKind::Unauthenticated => ApiError::Unauthenticated { location },
            ErrorKind::Internal => ApiError::Internal {
                message: e.to_string(),
                location,
            },
        }
    }
}

/// Token signing failures
impl From<id_auth::AuthError> for ApiError {
    #[track_caller]
    fn from(e: id_auth::AuthError) -> Self {
        ApiError::Internal {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Body that is not valid JSON or does not match the request shape
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(e: JsonRejection) -> Self {
        ApiError::Validation {
            message: format!("Invalid request body: {}", e.body_text()),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
