//! Classified errors at the business boundary.
//!
//! Store and hashing failures are reclassified here; nothing below this layer
//! reaches a caller unclassified.

use id_auth::AuthError;
use id_core::StoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Message returned for every failed login, whatever the cause.
pub const UNAUTHENTICATED_MESSAGE: &str = "invalid email or password";

const INTERNAL_MESSAGE: &str = "internal error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Conflict,
    NotFound,
    Unauthenticated,
    Internal,
}

#[derive(Error, Debug)]
pub enum BusinessError {
    #[error("Invalid argument: {message} {location}")]
    InvalidArgument {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unauthenticated: {message} {location}")]
    Unauthenticated {
        message: String,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl BusinessError {
    #[track_caller]
    pub fn invalid_argument<S: Into<String>>(field: &str, message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated {
            message: UNAUTHENTICATED_MESSAGE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Reclassify a store failure, keeping the operation that hit it.
    #[track_caller]
    pub fn from_store(operation: &str, error: StoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match error {
            StoreError::DuplicateEmail { email, .. } => Self::Conflict {
                message: format!("email already registered: {}", email),
                field: Some("email".to_string()),
                location,
            },
            StoreError::NotFound { key, .. } => Self::NotFound {
                message: format!("{}: no identity for {}", operation, key),
                location,
            },
            other => Self::Internal {
                message: format!("{}: {}", operation, other),
                location,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unauthenticated { .. } => ErrorKind::Unauthenticated,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Text that may be shown to a client. Never includes locations, store
    /// details, or whether an account exists.
    pub fn safe_message(&self) -> String {
        match self {
            Self::InvalidArgument { message, .. } => message.clone(),
            Self::Conflict { field, .. } => match field.as_deref() {
                Some("email") => "email already registered".to_string(),
                _ => "conflict".to_string(),
            },
            Self::NotFound { .. } => "not found".to_string(),
            Self::Unauthenticated { .. } => UNAUTHENTICATED_MESSAGE.to_string(),
            Self::Internal { .. } => INTERNAL_MESSAGE.to_string(),
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { field, .. } | Self::Conflict { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

impl From<AuthError> for BusinessError {
    #[track_caller]
    fn from(error: AuthError) -> Self {
        Self::Internal {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BusinessError>;
