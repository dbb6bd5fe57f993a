use id_core::{ErrorLocation, StoreError};

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid stored identity: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    #[track_caller]
    pub(crate) fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Classify into the storage taxonomy, tagging the failing operation and key.
    ///
    /// A unique-constraint violation can only come from `identities.email`, so
    /// it becomes `DuplicateEmail`; a missing row becomes `NotFound`.
    #[track_caller]
    pub fn into_store_error(self, operation: &'static str, key: &str) -> StoreError {
        let location = ErrorLocation::from(Location::caller());

        match &self {
            Self::Sqlx {
                source: sqlx::Error::RowNotFound,
                ..
            } => StoreError::NotFound {
                key: key.to_string(),
                location,
            },
            Self::Sqlx {
                source: sqlx::Error::Database(db_error),
                ..
            } if db_error.is_unique_violation() => StoreError::DuplicateEmail {
                email: key.to_string(),
                location,
            },
            _ => StoreError::Backend {
                operation,
                message: format!("{}: {}", key, self),
                location,
            },
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
