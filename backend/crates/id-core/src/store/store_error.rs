use crate::ErrorLocation;

use std::panic::Location;
use std::result::Result as StdResult;

use thiserror::Error;

/// Errors reported by a [`Storer`](crate::Storer).
///
/// `DuplicateEmail` and `NotFound` are distinguishable so the business layer
/// can classify them; everything else is a backend failure.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Email is not unique: {email} {location}")]
    DuplicateEmail {
        email: String,
        location: ErrorLocation,
    },

    #[error("Identity not found: {key} {location}")]
    NotFound {
        key: String,
        location: ErrorLocation,
    },

    #[error("Store operation '{operation}' failed: {message} {location}")]
    Backend {
        operation: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Transaction error: {message} {location}")]
    Transaction {
        message: String,
        location: ErrorLocation,
    },
}

impl StoreError {
    #[track_caller]
    pub fn not_found<S: Into<String>>(key: S) -> Self {
        Self::NotFound {
            key: key.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn backend<S: Into<String>>(operation: &'static str, message: S) -> Self {
        Self::Backend {
            operation,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_duplicate_email(&self) -> bool {
        matches!(self, Self::DuplicateEmail { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type StoreResult<T> = StdResult<T, StoreError>;
