use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid name '{value}': {message} {location}")]
    InvalidName {
        value: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid email '{value}' {location}")]
    InvalidEmail {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid role '{value}' {location}")]
    InvalidRole {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid credential hash: {message} {location}")]
    InvalidCredentialHash {
        message: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;

impl CoreError {
    /// Message without the source location, safe to hand to a client.
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidName { message, .. } => format!("name {}", message),
            Self::InvalidEmail { .. } => "invalid email address".to_string(),
            Self::InvalidRole { value, .. } => format!("invalid role '{}'", value.trim()),
            Self::InvalidCredentialHash { .. } => "invalid credential".to_string(),
        }
    }
}
