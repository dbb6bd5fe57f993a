use crate::{AuthError, Result as AuthErrorResult};

use id_core::Identity;

use std::panic::Location;

use chrono::{DateTime, TimeDelta, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Payload of an issued identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity id)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
    /// Role tags, passed through uninterpreted
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Claims {
    pub fn for_identity(
        identity: &Identity,
        issuer: &str,
        now: DateTime<Utc>,
        validity: TimeDelta,
    ) -> Self {
        Self {
            sub: identity.id.to_string(),
            iss: issuer.to_string(),
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
            roles: identity.role_strings(),
        }
    }

    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.iss.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "iss".to_string(),
                message: "iss cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.exp <= self.iat {
            return Err(AuthError::InvalidClaim {
                claim: "exp".to_string(),
                message: "exp must be after iat".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
