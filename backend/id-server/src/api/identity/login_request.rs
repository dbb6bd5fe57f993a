use crate::{ApiError, ApiResult};

use id_core::{Email, PlaintextSecret};

use serde::Deserialize;

/// Body of `POST /v1/login`.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Any unusable input fails as `Unauthenticated`, same as a wrong password.
    pub fn into_credentials(self) -> ApiResult<(Email, PlaintextSecret)> {
        let password = PlaintextSecret::new(self.password);

        if password.is_empty() {
            return Err(ApiError::unauthenticated());
        }
        let email = Email::parse(&self.email).map_err(|_| ApiError::unauthenticated())?;

        Ok((email, password))
    }
}
