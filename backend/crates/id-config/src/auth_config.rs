use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ISSUER, DEFAULT_KID, DEFAULT_TOKEN_VALIDITY_HOURS,
    MAX_TOKEN_VALIDITY_HOURS, MIN_JWT_SECRET_LENGTH,
};

use std::path::Path;

use serde::Deserialize;

/// Token signing settings. Exactly one of `jwt_secret` (HS256) or
/// `jwt_private_key_path` (RS256) must be set. With RS256,
/// `jwt_public_key_path` lets the server verify its own tokens at startup.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    /// PEM file, relative to the config directory
    pub jwt_private_key_path: Option<String>,
    /// PEM file, relative to the config directory
    pub jwt_public_key_path: Option<String>,
    pub issuer: String,
    pub kid: String,
    pub token_validity_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_private_key_path: None,
            jwt_public_key_path: None,
            issuer: String::from(DEFAULT_ISSUER),
            kid: String::from(DEFAULT_KID),
            token_validity_hours: DEFAULT_TOKEN_VALIDITY_HOURS,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("jwt_private_key_path", &self.jwt_private_key_path)
            .field("jwt_public_key_path", &self.jwt_public_key_path)
            .field("issuer", &self.issuer)
            .field("kid", &self.kid)
            .field("token_validity_hours", &self.token_validity_hours)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        match (&self.jwt_secret, &self.jwt_private_key_path) {
            (None, None) => {
                return Err(ConfigError::auth(
                    "a signing key is required: set auth.jwt_secret or auth.jwt_private_key_path",
                ));
            }
            (Some(_), Some(_)) => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret and auth.jwt_private_key_path are mutually exclusive",
                ));
            }
            (Some(secret), None) => {
                if secret.len() < MIN_JWT_SECRET_LENGTH {
                    return Err(ConfigError::auth(format!(
                        "auth.jwt_secret must be at least {} characters",
                        MIN_JWT_SECRET_LENGTH
                    )));
                }
            }
            (None, Some(key_path)) => {
                validate_key_file("auth.jwt_private_key_path", key_path, config_dir)?;
            }
        }

        if let Some(public_key_path) = &self.jwt_public_key_path {
            if self.jwt_private_key_path.is_none() {
                return Err(ConfigError::auth(
                    "auth.jwt_public_key_path requires auth.jwt_private_key_path",
                ));
            }
            validate_key_file("auth.jwt_public_key_path", public_key_path, config_dir)?;
        }

        if self.issuer.trim().is_empty() {
            return Err(ConfigError::auth("auth.issuer cannot be empty"));
        }

        if self.kid.trim().is_empty() {
            return Err(ConfigError::auth("auth.kid cannot be empty"));
        }

        if self.token_validity_hours < 1 || self.token_validity_hours > MAX_TOKEN_VALIDITY_HOURS {
            return Err(ConfigError::auth(format!(
                "auth.token_validity_hours must be 1-{}, got {}",
                MAX_TOKEN_VALIDITY_HOURS, self.token_validity_hours
            )));
        }

        Ok(())
    }

    pub fn algorithm(&self) -> &'static str {
        if self.jwt_secret.is_some() {
            "HS256"
        } else if self.jwt_private_key_path.is_some() {
            "RS256"
        } else {
            "none"
        }
    }
}

fn validate_key_file(field: &str, key_path: &str, config_dir: &Path) -> ConfigErrorResult<()> {
    if Path::new(key_path).is_absolute() || key_path.contains("..") {
        let message = format!("{} must be relative and cannot contain '..'", field);
        return Err(ConfigError::auth(message));
    }

    let full_path = config_dir.join(key_path);
    if !full_path.is_file() {
        let message = format!("{} not found: {}", field, full_path.display());
        return Err(ConfigError::auth(message));
    }

    Ok(())
}
