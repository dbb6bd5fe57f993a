use crate::error::{Result as ServerErrorResult, ServerError};

use id_auth::{JwtSigner, JwtValidator, SigningKey, TokenIssuer};
use id_config::{Config, ConfigError};

use std::path::Path;
use std::sync::Arc;

use chrono::TimeDelta;
use log::{info, warn};

/// Key from `auth` config: HS256 secret, else RS256 key file.
pub fn signing_key_from_config(config: &Config) -> ServerErrorResult<SigningKey> {
    if let Some(ref secret) = config.auth.jwt_secret {
        Ok(SigningKey::HS256 {
            secret: secret.as_bytes().to_vec(),
        })
    } else if let Some(path) = config.private_key_path()? {
        Ok(SigningKey::RS256 {
            private_key_pem: read_key_file(&path)?,
        })
    } else {
        Err(ConfigError::auth("no signing key configured").into())
    }
}

pub fn signer_from_config(config: &Config) -> ServerErrorResult<JwtSigner> {
    signer_for(config, signing_key_from_config(config)?)
}

/// Validator for the tokens this server issues, if the config allows one.
///
/// HS256 verifies with the signing secret. RS256 needs `auth.jwt_public_key_path`.
pub fn validator_from_config(
    config: &Config,
    key: &SigningKey,
) -> ServerErrorResult<Option<JwtValidator>> {
    let issuer = config.auth.issuer.as_str();
    let kid = config.auth.kid.as_str();

    if let Some(validator) = JwtValidator::for_signing_key(issuer, kid, key) {
        return Ok(Some(validator));
    }

    match config.public_key_path()? {
        Some(path) => {
            let public_key_pem = read_key_file(&path)?;
            Ok(Some(
                JwtValidator::new(issuer).with_public_key(kid, &public_key_pem)?,
            ))
        }
        None => Ok(None),
    }
}

/// Build the issuer and check that a token it signs verifies.
pub fn issuer_from_config(config: &Config) -> ServerErrorResult<TokenIssuer> {
    let key = signing_key_from_config(config)?;
    let validator = validator_from_config(config, &key)?;
    let signer = signer_for(config, key)?;

    let issuer = TokenIssuer::new(
        Arc::new(signer),
        config.auth.issuer.as_str(),
        config.auth.kid.as_str(),
    )
    .with_validity(TimeDelta::hours(config.auth.token_validity_hours));

    match validator {
        Some(validator) => {
            issuer.check_against(&validator)?;
            info!("JWT: issued tokens verify under kid '{}'", issuer.kid());
        }
        None => warn!("JWT: no public key configured, skipping token self-check"),
    }

    Ok(issuer)
}

fn signer_for(config: &Config, key: SigningKey) -> ServerErrorResult<JwtSigner> {
    info!(
        "JWT: {} signing with kid '{}'",
        key.algorithm_name(),
        config.auth.kid
    );

    Ok(JwtSigner::new().with_key(config.auth.kid.as_str(), key)?)
}

fn read_key_file(path: &Path) -> ServerErrorResult<String> {
    std::fs::read_to_string(path).map_err(|e| ServerError::JwtKeyFile {
        path: path.display().to_string(),
        source: e,
    })
}
