use crate::{AuthError, Claims, Result as AuthErrorResult, SigningKey};

use std::collections::HashMap;
use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

/// Produces a signed token string from claims, using the key named by `kid`.
pub trait Signer: Send + Sync {
    fn sign(&self, kid: &str, claims: &Claims) -> AuthErrorResult<String>;
}

/// JWT signer holding one or more keys addressed by key id.
///
/// The key id is written into the token header so a verifier can select the
/// matching key.
#[derive(Default)]
pub struct JwtSigner {
    keys: HashMap<String, (Algorithm, EncodingKey)>,
}

impl JwtSigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` under `kid`, replacing any key already registered there.
    #[track_caller]
    pub fn with_key(mut self, kid: impl Into<String>, key: SigningKey) -> AuthErrorResult<Self> {
        let kid = kid.into();

        let entry = match key {
            SigningKey::HS256 { secret } => (Algorithm::HS256, EncodingKey::from_secret(&secret)),
            SigningKey::RS256 { private_key_pem } => {
                let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
                    .map_err(|e| AuthError::InvalidKey {
                        kid: kid.clone(),
                        message: format!("Invalid RSA private key: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                (Algorithm::RS256, encoding_key)
            }
        };

        self.keys.insert(kid, entry);
        Ok(self)
    }

    pub fn contains(&self, kid: &str) -> bool {
        self.keys.contains_key(kid)
    }
}

impl Signer for JwtSigner {
    #[track_caller]
    fn sign(&self, kid: &str, claims: &Claims) -> AuthErrorResult<String> {
        let (algorithm, key) = self.keys.get(kid).ok_or_else(|| AuthError::UnknownKey {
            kid: kid.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let mut header = Header::new(*algorithm);
        header.kid = Some(kid.to_string());

        encode(&header, claims, key).map_err(|e| AuthError::Signing {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
