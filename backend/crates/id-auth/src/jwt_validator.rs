use crate::{AuthError, Claims, Result as AuthErrorResult, SigningKey};

use std::collections::HashMap;
use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};

/// Clock skew tolerated on `exp`, in seconds.
const LEEWAY_SECS: u64 = 30;

/// Verifies tokens produced by a [`JwtSigner`](crate::JwtSigner).
///
/// Keys are registered per key id. The `kid` in the token header selects the
/// key, and the header's algorithm must match the one registered for it.
pub struct JwtValidator {
    issuer: String,
    keys: HashMap<String, (Algorithm, DecodingKey)>,
}

impl JwtValidator {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            keys: HashMap::new(),
        }
    }

    /// Trust HS256 tokens signed with `secret` under `kid`.
    pub fn with_secret(mut self, kid: impl Into<String>, secret: &[u8]) -> Self {
        self.keys.insert(
            kid.into(),
            (Algorithm::HS256, DecodingKey::from_secret(secret)),
        );
        self
    }

    /// Trust RS256 tokens signed by the private half of `public_key_pem` under `kid`.
    #[track_caller]
    pub fn with_public_key(
        mut self,
        kid: impl Into<String>,
        public_key_pem: &str,
    ) -> AuthErrorResult<Self> {
        let kid = kid.into();
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
            AuthError::InvalidKey {
                kid: kid.clone(),
                message: format!("Invalid RSA public key: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        self.keys.insert(kid, (Algorithm::RS256, decoding_key));
        Ok(self)
    }

    /// Validator for tokens signed with `key`, when the key alone is enough to verify.
    ///
    /// Only symmetric keys are: an RS256 private key needs its public half
    /// registered through [`with_public_key`](Self::with_public_key).
    pub fn for_signing_key(
        issuer: impl Into<String>,
        kid: &str,
        key: &SigningKey,
    ) -> Option<Self> {
        match key {
            SigningKey::HS256 { secret } => Some(Self::new(issuer).with_secret(kid, secret)),
            SigningKey::RS256 { .. } => None,
        }
    }

    pub fn contains(&self, kid: &str) -> bool {
        self.keys.contains_key(kid)
    }

    /// Check signature, issuer and expiry, then return the claims.
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let location = ErrorLocation::from(Location::caller());

        let header =
            decode_header(token).map_err(|e| AuthError::JwtDecode { source: e, location })?;
        let kid = header.kid.ok_or_else(|| AuthError::InvalidToken {
            message: "missing kid header".to_string(),
            location,
        })?;
        let (algorithm, key) = self.keys.get(&kid).ok_or_else(|| AuthError::UnknownKey {
            kid: kid.clone(),
            location,
        })?;
        if header.alg != *algorithm {
            return Err(AuthError::InvalidToken {
                message: format!("kid '{}' does not sign with {:?}", kid, header.alg),
                location,
            });
        }

        let token_data =
            decode::<Claims>(token, key, &self.validation(*algorithm)).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired { location },
                    ErrorKind::InvalidIssuer => AuthError::InvalidClaim {
                        claim: "iss".to_string(),
                        message: "unexpected issuer".to_string(),
                        location,
                    },
                    _ => AuthError::JwtDecode { source: e, location },
                }
            })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.leeway = LEEWAY_SECS;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}
