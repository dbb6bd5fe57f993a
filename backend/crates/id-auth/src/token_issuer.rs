use crate::{Claims, JwtValidator, Result as AuthErrorResult, Signer};

use id_core::Identity;

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

/// One year.
pub const DEFAULT_VALIDITY_HOURS: i64 = 8760;

const SELF_CHECK_SUBJECT: &str = "token-issuer-self-check";

/// Builds claims for an identity and has them signed with a fixed key id.
pub struct TokenIssuer {
    signer: Arc<dyn Signer>,
    issuer: String,
    kid: String,
    validity: TimeDelta,
}

impl TokenIssuer {
    pub fn new(signer: Arc<dyn Signer>, issuer: impl Into<String>, kid: impl Into<String>) -> Self {
        Self {
            signer,
            issuer: issuer.into(),
            kid: kid.into(),
            validity: TimeDelta::hours(DEFAULT_VALIDITY_HOURS),
        }
    }

    pub fn with_validity(mut self, validity: TimeDelta) -> Self {
        self.validity = validity;
        self
    }

    pub fn claims_for(&self, identity: &Identity, now: DateTime<Utc>) -> Claims {
        Claims::for_identity(identity, &self.issuer, now, self.validity)
    }

    pub fn issue(&self, identity: &Identity) -> AuthErrorResult<String> {
        let claims = self.claims_for(identity, Utc::now());
        self.signer.sign(&self.kid, &claims)
    }

    /// Sign claims shaped like a real token and have `validator` accept them.
    pub fn check_against(&self, validator: &JwtValidator) -> AuthErrorResult<()> {
        let now = Utc::now();
        let claims = Claims {
            sub: SELF_CHECK_SUBJECT.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
            roles: Vec::new(),
        };

        let token = self.signer.sign(&self.kid, &claims)?;
        validator.validate(&token)?;
        Ok(())
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn kid(&self) -> &str {
        &self.kid
    }

    pub fn validity(&self) -> TimeDelta {
        self.validity
    }
}
