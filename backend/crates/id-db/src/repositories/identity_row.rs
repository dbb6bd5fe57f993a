//! Persisted layout of an identity and its conversion to and from the model.

use crate::{DbError, Result as DbErrorResult};

use id_core::{CredentialHash, Email, Identity, Name, Role};

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct IdentityRow {
    pub id: String,
    pub name: String,
    pub email: String,
    /// JSON array of role tags, in order
    pub roles: String,
    pub password_hash: Vec<u8>,
    pub department: Option<String>,
    pub enabled: bool,
    /// Microseconds since the Unix epoch
    pub created_at: i64,
    pub updated_at: i64,
}

impl IdentityRow {
    pub fn from_identity(identity: &Identity) -> DbErrorResult<Self> {
        let roles = serde_json::to_string(&identity.role_strings())
            .map_err(|e| DbError::decode(format!("Failed to encode roles: {}", e)))?;

        Ok(Self {
            id: identity.id.to_string(),
            name: identity.name.as_str().to_string(),
            email: identity.email.as_str().to_string(),
            roles,
            password_hash: identity.credential_hash.as_bytes().to_vec(),
            department: identity.department.as_ref().map(|d| d.as_str().to_string()),
            enabled: identity.enabled,
            created_at: identity.created_at.timestamp_micros(),
            updated_at: identity.updated_at.timestamp_micros(),
        })
    }

    pub fn into_identity(self) -> DbErrorResult<Identity> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| DbError::decode(format!("Invalid UUID in identities.id: {}", e)))?;

        let name = Name::parse(&self.name)
            .map_err(|e| DbError::decode(format!("Invalid identities.name: {}", e)))?;

        let email = Email::parse(&self.email)
            .map_err(|e| DbError::decode(format!("Invalid identities.email: {}", e)))?;

        let role_strings: Vec<String> = serde_json::from_str(&self.roles)
            .map_err(|e| DbError::decode(format!("Invalid JSON in identities.roles: {}", e)))?;
        let roles = Role::parse_many(&role_strings)
            .map_err(|e| DbError::decode(format!("Invalid identities.roles: {}", e)))?;

        let credential_hash = CredentialHash::from_bytes(self.password_hash)
            .map_err(|e| DbError::decode(format!("Invalid identities.password_hash: {}", e)))?;

        let department = match self.department {
            Some(ref d) => Name::parse_optional(d)
                .map_err(|e| DbError::decode(format!("Invalid identities.department: {}", e)))?,
            None => None,
        };

        Ok(Identity {
            id,
            name,
            email,
            roles,
            credential_hash,
            department,
            enabled: self.enabled,
            created_at: timestamp(self.created_at, "created_at")?,
            updated_at: timestamp(self.updated_at, "updated_at")?,
        })
    }
}

fn timestamp(micros: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| DbError::decode(format!("Invalid timestamp in identities.{}", column)))
}
