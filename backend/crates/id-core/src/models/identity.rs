//! Identity entity - the stored account.

use crate::{CredentialHash, Email, Name, Role};

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

/// A registered account.
///
/// The `id` is assigned once by the business service. Timestamps are kept at
/// microsecond precision so a value read back from the durable store compares
/// equal to the value that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub name: Name,
    pub email: Email,
    /// Ordered set of role tags
    pub roles: Vec<Role>,
    pub credential_hash: CredentialHash,
    pub department: Option<Name>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Current time at the precision identities are stored with.
    pub fn timestamp_now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }

    /// Role tags in their string form, for claims and storage.
    pub fn role_strings(&self) -> Vec<String> {
        Role::to_strings(&self.roles)
    }
}
