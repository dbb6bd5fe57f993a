use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Salted one-way hash of a password, in PHC string format.
///
/// Deliberately not `Serialize`: the hash never leaves the process except
/// through the durable store.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    #[track_caller]
    pub fn new(phc: String) -> CoreErrorResult<Self> {
        if phc.is_empty() {
            return Err(CoreError::InvalidCredentialHash {
                message: "credential hash cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(Self(phc))
    }

    /// Rebuild from the binary column stored by the durable adapter.
    #[track_caller]
    pub fn from_bytes(bytes: Vec<u8>) -> CoreErrorResult<Self> {
        let phc = String::from_utf8(bytes).map_err(|e| CoreError::InvalidCredentialHash {
            message: format!("stored hash is not UTF-8: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        Self::new(phc)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CredentialHash(<redacted>)")
    }
}
