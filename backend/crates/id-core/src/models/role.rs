use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

const DEFAULT_ROLE: &str = "USER";

/// An opaque role tag. Roles are normalized to uppercase and carried through
/// to token claims without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Role(String);

impl Role {
    #[track_caller]
    pub fn parse(value: &str) -> CoreErrorResult<Self> {
        let normalized = value.trim().to_uppercase();

        if normalized.is_empty()
            || !normalized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(CoreError::InvalidRole {
                value: value.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self(normalized))
    }

    /// Parse a list of roles into an ordered set: duplicates are dropped,
    /// first occurrence wins.
    #[track_caller]
    pub fn parse_many<S: AsRef<str>>(values: &[S]) -> CoreErrorResult<Vec<Self>> {
        let mut roles: Vec<Self> = Vec::with_capacity(values.len());
        for value in values {
            let role = Self::parse(value.as_ref())?;
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        Ok(roles)
    }

    /// Roles assigned when a new identity is created without any.
    pub fn defaults() -> Vec<Self> {
        vec![Self(DEFAULT_ROLE.to_string())]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Flatten roles into the string form used by storage and token claims.
    pub fn to_strings(roles: &[Self]) -> Vec<String> {
        roles.iter().map(|r| r.0.clone()).collect()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
