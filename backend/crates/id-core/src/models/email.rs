use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

const MAX_EMAIL_LENGTH: usize = 254;

/// A validated, normalized (trimmed, lowercase) email address.
///
/// Uniqueness of identities is defined over the normalized form, so
/// `Alice@Example.com` and `alice@example.com` are the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    #[track_caller]
    pub fn parse(value: &str) -> CoreErrorResult<Self> {
        let normalized = value.trim().to_lowercase();

        if Self::is_well_formed(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(CoreError::InvalidEmail {
                value: value.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }

    fn is_well_formed(address: &str) -> bool {
        if address.is_empty()
            || address.len() > MAX_EMAIL_LENGTH
            || address.chars().any(|c| c.is_whitespace() || c.is_control())
        {
            return false;
        }

        match address.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !domain.contains("..")
            }
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
