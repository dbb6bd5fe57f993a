use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

const MIN_NAME_LENGTH: usize = 3;
const MAX_NAME_LENGTH: usize = 20;

/// A validated person or department name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    /// Parse a name: trimmed, 3-20 characters of letters, digits, space, `'` or `-`.
    #[track_caller]
    pub fn parse(value: &str) -> CoreErrorResult<Self> {
        let trimmed = value.trim();
        let length = trimmed.chars().count();

        if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
            return Err(CoreError::InvalidName {
                value: value.to_string(),
                message: format!(
                    "must be between {} and {} characters",
                    MIN_NAME_LENGTH, MAX_NAME_LENGTH
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_alphanumeric() || matches!(c, ' ' | '\'' | '-')))
        {
            return Err(CoreError::InvalidName {
                value: value.to_string(),
                message: format!("contains invalid character '{}'", bad),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Parse a nullable name. An empty (or blank) value means "no name".
    #[track_caller]
    pub fn parse_optional(value: &str) -> CoreErrorResult<Option<Self>> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        Self::parse(value).map(Some)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
