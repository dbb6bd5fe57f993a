use crate::{ApiError, ApiResult};

use id_core::{Email, Name, NewIdentity, PlaintextSecret, Role};

use serde::Deserialize;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Body of `POST /v1/register`.
///
/// Missing fields deserialize as empty so they are reported per field.
/// No `Debug`: the struct holds plaintext passwords.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub password: String,
    pub password_confirm: String,
    pub roles: Vec<String>,
}

impl RegisterRequest {
    /// Validate every field and build the identity to create.
    pub fn into_new_identity(self) -> ApiResult<NewIdentity> {
        let Self {
            name,
            email,
            department,
            password,
            password_confirm,
            roles,
        } = self;

        let password = PlaintextSecret::new(password);
        let password_confirm = PlaintextSecret::new(password_confirm);

        if name.trim().is_empty() {
            return Err(ApiError::validation("name", "name is required"));
        }
        let name =
            Name::parse(&name).map_err(|e| ApiError::validation("name", e.client_message()))?;

        if email.trim().is_empty() {
            return Err(ApiError::validation("email", "email is required"));
        }
        let email = Email::parse(&email)
            .map_err(|e| ApiError::validation("email", e.client_message()))?;

        if password.is_empty() {
            return Err(ApiError::validation("password", "password is required"));
        }
        let length = password.expose().chars().count();
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
            return Err(ApiError::validation(
                "password",
                format!(
                    "password must be between {} and {} characters",
                    MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
                ),
            ));
        }
        if password.expose() != password_confirm.expose() {
            return Err(ApiError::validation(
                "password_confirm",
                "passwords do not match",
            ));
        }

        let department = match department {
            Some(department) => Name::parse_optional(&department)
                .map_err(|e| ApiError::validation("department", e.client_message()))?,
            None => None,
        };

        let roles = Role::parse_many(roles.as_slice())
            .map_err(|e| ApiError::validation("roles", e.client_message()))?;

        Ok(NewIdentity {
            name,
            email,
            roles,
            department,
            password,
        })
    }
}
