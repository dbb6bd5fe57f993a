use crate::{Email, Name, PlaintextSecret, Role};

/// Partial update of an identity. `None` leaves the field unchanged.
///
/// `department: Some(None)` clears the department.
#[derive(Debug, Default)]
pub struct UpdateIdentity {
    pub name: Option<Name>,
    pub email: Option<Email>,
    pub roles: Option<Vec<Role>>,
    pub department: Option<Option<Name>>,
    pub password: Option<PlaintextSecret>,
    pub enabled: Option<bool>,
}
