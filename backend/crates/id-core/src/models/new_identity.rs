use crate::{Email, Name, PlaintextSecret, Role};

/// Information needed to create a new identity. Transient: the password is
/// consumed by hashing and never stored.
#[derive(Debug)]
pub struct NewIdentity {
    pub name: Name,
    pub email: Email,
    pub roles: Vec<Role>,
    pub department: Option<Name>,
    pub password: PlaintextSecret,
}
