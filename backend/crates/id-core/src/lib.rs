pub mod error;
pub mod models;
pub mod store;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::credential_hash::CredentialHash;
pub use models::email::Email;
pub use models::identity::Identity;
pub use models::name::Name;
pub use models::new_identity::NewIdentity;
pub use models::plaintext_secret::PlaintextSecret;
pub use models::role::Role;
pub use models::update_identity::UpdateIdentity;
pub use store::store_error::{StoreError, StoreResult};
pub use store::storer::{Storer, TxStorer};

#[cfg(test)]
mod tests;
