#![allow(dead_code)]

mod counting_store;

pub use counting_store::CountingStore;

use id_business::IdentityService;
use id_cache::CachedStore;
use id_core::{Email, Name, NewIdentity, PlaintextSecret, Role, Storer};
use id_db::IdentityRepository;

use std::sync::Arc;
use std::time::Duration;

/// Service over cache over counter over in-memory SQLite.
///
/// The counter sits below the cache so it only sees calls that miss it.
pub async fn create_test_service() -> (IdentityService, Arc<CountingStore>) {
    let pool = id_db::connect_in_memory()
        .await
        .expect("Failed to create test pool");

    let counting = Arc::new(CountingStore::new(IdentityRepository::new(pool)));
    let cached = CachedStore::new(Arc::clone(&counting), Duration::from_secs(60));
    let store: Arc<dyn Storer> = Arc::new(cached);

    (IdentityService::new(store), counting)
}

pub fn new_identity(email: &str, password: &str) -> NewIdentity {
    NewIdentity {
        name: Name::parse("Test User").unwrap(),
        email: Email::parse(email).unwrap(),
        roles: Vec::new(),
        department: None,
        password: PlaintextSecret::new(password.to_string()),
    }
}

pub fn new_identity_with_roles(email: &str, roles: &[&str]) -> NewIdentity {
    NewIdentity {
        roles: Role::parse_many(roles).unwrap(),
        department: Some(Name::parse("Engineering").unwrap()),
        ..new_identity(email, "password123")
    }
}

pub fn secret(value: &str) -> PlaintextSecret {
    PlaintextSecret::new(value.to_string())
}

pub fn email(value: &str) -> Email {
    Email::parse(value).unwrap()
}
