use id_core::{CredentialHash, Email, Identity, Name, Role};

use uuid::Uuid;

/// Creates a test Identity with sensible defaults
pub fn create_test_identity(email: &str) -> Identity {
    let now = Identity::timestamp_now();
    Identity {
        id: Uuid::new_v4(),
        name: Name::parse("Test User").unwrap(),
        email: Email::parse(email).unwrap(),
        roles: Role::parse_many(&["user", "admin"]).unwrap(),
        credential_hash: CredentialHash::new(
            "$argon2id$v=19$m=8,t=1,p=1$c29tZXNhbHQ$aGFzaGhhc2hoYXNo".to_string(),
        )
        .unwrap(),
        department: Some(Name::parse("Engineering").unwrap()),
        enabled: true,
        created_at: now,
        updated_at: now,
    }
}
