
use id_core::{CredentialHash, Email, Identity, Name, Role};

use uuid::Uuid;

pub(crate) fn test_identity() -> Identity {
    let now = Identity::timestamp_now();
    Identity {
        id: Uuid::new_v4(),
        name: Name::parse("Token Holder").unwrap(),
        email: Email::parse("holder@example.com").unwrap(),
        roles: Role::parse_many(&["admin", "user"]).unwrap(),
        credential_hash: CredentialHash::new("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".to_string())
            .unwrap(),
        department: None,
        enabled: true,
        created_at: now,
        updated_at: now,
    }
}
