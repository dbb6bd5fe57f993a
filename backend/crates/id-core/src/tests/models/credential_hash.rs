use crate::{CoreError, CredentialHash, PlaintextSecret};

use googletest::prelude::*;

#[test]
fn given_empty_hash_when_constructed_then_error() {
    let result = CredentialHash::new(String::new());

    assert!(matches!(
        result,
        Err(CoreError::InvalidCredentialHash { .. })
    ));
}

#[test]
fn given_hash_when_debug_formatted_then_redacted() {
    let hash = CredentialHash::new("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".to_string()).unwrap();

    let debug = format!("{:?}", hash);

    assert_that!(debug, not(contains_substring("argon2id")));
}

#[test]
fn given_non_utf8_bytes_when_rebuilt_then_error() {
    let result = CredentialHash::from_bytes(vec![0xff, 0xfe]);

    assert!(matches!(
        result,
        Err(CoreError::InvalidCredentialHash { .. })
    ));
}

#[test]
fn given_secret_when_debug_formatted_then_redacted() {
    let secret = PlaintextSecret::new("password123".to_string());

    assert_that!(format!("{:?}", secret), not(contains_substring("password123")));
    assert_eq!(secret.expose(), "password123");
}
