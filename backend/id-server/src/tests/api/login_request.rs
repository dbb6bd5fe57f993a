use crate::{ApiError, LoginRequest};

#[test]
fn given_valid_login_when_converted_then_email_normalized() {
    let request = LoginRequest {
        email: " User@X.com".into(),
        password: "password123".into(),
    };

    let (email, password) = request.into_credentials().unwrap();

    assert_eq!(email.as_str(), "user@x.com");
    assert_eq!(password.expose(), "password123");
}

#[test]
fn given_malformed_email_when_converted_then_unauthenticated() {
    let request = LoginRequest {
        email: "nope".into(),
        password: "password123".into(),
    };

    let result = request.into_credentials();

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}

#[test]
fn given_empty_password_when_converted_then_unauthenticated() {
    let request = LoginRequest {
        email: "user@x.com".into(),
        password: String::new(),
    };

    let result = request.into_credentials();

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}
