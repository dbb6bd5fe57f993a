use crate::{ApiError, RegisterRequest};

use id_core::Role;

use googletest::prelude::*;

fn valid_request() -> RegisterRequest {
    RegisterRequest {
        name: "Ada Lovelace".into(),
        email: "Ada@Example.com".into(),
        department: Some("Engineering".into()),
        password: "password123".into(),
        password_confirm: "password123".into(),
        roles: vec!["admin".into()],
    }
}

fn field_of(error: ApiError) -> Option<String> {
    match error {
        ApiError::Validation { field, .. } => field,
        other => panic!("expected validation error, got {}", other),
    }
}

#[test]
fn given_valid_request_when_converted_then_fields_normalized() {
    let new_identity = valid_request().into_new_identity().unwrap();

    assert_eq!(new_identity.name.as_str(), "Ada Lovelace");
    assert_eq!(new_identity.email.as_str(), "ada@example.com");
    assert_eq!(Role::to_strings(&new_identity.roles), vec!["ADMIN"]);
    assert_eq!(
        new_identity.department.as_ref().map(|d| d.as_str()),
        Some("Engineering")
    );
    assert_eq!(new_identity.password.expose(), "password123");
}

#[test]
fn given_no_roles_and_blank_department_when_converted_then_empty_and_none() {
    let request = RegisterRequest {
        department: Some("".into()),
        roles: vec![],
        ..valid_request()
    };

    let new_identity = request.into_new_identity().unwrap();

    assert!(new_identity.roles.is_empty());
    assert_that!(new_identity.department, none());
}

#[test]
fn given_missing_name_when_converted_then_name_field_error() {
    let request = RegisterRequest {
        name: "  ".into(),
        ..valid_request()
    };

    let field = field_of(request.into_new_identity().unwrap_err());

    assert_eq!(field.as_deref(), Some("name"));
}

#[test]
fn given_malformed_email_when_converted_then_email_field_error() {
    let request = RegisterRequest {
        email: "not-an-email".into(),
        ..valid_request()
    };

    let field = field_of(request.into_new_identity().unwrap_err());

    assert_eq!(field.as_deref(), Some("email"));
}

#[test]
fn given_short_password_when_converted_then_password_field_error() {
    let request = RegisterRequest {
        password: "short".into(),
        password_confirm: "short".into(),
        ..valid_request()
    };

    let field = field_of(request.into_new_identity().unwrap_err());

    assert_eq!(field.as_deref(), Some("password"));
}

#[test]
fn given_mismatched_confirmation_when_converted_then_confirmation_field_error() {
    let request = RegisterRequest {
        password_confirm: "password124".into(),
        ..valid_request()
    };

    let field = field_of(request.into_new_identity().unwrap_err());

    assert_eq!(field.as_deref(), Some("password_confirm"));
}

#[test]
fn given_invalid_role_when_converted_then_roles_field_error() {
    let request = RegisterRequest {
        roles: vec!["bad role!".into()],
        ..valid_request()
    };

    let field = field_of(request.into_new_identity().unwrap_err());

    assert_eq!(field.as_deref(), Some("roles"));
}

#[test]
fn given_invalid_name_when_converted_then_message_has_no_source_location() {
    let request = RegisterRequest {
        name: "x".into(),
        ..valid_request()
    };

    match request.into_new_identity().unwrap_err() {
        ApiError::Validation { message, .. } => {
            assert_that!(message, not(contains_substring(".rs")))
        }
        other => panic!("expected validation error, got {}", other),
    }
}
