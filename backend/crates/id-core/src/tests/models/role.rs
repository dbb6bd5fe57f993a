use crate::{CoreError, Role};

#[test]
fn given_lowercase_role_when_parsed_then_uppercased() {
    let role = Role::parse(" admin ").unwrap();

    assert_eq!(role.as_str(), "ADMIN");
}

#[test]
fn given_duplicate_roles_when_parsed_many_then_first_occurrence_order_kept() {
    let roles = Role::parse_many(&["user", "ADMIN", "User", "auditor"]).unwrap();

    assert_eq!(Role::to_strings(&roles), vec!["USER", "ADMIN", "AUDITOR"]);
}

#[test]
fn given_empty_or_punctuated_role_when_parsed_then_error() {
    assert!(matches!(Role::parse(""), Err(CoreError::InvalidRole { .. })));
    assert!(matches!(
        Role::parse("super-user"),
        Err(CoreError::InvalidRole { .. })
    ));
}

#[test]
fn given_no_roles_when_defaults_requested_then_user() {
    assert_eq!(Role::to_strings(&Role::defaults()), vec!["USER"]);
}
