use crate::{CoreError, Name};

use googletest::prelude::*;

#[test]
fn given_valid_name_when_parsed_then_trimmed() {
    let name = Name::parse("  Bill O'Neil-Smith ").unwrap();

    assert_eq!(name.as_str(), "Bill O'Neil-Smith");
}

#[test]
fn given_too_short_name_when_parsed_then_error() {
    let result = Name::parse("ab");

    assert!(matches!(result, Err(CoreError::InvalidName { .. })));
}

#[test]
fn given_too_long_name_when_parsed_then_error() {
    let result = Name::parse("abcdefghijklmnopqrstu");

    assert!(matches!(result, Err(CoreError::InvalidName { .. })));
}

#[test]
fn given_name_with_symbol_when_parsed_then_error_names_the_character() {
    let err = Name::parse("Robert; DROP").unwrap_err();

    assert_that!(err.to_string(), contains_substring("';'"));
}

#[test]
fn given_blank_department_when_parsed_optional_then_none() {
    assert_that!(Name::parse_optional("").unwrap(), none());
    assert_that!(Name::parse_optional("   ").unwrap(), none());
}

#[test]
fn given_department_when_parsed_optional_then_some() {
    let department = Name::parse_optional("Engineering").unwrap();

    assert_eq!(department, Some(Name::parse("Engineering").unwrap()));
}

#[test]
fn given_invalid_name_when_client_message_then_no_source_location() {
    let err = Name::parse("ab").unwrap_err();

    let message = err.client_message();

    assert_that!(message, starts_with("name must be between"));
    assert_that!(message, not(contains_substring(".rs")));
}
