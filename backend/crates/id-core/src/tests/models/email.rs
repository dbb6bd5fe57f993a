use crate::{CoreError, Email};

#[test]
fn given_mixed_case_email_with_whitespace_when_parsed_then_normalized() {
    let email = Email::parse("  Alice@Example.COM ").unwrap();

    assert_eq!(email.as_str(), "alice@example.com");
}

#[test]
fn given_same_address_in_different_case_when_parsed_then_equal() {
    let a = Email::parse("dup@x.com").unwrap();
    let b = Email::parse("DUP@X.com").unwrap();

    assert_eq!(a, b);
}

#[test]
fn given_malformed_addresses_when_parsed_then_invalid_email() {
    for raw in [
        "",
        "plainaddress",
        "@x.com",
        "a@",
        "a@b",
        "a@@x.com",
        "a@x..com",
        "a@.x.com",
        "a@x.com.",
        "a b@x.com",
    ] {
        let result = Email::parse(raw);
        assert!(
            matches!(result, Err(CoreError::InvalidEmail { .. })),
            "expected '{}' to be rejected",
            raw
        );
    }
}
