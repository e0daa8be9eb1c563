//! Tests for the domain user model.

use super::*;
use crate::domain::Password;
use rstest::{fixture, rstest};

#[fixture]
fn password_hash() -> PasswordHash {
    let password = Password::new("password").expect("valid password");
    PasswordHash::generate(&password).expect("hashing succeeds")
}

#[rstest]
#[case("test@example.com", "test@example.com")]
#[case("test@EXAMPLE.COM", "test@example.com")]
#[case("  Mixed.Case@Example.Org ", "mixed.case@example.org")]
fn email_is_trimmed_and_lower_cased(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
fn missing_email_is_rejected(#[case] raw: Option<&str>) {
    let err = EmailAddress::parse(raw).expect_err("empty email must fail");
    assert_eq!(err, UserValidationError::EmptyEmail);
}

#[rstest]
fn overly_long_email_is_rejected() {
    let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
    let err = EmailAddress::new(raw).expect_err("long email must fail");
    assert_eq!(err, UserValidationError::EmailTooLong { max: EMAIL_MAX });
}

#[rstest]
#[case(130, false)]
#[case(100, true)]
fn length_limit_applies_after_lower_casing(#[case] dotted_capitals: usize, #[case] fits: bool) {
    // 'İ' lower-cases to two characters.
    let raw = format!("{}@x.io", "İ".repeat(dotted_capitals));
    assert!(raw.chars().count() <= EMAIL_MAX);

    match EmailAddress::new(&raw) {
        Ok(email) => {
            assert!(fits, "expected rejection for {dotted_capitals} capitals");
            assert!(email.as_ref().chars().count() <= EMAIL_MAX);
        }
        Err(err) => {
            assert!(!fits, "expected acceptance for {dotted_capitals} capitals");
            assert_eq!(err, UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
    }
}

#[rstest]
fn email_deserialisation_normalises() {
    let email: EmailAddress =
        serde_json::from_str("\"Ada@Example.COM\"").expect("email deserialises");
    assert_eq!(email.as_ref(), "ada@example.com");
}

#[rstest]
fn regular_flags_grant_no_admin_rights(password_hash: PasswordHash) {
    let email = EmailAddress::new("test@example.com").expect("valid email");
    let user = NewUser::new(email, password_hash, UserFlags::regular()).into_user(UserId::new(7));

    assert_eq!(user.id(), UserId::new(7));
    assert!(user.is_active());
    assert!(!user.is_staff());
    assert!(!user.is_superuser());
}

#[rstest]
fn superuser_flags_grant_staff_and_superuser(password_hash: PasswordHash) {
    let email = EmailAddress::new("admin@example.com").expect("valid email");
    let user = User::new(UserId::new(1), email, password_hash, UserFlags::superuser());

    assert!(user.is_staff());
    assert!(user.is_superuser());
}

#[rstest]
fn check_password_verifies_against_hash(password_hash: PasswordHash) {
    let email = EmailAddress::new("test@example.com").expect("valid email");
    let user = User::new(UserId::new(1), email, password_hash, UserFlags::regular());

    assert!(user.check_password("password"));
    assert!(!user.check_password("Password"));
}

#[rstest]
fn user_id_serialises_as_number() {
    let value = serde_json::to_value(UserId::new(42)).expect("id serialises");
    assert_eq!(value, serde_json::json!(42));
}
