//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn draft() -> UserDraft {
    UserDraft::try_from_parts("John", "Doe", "john@example.com", 30, None)
        .expect("fixture draft is valid")
}

#[rstest]
#[case("Jo")]
#[case("Mary Ann")]
#[case("Jean\tLuc")]
fn person_name_accepts_letters_and_spaces(#[case] name: &str) {
    let parsed = PersonName::new(name).expect("valid name");
    assert_eq!(parsed.as_ref(), name);
}

#[rstest]
fn person_name_accepts_length_bounds() {
    assert!(PersonName::new("a".repeat(NAME_MIN)).is_ok());
    assert!(PersonName::new("a".repeat(NAME_MAX)).is_ok());
}

#[rstest]
#[case("", UserValidationError::EmptyName)]
#[case("   ", UserValidationError::EmptyName)]
#[case("J", UserValidationError::NameTooShort { min: NAME_MIN })]
#[case("O'Brien", UserValidationError::NameInvalidCharacters)]
#[case("John3", UserValidationError::NameInvalidCharacters)]
#[case("Zoë", UserValidationError::NameInvalidCharacters)]
#[case("John\u{00A0}Doe", UserValidationError::NameInvalidCharacters)]
#[case("Jo\u{2003}", UserValidationError::NameInvalidCharacters)]
#[case("\u{3000}Ann", UserValidationError::NameInvalidCharacters)]
fn person_name_rejects_invalid_input(#[case] name: &str, #[case] expected: UserValidationError) {
    assert_eq!(PersonName::new(name), Err(expected));
}

#[rstest]
fn person_name_rejects_overlong_input() {
    let result = PersonName::new("a".repeat(NAME_MAX + 1));
    assert_eq!(
        result,
        Err(UserValidationError::NameTooLong { max: NAME_MAX })
    );
}

#[rstest]
#[case("john@example.com")]
#[case("john.doe+tag@mail.example.co.uk")]
#[case("admin@localhost")]
#[case("josé@example.com")]
#[case("user@münchen.de")]
fn email_accepts_valid_addresses(#[case] email: &str) {
    assert!(EmailAddress::new(email).is_ok());
}

#[rstest]
fn email_accepts_length_bounds() {
    let local = format!("{}@example.com", "a".repeat(64));
    let label = format!("john@{}.com", "b".repeat(63));
    assert!(EmailAddress::new(local).is_ok());
    assert!(EmailAddress::new(label).is_ok());
}

#[rstest]
#[case(format!("{}@example.com", "a".repeat(65)))]
#[case(format!("john@{}.com", "b".repeat(64)))]
#[case(format!("john@{}", vec!["c".repeat(60); 5].join(".")))]
fn email_rejects_overlong_parts(#[case] email: String) {
    assert_eq!(
        EmailAddress::new(email),
        Err(UserValidationError::InvalidEmail)
    );
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("  ", UserValidationError::EmptyEmail)]
#[case("john", UserValidationError::InvalidEmail)]
#[case("john@", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("john doe@example.com", UserValidationError::InvalidEmail)]
#[case("john@@example.com", UserValidationError::InvalidEmail)]
#[case("john@-example.com", UserValidationError::InvalidEmail)]
#[case("john@example-.com", UserValidationError::InvalidEmail)]
#[case("john@example..com", UserValidationError::InvalidEmail)]
#[case("john.@example.com", UserValidationError::InvalidEmail)]
fn email_rejects_invalid_addresses(#[case] email: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(email), Err(expected));
}

#[rstest]
fn email_comparison_is_case_sensitive() {
    let lower = EmailAddress::new("john@example.com").expect("valid email");
    let upper = EmailAddress::new("John@example.com").expect("valid email");
    assert_ne!(lower, upper);
}

#[rstest]
#[case(0)]
#[case(30)]
#[case(150)]
fn age_accepts_inclusive_range(#[case] years: i64) {
    let age = Age::new(years).expect("age in range");
    assert_eq!(i64::from(age.years()), years);
}

#[rstest]
#[case(-1)]
#[case(151)]
#[case(256)]
#[case(i64::MAX)]
fn age_rejects_out_of_range(#[case] years: i64) {
    assert_eq!(
        Age::new(years),
        Err(UserValidationError::AgeOutOfRange {
            min: AGE_MIN,
            max: AGE_MAX
        })
    );
}

#[rstest]
#[case("+15551234567")]
#[case("15551234567")]
#[case("+44")]
#[case("+123456789012345")]
fn phone_number_accepts_international_format(#[case] number: &str) {
    assert!(PhoneNumber::new(number).is_ok());
}

#[rstest]
#[case("")]
#[case("+1")]
#[case("+0123456")]
#[case("+1-555-123-4567")]
#[case("+1234567890123456")]
#[case("+١٢٣٤")]
fn phone_number_rejects_other_formats(#[case] number: &str) {
    assert_eq!(
        PhoneNumber::new(number),
        Err(UserValidationError::InvalidPhoneNumber)
    );
}

#[rstest]
fn try_from_parts_reports_first_invalid_field() {
    let result = UserDraft::try_from_parts("J", "D", "not-an-email", 200, None);
    assert_eq!(
        result,
        Err(UserValidationError::NameTooShort { min: NAME_MIN })
    );
}

#[rstest]
fn try_from_parts_validates_optional_phone() {
    let result =
        UserDraft::try_from_parts("John", "Doe", "john@example.com", 30, Some("abc".to_owned()));
    assert_eq!(result, Err(UserValidationError::InvalidPhoneNumber));
}

#[rstest]
fn user_serialises_in_camel_case(draft: UserDraft) {
    let user = User::new(UserId::new(7), draft);
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({
            "id": 7,
            "firstName": "John",
            "lastName": "Doe",
            "email": "john@example.com",
            "age": 30,
            "phoneNumber": null
        })
    );
}

#[rstest]
fn user_deserialises_and_validates() {
    let value = json!({
        "id": 3,
        "firstName": "Jane",
        "lastName": "Smith",
        "email": "jane@example.com",
        "age": 25,
        "phoneNumber": "+15550001111"
    });
    let user: User = serde_json::from_value(value).expect("valid user payload");
    assert_eq!(user.id(), UserId::new(3));
    assert_eq!(
        user.draft().phone_number().map(AsRef::as_ref),
        Some("+15550001111")
    );

    let invalid = json!({
        "id": 3,
        "firstName": "Jane",
        "lastName": "Smith",
        "email": "jane@example.com",
        "age": 151
    });
    assert!(serde_json::from_value::<User>(invalid).is_err());
}
