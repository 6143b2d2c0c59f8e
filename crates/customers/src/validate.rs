//! Field rules for customer inputs.
//!
//! Each entry point returns either a normalized value or a validation
//! failure listing every offending field in declaration order. Checks never
//! panic on malformed data; a field stops at its first broken rule, but the
//! remaining fields are still checked.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use velora_core::{AppError, FieldError};

use crate::model::{CustomerPatch, Decision};

/// Earliest accepted birth date.
const MIN_BIRTH_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => panic!("1900-01-01 is a valid date"),
};

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;
const PASSWORD_MIN_CHARS: usize = 8;
const PHONE_MIN_DIGITS: usize = 10;
const PHONE_MAX_DIGITS: usize = 15;

/// Raw create payload as deserialized from the request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCustomerInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
}

/// Raw update payload. Only the mutable field subset is accepted; anything
/// else in the body is ignored by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomerInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
}

/// Raw approval decision payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecisionInput {
    pub status: Option<String>,
}

/// Create data after normalization.
///
/// The password is still plaintext here; the lifecycle service hashes it
/// before anything is persisted.
#[derive(Debug, Clone)]
pub struct ValidCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Validate and normalize a create payload, collecting every field failure.
pub fn validate_create(input: &CreateCustomerInput) -> Result<ValidCreate, AppError> {
    let mut errors = Vec::new();

    let first_name = check_required_name("first_name", input.first_name.as_deref(), &mut errors);
    let last_name = check_required_name("last_name", input.last_name.as_deref(), &mut errors);
    let email = check_email(input.email.as_deref(), &mut errors);
    let password = check_password(input.password.as_deref(), &mut errors);
    let phone = check_phone(input.phone.as_deref(), &mut errors);
    let birth_date = check_birth_date(input.birth_date.as_deref(), &mut errors);

    match (first_name, last_name, email, password) {
        (Some(first_name), Some(last_name), Some(email), Some(password))
            if errors.is_empty() =>
        {
            Ok(ValidCreate {
                first_name,
                last_name,
                email,
                password,
                phone,
                birth_date,
            })
        }
        _ => Err(AppError::validation_fields(errors)),
    }
}

/// Validate an update payload against the same field rules as creation.
///
/// An input carrying none of the mutable fields is rejected outright.
pub fn validate_update(input: &UpdateCustomerInput) -> Result<CustomerPatch, AppError> {
    let supplied = input.first_name.is_some()
        || input.last_name.is_some()
        || input.phone.is_some()
        || input.birth_date.is_some();
    if !supplied {
        return Err(AppError::validation("at least one field must be provided"));
    }

    let mut errors = Vec::new();
    let mut patch = CustomerPatch::default();

    if let Some(raw) = input.first_name.as_deref() {
        patch.first_name = check_name("first_name", raw, &mut errors);
    }
    if let Some(raw) = input.last_name.as_deref() {
        patch.last_name = check_name("last_name", raw, &mut errors);
    }
    patch.phone = check_phone(input.phone.as_deref(), &mut errors);
    patch.birth_date = check_birth_date(input.birth_date.as_deref(), &mut errors);

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(AppError::validation_fields(errors))
    }
}

/// Parse an approval decision body.
pub fn parse_decision(input: &DecisionInput) -> Result<Decision, AppError> {
    match input.status.as_deref() {
        Some("approved") => Ok(Decision::Approved),
        Some("rejected") => Ok(Decision::Rejected),
        _ => Err(AppError::validation_fields(vec![FieldError::new(
            "status",
            "status must be either \"approved\" or \"rejected\"",
        )])),
    }
}

fn check_required_name(
    field: &'static str,
    value: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let Some(raw) = value else {
        errors.push(FieldError::new(field, format!("{field} is required")));
        return None;
    };
    check_name(field, raw, errors)
}

/// Trim, then enforce length, character class, and the repeated-run rule.
fn check_name(field: &'static str, raw: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&length) {
        errors.push(FieldError::new(
            field,
            format!("{field} must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"),
        ));
        return None;
    }
    if !trimmed.chars().all(|c| c.is_alphabetic() || c == ' ') {
        errors.push(FieldError::new(
            field,
            format!("{field} may only contain letters and spaces"),
        ));
        return None;
    }
    if has_repeated_run(trimmed) {
        errors.push(FieldError::new(
            field,
            format!("{field} must not repeat the same character more than twice"),
        ));
        return None;
    }
    Some(trimmed.to_string())
}

/// True when the text carries three or more identical consecutive
/// characters. Letters are compared after case folding, so "Aaa" counts as
/// a run of three.
fn has_repeated_run(text: &str) -> bool {
    let mut previous: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        let folded = c.to_lowercase().next().unwrap_or(c);
        if previous == Some(folded) {
            run += 1;
            if run >= 3 {
                return true;
            }
        } else {
            previous = Some(folded);
            run = 1;
        }
    }
    false
}

fn check_email(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    let Some(raw) = value else {
        errors.push(FieldError::new("email", "email is required"));
        return None;
    };
    let trimmed = raw.trim();
    if !is_valid_email(trimmed) {
        errors.push(FieldError::new(
            "email",
            "email must be a valid email address",
        ));
        return None;
    }
    Some(trimmed.to_lowercase())
}

fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if domain.contains('@') || s.chars().any(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// The password is never trimmed or otherwise altered.
fn check_password(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    let Some(raw) = value else {
        errors.push(FieldError::new("password", "password is required"));
        return None;
    };
    if raw.chars().count() < PASSWORD_MIN_CHARS {
        errors.push(FieldError::new(
            "password",
            format!("password must be at least {PASSWORD_MIN_CHARS} characters"),
        ));
        return None;
    }
    let has_upper = raw.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = raw.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = raw.chars().any(|c| c.is_ascii_digit());
    if !(has_upper && has_lower && has_digit) {
        errors.push(FieldError::new(
            "password",
            "password must contain at least one uppercase letter, one lowercase letter and one digit",
        ));
        return None;
    }
    Some(raw.to_string())
}

fn check_phone(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    let raw = value?;
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let all_digits = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    if !all_digits || !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
        errors.push(FieldError::new(
            "phone",
            format!(
                "phone must be {PHONE_MIN_DIGITS} to {PHONE_MAX_DIGITS} digits with an optional leading +"
            ),
        ));
        return None;
    }
    Some(raw.to_string())
}

/// A range failure reports its own message, never the generic format one.
fn check_birth_date(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
    let raw = value?;
    let parsed = if looks_like_iso_date(raw) {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    } else {
        None
    };
    let Some(date) = parsed else {
        errors.push(FieldError::new(
            "birth_date",
            "birth_date must be a valid date in YYYY-MM-DD format",
        ));
        return None;
    };
    let today = Utc::now().date_naive();
    if date > today {
        errors.push(FieldError::new(
            "birth_date",
            "birth_date must not be in the future",
        ));
        return None;
    }
    if date < MIN_BIRTH_DATE {
        errors.push(FieldError::new(
            "birth_date",
            "birth_date must not be before 1900-01-01",
        ));
        return None;
    }
    Some(date)
}

fn looks_like_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9]
            .into_iter()
            .all(|i| bytes[i].is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn valid_create_input() -> CreateCustomerInput {
        CreateCustomerInput {
            first_name: Some("Ana".to_string()),
            last_name: Some("Lopez".to_string()),
            email: Some("ana@x.com".to_string()),
            password: Some("Abcdef12".to_string()),
            phone: None,
            birth_date: None,
        }
    }

    fn field_messages(err: &AppError) -> Vec<String> {
        err.details().iter().map(|d| d.field.clone()).collect()
    }

    #[test]
    fn create_accepts_minimal_valid_input() {
        let valid = validate_create(&valid_create_input()).expect("input should validate");
        assert_eq!(valid.first_name, "Ana");
        assert_eq!(valid.last_name, "Lopez");
        assert_eq!(valid.email, "ana@x.com");
        assert_eq!(valid.password, "Abcdef12");
        assert!(valid.phone.is_none());
        assert!(valid.birth_date.is_none());
    }

    #[test]
    fn create_normalizes_email_and_trims_names() {
        let input = CreateCustomerInput {
            first_name: Some("  Ana  ".to_string()),
            last_name: Some(" Lopez ".to_string()),
            email: Some("  ANA@X.COM  ".to_string()),
            ..valid_create_input()
        };
        let valid = validate_create(&input).expect("input should validate");
        assert_eq!(valid.first_name, "Ana");
        assert_eq!(valid.last_name, "Lopez");
        assert_eq!(valid.email, "ana@x.com");
    }

    #[test]
    fn create_collects_all_missing_fields_in_order() {
        let input = CreateCustomerInput::default();
        let Err(err) = validate_create(&input) else {
            panic!("empty input should not validate");
        };
        assert_eq!(
            field_messages(&err),
            vec!["first_name", "last_name", "email", "password"]
        );
    }

    #[test]
    fn create_collects_failures_across_fields() {
        let input = CreateCustomerInput {
            first_name: Some("A".to_string()),
            last_name: Some("L0pez".to_string()),
            email: Some("not-an-email".to_string()),
            password: Some("short".to_string()),
            phone: Some("123".to_string()),
            birth_date: Some("2999-01-01".to_string()),
        };
        let Err(err) = validate_create(&input) else {
            panic!("input should not validate");
        };
        assert_eq!(
            field_messages(&err),
            vec![
                "first_name",
                "last_name",
                "email",
                "password",
                "phone",
                "birth_date"
            ]
        );
    }

    #[test]
    fn names_reject_length_out_of_bounds() {
        for (value, ok) in [
            ("A", false),
            ("Al", true),
            (&"a".repeat(51), false),
            (&format!("Ab{}", "cd".repeat(24)), true),
        ] {
            let input = CreateCustomerInput {
                first_name: Some(value.to_string()),
                ..valid_create_input()
            };
            assert_eq!(validate_create(&input).is_ok(), ok, "value: {value:?}");
        }
    }

    #[test]
    fn names_accept_accented_letters_and_spaces() {
        let input = CreateCustomerInput {
            first_name: Some("José María".to_string()),
            last_name: Some("Muñoz Ibáñez".to_string()),
            ..valid_create_input()
        };
        assert!(validate_create(&input).is_ok());
    }

    #[test]
    fn names_reject_digits_and_punctuation() {
        for bad in ["L0pez", "Ana-Maria", "O'Brien", "Ana!"] {
            let input = CreateCustomerInput {
                last_name: Some(bad.to_string()),
                ..valid_create_input()
            };
            let Err(err) = validate_create(&input) else {
                panic!("{bad:?} should be rejected");
            };
            assert_eq!(field_messages(&err), vec!["last_name"]);
        }
    }

    #[test]
    fn names_reject_three_identical_consecutive_characters() {
        for bad in ["Aaanna", "Annna", "Jooosé", "aaa"] {
            let input = CreateCustomerInput {
                first_name: Some(bad.to_string()),
                ..valid_create_input()
            };
            let Err(err) = validate_create(&input) else {
                panic!("{bad:?} should be rejected");
            };
            assert_eq!(err.details()[0].field, "first_name");
            assert!(err.details()[0].message.contains("twice"));
        }
    }

    #[test]
    fn names_accept_runs_of_two() {
        for good in ["Ana", "Anna", "Aabb", "Lee Aaron"] {
            let input = CreateCustomerInput {
                first_name: Some(good.to_string()),
                ..valid_create_input()
            };
            assert!(validate_create(&input).is_ok(), "value: {good:?}");
        }
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for bad in ["plain", "@x.com", "a@", "a@b", "a b@x.com", "a@x..", "a@@x.com"] {
            let input = CreateCustomerInput {
                email: Some(bad.to_string()),
                ..valid_create_input()
            };
            let Err(err) = validate_create(&input) else {
                panic!("{bad:?} should be rejected");
            };
            assert_eq!(field_messages(&err), vec!["email"]);
        }
    }

    #[test]
    fn password_requires_length_and_character_classes() {
        for (bad, expect_msg) in [
            ("Ab1", "at least 8"),
            ("abcdefg1", "uppercase"),
            ("ABCDEFG1", "uppercase"),
            ("Abcdefgh", "uppercase"),
        ] {
            let input = CreateCustomerInput {
                password: Some(bad.to_string()),
                ..valid_create_input()
            };
            let Err(err) = validate_create(&input) else {
                panic!("{bad:?} should be rejected");
            };
            assert_eq!(err.details()[0].field, "password");
            assert!(
                err.details()[0].message.contains(expect_msg),
                "message for {bad:?}: {}",
                err.details()[0].message
            );
        }
    }

    #[test]
    fn password_is_never_trimmed() {
        let input = CreateCustomerInput {
            password: Some("  Abcdef12  ".to_string()),
            ..valid_create_input()
        };
        let valid = validate_create(&input).expect("padded password is still valid");
        assert_eq!(valid.password, "  Abcdef12  ");
    }

    #[test]
    fn phone_accepts_ten_to_fifteen_digits_with_optional_plus() {
        for good in ["1234567890", "+15551234567", "123456789012345"] {
            let input = CreateCustomerInput {
                phone: Some(good.to_string()),
                ..valid_create_input()
            };
            let valid = validate_create(&input).expect("phone should validate");
            assert_eq!(valid.phone.as_deref(), Some(good));
        }
    }

    #[test]
    fn phone_rejects_bad_shapes() {
        for bad in ["123", "1234567890123456", "+", "12345abcde", "55-512-3456"] {
            let input = CreateCustomerInput {
                phone: Some(bad.to_string()),
                ..valid_create_input()
            };
            let Err(err) = validate_create(&input) else {
                panic!("{bad:?} should be rejected");
            };
            assert_eq!(field_messages(&err), vec!["phone"]);
        }
    }

    #[test]
    fn birth_date_accepts_valid_past_dates() {
        let input = CreateCustomerInput {
            birth_date: Some("2000-05-05".to_string()),
            ..valid_create_input()
        };
        let valid = validate_create(&input).expect("date should validate");
        assert_eq!(valid.birth_date, NaiveDate::from_ymd_opt(2000, 5, 5));
    }

    #[test]
    fn birth_date_range_failures_use_range_messages() {
        let future = CreateCustomerInput {
            birth_date: Some("2999-01-01".to_string()),
            ..valid_create_input()
        };
        let Err(err) = validate_create(&future) else {
            panic!("future date should be rejected");
        };
        assert!(err.details()[0].message.contains("future"));

        let ancient = CreateCustomerInput {
            birth_date: Some("1899-12-31".to_string()),
            ..valid_create_input()
        };
        let Err(err) = validate_create(&ancient) else {
            panic!("pre-1900 date should be rejected");
        };
        assert!(err.details()[0].message.contains("1900-01-01"));
    }

    #[test]
    fn birth_date_rejects_malformed_strings_with_format_message() {
        for bad in ["05-05-2000", "2000/05/05", "2000-13-05", "2000-02-31", "yesterday"] {
            let input = CreateCustomerInput {
                birth_date: Some(bad.to_string()),
                ..valid_create_input()
            };
            let Err(err) = validate_create(&input) else {
                panic!("{bad:?} should be rejected");
            };
            assert!(
                err.details()[0].message.contains("YYYY-MM-DD"),
                "message for {bad:?}: {}",
                err.details()[0].message
            );
        }
    }

    #[test]
    fn birth_date_boundary_values() {
        let min = CreateCustomerInput {
            birth_date: Some("1900-01-01".to_string()),
            ..valid_create_input()
        };
        assert!(validate_create(&min).is_ok());

        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let input = CreateCustomerInput {
            birth_date: Some(today),
            ..valid_create_input()
        };
        assert!(validate_create(&input).is_ok());
    }

    #[test]
    fn update_rejects_empty_input() {
        let Err(err) = validate_update(&UpdateCustomerInput::default()) else {
            panic!("empty update should be rejected");
        };
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("at least one field"));
        assert!(err.details().is_empty());
    }

    #[test]
    fn update_accepts_a_single_field() {
        let input = UpdateCustomerInput {
            phone: Some("+15551234567".to_string()),
            ..UpdateCustomerInput::default()
        };
        let patch = validate_update(&input).expect("update should validate");
        assert_eq!(patch.phone.as_deref(), Some("+15551234567"));
        assert!(patch.first_name.is_none());
        assert!(patch.last_name.is_none());
        assert!(patch.birth_date.is_none());
    }

    #[test]
    fn update_applies_the_same_name_rules_as_create() {
        let input = UpdateCustomerInput {
            first_name: Some("Aaanna".to_string()),
            ..UpdateCustomerInput::default()
        };
        let Err(err) = validate_update(&input) else {
            panic!("run rule should apply on update");
        };
        assert_eq!(err.details()[0].field, "first_name");
    }

    #[test]
    fn update_collects_multiple_field_failures() {
        let input = UpdateCustomerInput {
            first_name: Some("A".to_string()),
            phone: Some("nope".to_string()),
            birth_date: Some("1899-01-01".to_string()),
            ..UpdateCustomerInput::default()
        };
        let Err(err) = validate_update(&input) else {
            panic!("input should not validate");
        };
        assert_eq!(
            field_messages(&err),
            vec!["first_name", "phone", "birth_date"]
        );
    }

    #[test]
    fn decision_parses_the_two_allowed_values() {
        let approved = DecisionInput {
            status: Some("approved".to_string()),
        };
        assert_eq!(parse_decision(&approved), Ok(Decision::Approved));

        let rejected = DecisionInput {
            status: Some("rejected".to_string()),
        };
        assert_eq!(parse_decision(&rejected), Ok(Decision::Rejected));
    }

    #[test]
    fn decision_rejects_anything_else() {
        for bad in [None, Some("pending"), Some("APPROVED"), Some("")] {
            let input = DecisionInput {
                status: bad.map(str::to_string),
            };
            let Err(err) = parse_decision(&input) else {
                panic!("{bad:?} should be rejected");
            };
            assert_eq!(err.details()[0].field, "status");
        }
    }

    proptest! {
        #[test]
        fn names_without_long_runs_validate(name in "[A-Za-z]{2,30}") {
            let input = CreateCustomerInput {
                first_name: Some(name.clone()),
                ..valid_create_input()
            };
            let rejected = validate_create(&input).is_err();
            prop_assert_eq!(rejected, has_repeated_run(&name));
        }

        #[test]
        fn phones_of_valid_length_always_pass(digits in "[0-9]{10,15}", plus in any::<bool>()) {
            let phone = if plus { format!("+{digits}") } else { digits };
            let input = CreateCustomerInput {
                phone: Some(phone),
                ..valid_create_input()
            };
            prop_assert!(validate_create(&input).is_ok());
        }

        #[test]
        fn id_strings_of_digits_always_parse(id in 0i64..=i64::MAX) {
            let parsed: velora_core::CustomerId = id.to_string().parse().unwrap();
            prop_assert_eq!(parsed.as_i64(), id);
        }
    }
}
