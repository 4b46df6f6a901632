//! Field validation for the collecting step.
//!
//! Predicates are cheap single-pass checks so hosts can recompute them on
//! every keystroke; [`validate_fields`] covers the live set and
//! [`validate_submission`] adds the submit-time-only terms guard.

use crate::domain::fields::{names, FormFields};
use crate::errors::{Field, FieldError, FieldIssue};
use crate::workflow::config::GuardSet;

/// The three independent password predicates, exposed separately so a host
/// can drive a per-predicate strength indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordChecks {
    /// At least 8 characters.
    pub length: bool,
    /// At least one lowercase and one uppercase letter.
    pub case_mix: bool,
    /// At least one digit and one non-alphanumeric character.
    pub number_and_symbol: bool,
}

impl PasswordChecks {
    pub fn all(&self) -> bool {
        self.length && self.case_mix && self.number_and_symbol
    }
}

/// Evaluates the three password predicates.
pub fn password_checks(password: &str) -> PasswordChecks {
    PasswordChecks {
        length: password.chars().count() >= 8,
        case_mix: password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase()),
        number_and_symbol: password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| !c.is_ascii_alphanumeric()),
    }
}

/// Strips everything but ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Input helper: strips non-digits and caps a phone number at 10 digits.
pub fn normalize_phone(raw: &str) -> String {
    let mut digits = digits_only(raw);
    digits.truncate(10);
    digits
}

/// A phone field is valid when it reduces to exactly 10 digits.
pub fn is_valid_phone(raw: &str) -> bool {
    digits_only(raw).chars().count() == 10
}

/// A display name is valid when it is at least 2 characters after trimming.
pub fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= 2
}

/// An email is valid when it has the shape `local@domain.tld`: a non-empty
/// local part, exactly one `@`, no whitespace, and a dot inside the domain
/// with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Validates the keystroke-eager field set against a guard set.
///
/// The email field is always checked; name, phone, and the password pair
/// only when the guard set requires them. Returns one issue per failing
/// predicate, in field order.
pub fn validate_fields(fields: &FormFields, guards: GuardSet) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    if guards.name && !is_valid_name(fields.get(names::NAME).unwrap_or("")) {
        issues.push(FieldIssue::new(Field::Name, FieldError::NameTooShort));
    }

    if guards.phone && !is_valid_phone(fields.get(names::PHONE).unwrap_or("")) {
        issues.push(FieldIssue::new(Field::Phone, FieldError::PhoneNotTenDigits));
    }

    if !is_valid_email(fields.get(names::EMAIL).unwrap_or("")) {
        issues.push(FieldIssue::new(Field::Email, FieldError::EmailInvalid));
    }

    if guards.password_pair {
        let password = fields.get(names::PASSWORD).unwrap_or("");
        let checks = password_checks(password);
        if !checks.length {
            issues.push(FieldIssue::new(Field::Password, FieldError::PasswordTooShort));
        }
        if !checks.case_mix {
            issues.push(FieldIssue::new(
                Field::Password,
                FieldError::PasswordMissingCaseMix,
            ));
        }
        if !checks.number_and_symbol {
            issues.push(FieldIssue::new(
                Field::Password,
                FieldError::PasswordMissingNumberOrSymbol,
            ));
        }
        if password != fields.get(names::CONFIRM_PASSWORD).unwrap_or("") {
            issues.push(FieldIssue::new(
                Field::ConfirmPassword,
                FieldError::PasswordsDoNotMatch,
            ));
        }
    }

    issues
}

/// Validates everything [`validate_fields`] does plus the submit-time-only
/// terms acknowledgment guard.
pub fn validate_submission(fields: &FormFields, guards: GuardSet) -> Vec<FieldIssue> {
    let mut issues = validate_fields(fields, guards);
    if guards.terms && fields.get(names::AGREED_TERMS) != Some("1") {
        issues.push(FieldIssue::new(Field::Terms, FieldError::TermsNotAccepted));
    }
    issues
}

/// Validates the final password-reset step: a new password of at least 8
/// characters with an exact-match confirmation.
pub fn validate_new_password(password: &str, confirm: &str) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    if password.chars().count() < 8 {
        issues.push(FieldIssue::new(
            Field::NewPassword,
            FieldError::PasswordTooShort,
        ));
    }
    if password != confirm {
        issues.push(FieldIssue::new(
            Field::ConfirmPassword,
            FieldError::PasswordsDoNotMatch,
        ));
    }
    issues
}
