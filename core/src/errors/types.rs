//! Field-scoped validation errors and the normalized gateway error type.
//!
//! Remote endpoints report failure through inconsistent response shapes;
//! those are normalized into [`GatewayError`] at the transport boundary so
//! the workflow only ever sees one discriminated result type.

use serde::Serialize;
use thiserror::Error;

/// Form fields an error can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Phone,
    Email,
    Password,
    ConfirmPassword,
    Terms,
    Code,
    NewPassword,
}

/// Client-side validation failures, one variant per failing predicate.
///
/// Each variant carries its own user-facing message so a host can render
/// them inline without further mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Name must be at least 2 characters long")]
    NameTooShort,

    #[error("Phone number must be exactly 10 digits")]
    PhoneNotTenDigits,

    #[error("Please enter a valid email address")]
    EmailInvalid,

    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,

    #[error("Password must include both uppercase and lowercase letters")]
    PasswordMissingCaseMix,

    #[error("Password must include a number and a special character")]
    PasswordMissingNumberOrSymbol,

    #[error("Passwords do not match")]
    PasswordsDoNotMatch,

    #[error("You must agree to the Terms of Use")]
    TermsNotAccepted,

    #[error("Please enter the complete {width}-digit code")]
    CodeIncomplete { width: usize },
}

/// A validation failure tied to the field it occurred on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: Field,
    pub error: FieldError,
}

impl FieldIssue {
    pub fn new(field: Field, error: FieldError) -> Self {
        Self { field, error }
    }

    /// The user-facing message for this issue.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

/// Normalized outcome of a failed remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The call completed but the API reported failure (wrong code,
    /// already-registered email, ...). Carries the server's message.
    #[error("{message}")]
    Rejected { message: String },

    /// The call never produced a usable reply: network unreachable,
    /// non-2xx status, or a malformed body.
    #[error("network error: {detail}")]
    Transport { detail: String },
}
