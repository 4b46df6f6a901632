//! Verification session entity tracking one in-flight code attempt.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::fields::FormFields;

/// The step a verification attempt is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// Initiating form data is being collected.
    Collecting,
    /// A code has been requested and the user is entering it.
    AwaitingCode,
    /// The code was accepted. Terminal.
    Verified,
}

/// An issued code the session is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IssuedCode {
    expires_at: DateTime<Utc>,
    session_id: Uuid,
}

/// In-memory record of one code-verification attempt.
///
/// Holds the identifier the code was sent to, the form data collected
/// before the code was requested (re-submitted verbatim with every call),
/// and the expiry of the currently issued code. The expiry exists only
/// while the session is in [`AttemptState::AwaitingCode`]; every other
/// state clears it. Sessions are never persisted.
#[derive(Debug, Clone)]
pub struct VerificationSession {
    subject: String,
    pending_form: FormFields,
    state: AttemptState,
    issued: Option<IssuedCode>,
}

impl VerificationSession {
    /// Creates a session in the `Collecting` state.
    ///
    /// # Arguments
    ///
    /// * `subject` - The email or phone the code will be sent to
    /// * `pending_form` - Form data collected at the initiating step
    pub fn new(subject: impl Into<String>, pending_form: FormFields) -> Self {
        Self {
            subject: subject.into(),
            pending_form,
            state: AttemptState::Collecting,
            issued: None,
        }
    }

    /// Records that a code was issued and moves to `AwaitingCode`.
    ///
    /// Replaces any previously issued code: the expiry is reset to
    /// `now + window_seconds` and a fresh session id is assigned.
    ///
    /// # Returns
    ///
    /// The session id of the newly issued code, for correlation in logs.
    pub fn await_code(&mut self, now: DateTime<Utc>, window_seconds: i64) -> Uuid {
        let session_id = Uuid::new_v4();
        self.state = AttemptState::AwaitingCode;
        self.issued = Some(IssuedCode {
            expires_at: now + Duration::seconds(window_seconds),
            session_id,
        });
        session_id
    }

    /// Returns to `Collecting` on explicit user cancel, discarding the
    /// issued code.
    pub fn back_to_collecting(&mut self) {
        self.state = AttemptState::Collecting;
        self.issued = None;
    }

    /// Marks the attempt verified. Terminal; the expiry is discarded.
    pub fn mark_verified(&mut self) {
        self.state = AttemptState::Verified;
        self.issued = None;
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn pending_form(&self) -> &FormFields {
        &self.pending_form
    }

    /// Expiry of the currently issued code, if awaiting one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.issued.map(|i| i.expires_at)
    }

    /// Session id of the currently issued code, if awaiting one.
    pub fn session_id(&self) -> Option<Uuid> {
        self.issued.map(|i| i.session_id)
    }

    /// Seconds until the issued code goes stale, rounded to the nearest
    /// second and clamped at zero. Zero when no code is outstanding.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        match self.issued {
            Some(issued) => {
                let millis = (issued.expires_at - now).num_milliseconds();
                if millis <= 0 {
                    0
                } else {
                    (millis + 500) / 1000
                }
            }
            None => 0,
        }
    }

    /// Whether a resend may be requested: only while awaiting a code whose
    /// window has elapsed.
    pub fn resend_allowed(&self, now: DateTime<Utc>) -> bool {
        self.state == AttemptState::AwaitingCode && self.remaining_seconds(now) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fields::names;

    fn session() -> VerificationSession {
        let fields = FormFields::new().with(names::EMAIL, "asha@example.com");
        VerificationSession::new("asha@example.com", fields)
    }

    #[test]
    fn test_new_session_is_collecting_without_expiry() {
        let session = session();

        assert_eq!(session.state(), AttemptState::Collecting);
        assert_eq!(session.expires_at(), None);
        assert_eq!(session.remaining_seconds(Utc::now()), 0);
        assert!(!session.resend_allowed(Utc::now()));
    }

    #[test]
    fn test_await_code_sets_expiry_and_state() {
        let mut session = session();
        let now = Utc::now();

        session.await_code(now, 120);
        assert_eq!(session.state(), AttemptState::AwaitingCode);
        assert_eq!(session.expires_at(), Some(now + Duration::seconds(120)));
        assert_eq!(session.remaining_seconds(now), 120);
        assert!(!session.resend_allowed(now));
    }

    #[test]
    fn test_new_code_request_replaces_previous_expiry() {
        let mut session = session();
        let now = Utc::now();

        let first = session.await_code(now, 120);
        let later = now + Duration::seconds(90);
        let second = session.await_code(later, 120);

        assert_ne!(first, second);
        assert_eq!(session.expires_at(), Some(later + Duration::seconds(120)));
        assert_eq!(session.remaining_seconds(later), 120);
    }

    #[test]
    fn test_remaining_seconds_clamps_at_zero() {
        let mut session = session();
        let now = Utc::now();

        session.await_code(now, 60);
        let after_expiry = now + Duration::seconds(61);
        assert_eq!(session.remaining_seconds(after_expiry), 0);
        assert!(session.resend_allowed(after_expiry));
    }

    #[test]
    fn test_remaining_seconds_rounds_to_nearest() {
        let mut session = session();
        let now = Utc::now();

        session.await_code(now, 60);
        let late = now + Duration::milliseconds(400);
        assert_eq!(session.remaining_seconds(late), 60);
        let later = now + Duration::milliseconds(600);
        assert_eq!(session.remaining_seconds(later), 59);
    }

    #[test]
    fn test_back_to_collecting_discards_issued_code() {
        let mut session = session();
        let now = Utc::now();

        session.await_code(now, 120);
        session.back_to_collecting();

        assert_eq!(session.state(), AttemptState::Collecting);
        assert_eq!(session.expires_at(), None);
        assert_eq!(session.session_id(), None);
    }

    #[test]
    fn test_mark_verified_discards_issued_code() {
        let mut session = session();
        let now = Utc::now();

        session.await_code(now, 120);
        session.mark_verified();

        assert_eq!(session.state(), AttemptState::Verified);
        assert_eq!(session.expires_at(), None);
        assert!(!session.resend_allowed(now + Duration::seconds(300)));
    }

    #[test]
    fn test_pending_form_is_kept_verbatim() {
        let fields = FormFields::new()
            .with(names::NAME, "Asha Rao")
            .with(names::EMAIL, "asha@example.com");
        let session = VerificationSession::new("asha@example.com", fields.clone());

        assert_eq!(session.pending_form(), &fields);
        assert_eq!(session.subject(), "asha@example.com");
    }
}
