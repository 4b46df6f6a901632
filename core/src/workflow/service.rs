//! The verification workflow state machine.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::code_buffer::CodeBuffer;
use crate::domain::entities::session::{AttemptState, VerificationSession};
use crate::domain::fields::{names, FormFields};
use crate::errors::{Field, FieldError, FieldIssue, FlowError, FlowResult, GatewayError};
use crate::validation::{validate_fields, validate_new_password, validate_submission};

use super::config::{FlowConfig, GuardSet};
use super::countdown::Countdown;
use super::traits::{FlowView, VerificationGateway};
use super::types::{Control, ToastKind, NETWORK_ERROR_MESSAGE};

/// One verification flow instance: `Collecting → AwaitingCode → Verified`,
/// with an explicit back transition from `AwaitingCode`.
///
/// The flow owns the session, the code buffer, and the countdown; every
/// user-visible effect goes through the [`FlowView`] and every remote call
/// through the [`VerificationGateway`]. Methods take `&mut self`, so events
/// are processed strictly in delivery order and a completion for a
/// superseded session cannot land: the only cross-task state is the
/// countdown, which is aborted on every exit from `AwaitingCode`.
pub struct VerificationFlow<G, V>
where
    G: VerificationGateway,
    V: FlowView + 'static,
{
    gateway: Arc<G>,
    view: Arc<V>,
    config: FlowConfig,
    session: Option<VerificationSession>,
    buffer: CodeBuffer,
    countdown: Option<Countdown>,
    busy: Option<Control>,
}

impl<G, V> VerificationFlow<G, V>
where
    G: VerificationGateway,
    V: FlowView + 'static,
{
    /// Creates a flow in the `Collecting` state.
    pub fn new(gateway: Arc<G>, view: Arc<V>, config: FlowConfig) -> Self {
        let buffer = CodeBuffer::new(config.code_width);
        Self {
            gateway,
            view,
            config,
            session: None,
            buffer,
            countdown: None,
            busy: None,
        }
    }

    /// Current state of the flow.
    pub fn state(&self) -> AttemptState {
        self.session
            .as_ref()
            .map(|s| s.state())
            .unwrap_or(AttemptState::Collecting)
    }

    /// The in-progress code entry.
    pub fn buffer(&self) -> &CodeBuffer {
        &self.buffer
    }

    /// The active session, if the initiating form has been submitted.
    pub fn session(&self) -> Option<&VerificationSession> {
        self.session.as_ref()
    }

    /// Whether the resend window has elapsed.
    pub fn resend_allowed(&self) -> bool {
        self.countdown.as_ref().is_some_and(Countdown::is_expired)
    }

    /// Submits the initiating form: validates every guarded field, requests
    /// a code on success, and transitions to `AwaitingCode`.
    pub async fn submit_form(&mut self, fields: FormFields) -> FlowResult<()> {
        self.ensure_state(AttemptState::Collecting, "submit form")?;
        self.ensure_idle()?;

        let issues = validate_submission(&fields, self.config.guards);
        self.render_issues(&issues);
        if !issues.is_empty() {
            if let Some(terms) = issues.iter().find(|i| i.field == Field::Terms) {
                self.view.show_toast(ToastKind::Error, &terms.message());
            }
            self.view.show_toast(
                ToastKind::Error,
                "Please fix the errors in the form before submitting.",
            );
            tracing::debug!(
                issue_count = issues.len(),
                event = "submission_rejected",
                "Initiating form failed validation"
            );
            return Err(FlowError::Validation { issues });
        }

        self.busy = Some(Control::Submit);
        self.view.set_busy(Control::Submit, true);
        let result = self.gateway.request_code(&fields).await;
        self.busy = None;
        self.view.set_busy(Control::Submit, false);

        match result {
            Ok(reply) => {
                let subject = subject_of(&fields);
                let mut session = VerificationSession::new(subject, fields);
                let session_id =
                    session.await_code(Utc::now(), self.config.window_seconds as i64);
                tracing::info!(
                    subject = session.subject(),
                    session_id = %session_id,
                    event = "code_requested",
                    "Verification code requested"
                );
                self.view
                    .show_toast(ToastKind::Success, reply.message_or("OTP sent successfully!"));
                self.session = Some(session);
                self.enter_awaiting_code();
                Ok(())
            }
            Err(error) => {
                self.report_gateway_error(&error);
                Err(error.into())
            }
        }
    }

    /// Handles a keystroke on the focused code slot. Auto-submits when the
    /// buffer becomes complete.
    pub async fn press_digit(&mut self, ch: char) -> FlowResult<()> {
        self.ensure_state(AttemptState::AwaitingCode, "code entry")?;
        if self.buffer.press_digit(ch) {
            self.render_buffer();
        }
        if self.buffer.is_complete() && self.busy.is_none() {
            self.submit_code().await
        } else {
            Ok(())
        }
    }

    /// Handles a backspace on the focused code slot.
    pub fn press_backspace(&mut self) -> FlowResult<()> {
        self.ensure_state(AttemptState::AwaitingCode, "code entry")?;
        self.buffer.press_backspace();
        self.render_buffer();
        Ok(())
    }

    /// Handles pasted text in the code entry. Auto-submits when the paste
    /// fills the buffer.
    pub async fn paste_code(&mut self, text: &str) -> FlowResult<()> {
        self.ensure_state(AttemptState::AwaitingCode, "code entry")?;
        self.buffer.paste(text);
        self.render_buffer();
        if self.buffer.is_complete() && self.busy.is_none() {
            self.submit_code().await
        } else {
            Ok(())
        }
    }

    /// Submits the entered code. On acceptance the flow transitions to
    /// `Verified`; on rejection it stays in `AwaitingCode` with the entered
    /// digits retained.
    pub async fn submit_code(&mut self) -> FlowResult<()> {
        self.ensure_state(AttemptState::AwaitingCode, "code submit")?;
        self.ensure_idle()?;

        let code = match self.buffer.code() {
            Some(code) => code,
            None => {
                let issue = FieldIssue::new(
                    Field::Code,
                    FieldError::CodeIncomplete {
                        width: self.buffer.width(),
                    },
                );
                self.view.show_toast(ToastKind::Error, &issue.message());
                return Err(FlowError::Validation { issues: vec![issue] });
            }
        };

        let session = self.active_session("code submit")?;
        let fields = session.pending_form().clone();
        let session_id = session.session_id();

        self.busy = Some(Control::Verify);
        self.view.set_busy(Control::Verify, true);
        let result = self.gateway.verify_code(&fields, &code).await;
        self.busy = None;
        self.view.set_busy(Control::Verify, false);

        match result {
            Ok(reply) => {
                if let Some(session) = self.session.as_mut() {
                    session.mark_verified();
                }
                self.countdown = None;
                tracing::info!(
                    subject = self.session.as_ref().map(|s| s.subject()).unwrap_or(""),
                    session_id = ?session_id,
                    event = "code_verified",
                    "Verification code accepted"
                );
                self.view.show_step(AttemptState::Verified);
                self.view
                    .show_toast(ToastKind::Success, reply.message_or("Code verified."));
                Ok(())
            }
            Err(error) => {
                tracing::warn!(
                    session_id = ?session_id,
                    error = %error,
                    event = "code_rejected",
                    "Verification code not accepted"
                );
                // entered digits are retained; only success, resend, or
                // back clears them
                self.report_gateway_error_with(&error, "Invalid OTP");
                Err(error.into())
            }
        }
    }

    /// Requests a fresh code once the resend window has elapsed. Restarts
    /// the countdown and clears entered digits.
    pub async fn resend(&mut self) -> FlowResult<()> {
        self.ensure_state(AttemptState::AwaitingCode, "resend")?;
        self.ensure_idle()?;
        if !self.resend_allowed() {
            tracing::warn!(
                event = "resend_too_early",
                "Resend triggered before countdown reached zero"
            );
            return Err(FlowError::ResendNotReady);
        }

        let fields = self.active_session("resend")?.pending_form().clone();

        self.busy = Some(Control::Resend);
        self.view.set_busy(Control::Resend, true);
        let result = self.gateway.resend_code(&fields).await;
        self.busy = None;
        self.view.set_busy(Control::Resend, false);

        match result {
            Ok(reply) => {
                if let Some(session) = self.session.as_mut() {
                    let session_id =
                        session.await_code(Utc::now(), self.config.window_seconds as i64);
                    tracing::info!(
                        subject = session.subject(),
                        session_id = %session_id,
                        event = "code_resent",
                        "Verification code resent"
                    );
                }
                self.view
                    .show_toast(ToastKind::Success, reply.message_or("A new OTP has been sent!"));
                self.enter_awaiting_code();
                Ok(())
            }
            Err(error) => {
                // countdown was not restarted, so resend stays available
                self.view.set_resend_enabled(true);
                self.report_gateway_error_with(&error, "Unable to resend OTP");
                Err(error.into())
            }
        }
    }

    /// Explicit cancel: returns to `Collecting`, stops the countdown, and
    /// discards the session and entered digits.
    pub fn back(&mut self) -> FlowResult<()> {
        self.ensure_state(AttemptState::AwaitingCode, "back")?;
        self.countdown = None;
        if let Some(session) = self.session.take() {
            tracing::info!(
                subject = session.subject(),
                event = "back_to_form",
                "Verification cancelled, returning to form"
            );
        }
        self.buffer.clear();
        self.render_buffer();
        self.view.show_step(AttemptState::Collecting);
        Ok(())
    }

    /// Final password-reset step: validates and submits the new password.
    /// Only legal once the code has been verified.
    pub async fn complete_reset(
        &mut self,
        new_password: &str,
        confirm_password: &str,
    ) -> FlowResult<()> {
        self.ensure_state(AttemptState::Verified, "password reset")?;
        self.ensure_idle()?;

        let issues = validate_new_password(new_password, confirm_password);
        for field in [Field::NewPassword, Field::ConfirmPassword] {
            self.view.clear_field_error(field);
        }
        for issue in &issues {
            self.view.show_field_error(issue.field, &issue.message());
        }
        if !issues.is_empty() {
            return Err(FlowError::Validation { issues });
        }

        let mut fields = self
            .active_session("password reset")?
            .pending_form()
            .clone();
        fields.set(names::PASSWORD, new_password);

        self.busy = Some(Control::Finalize);
        self.view.set_busy(Control::Finalize, true);
        let result = self.gateway.finalize(&fields).await;
        self.busy = None;
        self.view.set_busy(Control::Finalize, false);

        match result {
            Ok(reply) => {
                tracing::info!(
                    subject = self.session.as_ref().map(|s| s.subject()).unwrap_or(""),
                    event = "reset_completed",
                    "Password reset completed"
                );
                self.view
                    .show_toast(ToastKind::Success, reply.message_or("Password updated."));
                Ok(())
            }
            Err(error) => {
                self.report_gateway_error(&error);
                Err(error.into())
            }
        }
    }

    /// Recomputes the keystroke-eager validators and re-renders the
    /// field-scoped errors. The terms guard is deliberately excluded; it is
    /// checked at submit time only.
    pub fn refresh_validation(&self, fields: &FormFields) -> Vec<FieldIssue> {
        let issues = validate_fields(fields, self.config.guards);
        self.render_issues(&issues);
        issues
    }

    /// Moves into `AwaitingCode` presentation: clears the code entry,
    /// switches the panel, and restarts the countdown.
    fn enter_awaiting_code(&mut self) {
        self.buffer.clear();
        self.render_buffer();
        self.view.show_step(AttemptState::AwaitingCode);
        self.countdown = Some(Countdown::start(
            Arc::clone(&self.view),
            self.config.window_seconds,
        ));
    }

    fn render_buffer(&self) {
        self.view.render_slots(self.buffer.slots());
        self.view.focus_slot(self.buffer.focused_slot());
    }

    fn render_issues(&self, issues: &[FieldIssue]) {
        for field in guarded_fields(self.config.guards) {
            self.view.clear_field_error(field);
        }
        for issue in issues {
            self.view.show_field_error(issue.field, &issue.message());
        }
    }

    fn report_gateway_error(&self, error: &GatewayError) {
        match error {
            GatewayError::Rejected { message } => {
                self.view.show_toast(ToastKind::Error, message);
            }
            GatewayError::Transport { detail } => {
                tracing::error!(detail = %detail, event = "transport_failure", "Remote call failed");
                self.view.show_toast(ToastKind::Error, NETWORK_ERROR_MESSAGE);
            }
        }
    }

    fn report_gateway_error_with(&self, error: &GatewayError, rejection_fallback: &str) {
        match error {
            GatewayError::Rejected { message } => {
                let message = if message.is_empty() { rejection_fallback } else { message };
                self.view.show_toast(ToastKind::Error, message);
            }
            GatewayError::Transport { .. } => self.report_gateway_error(error),
        }
    }

    fn active_session(&self, action: &'static str) -> FlowResult<&VerificationSession> {
        self.session.as_ref().ok_or(FlowError::NotAllowed {
            action,
            state: AttemptState::Collecting,
        })
    }

    fn ensure_state(&self, expected: AttemptState, action: &'static str) -> FlowResult<()> {
        let state = self.state();
        if state != expected {
            tracing::warn!(
                action = action,
                state = ?state,
                event = "illegal_transition",
                "Action ignored in current state"
            );
            return Err(FlowError::NotAllowed { action, state });
        }
        Ok(())
    }

    fn ensure_idle(&self) -> FlowResult<()> {
        if self.busy.is_some() {
            tracing::debug!(event = "trigger_dropped", "Request already in flight");
            return Err(FlowError::Busy);
        }
        Ok(())
    }
}

/// The identifier the code is sent to: the email field when present,
/// otherwise the phone field.
fn subject_of(fields: &FormFields) -> String {
    fields
        .get(names::EMAIL)
        .or_else(|| fields.get(names::PHONE))
        .unwrap_or_default()
        .to_string()
}

/// Fields whose inline errors are owned by the given guard set.
fn guarded_fields(guards: GuardSet) -> Vec<Field> {
    let mut fields = vec![Field::Email];
    if guards.name {
        fields.push(Field::Name);
    }
    if guards.phone {
        fields.push(Field::Phone);
    }
    if guards.password_pair {
        fields.push(Field::Password);
        fields.push(Field::ConfirmPassword);
    }
    if guards.terms {
        fields.push(Field::Terms);
    }
    fields
}
