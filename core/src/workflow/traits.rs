//! Trait seams between the workflow and its host.

use async_trait::async_trait;

use crate::domain::entities::session::AttemptState;
use crate::domain::fields::FormFields;
use crate::errors::{Field, GatewayError};

use super::types::{ApiReply, Control, ToastKind};

/// Remote API the workflow drives.
///
/// Implementations post the pending form fields (plus the candidate code
/// where relevant) and normalize the response into [`ApiReply`] /
/// [`GatewayError`] before it reaches the workflow.
#[async_trait]
pub trait VerificationGateway: Send + Sync {
    /// Sends the initiating form data, triggering code issuance.
    async fn request_code(&self, fields: &FormFields) -> Result<ApiReply, GatewayError>;

    /// Sends the candidate code together with the pending form data.
    async fn verify_code(&self, fields: &FormFields, code: &str) -> Result<ApiReply, GatewayError>;

    /// Re-triggers code issuance for the same identifier.
    async fn resend_code(&self, fields: &FormFields) -> Result<ApiReply, GatewayError>;

    /// Completes the flow after verification (the password-reset flow posts
    /// the new password here). Flows without a completion step reject this.
    async fn finalize(&self, fields: &FormFields) -> Result<ApiReply, GatewayError>;
}

/// Rendering surface the workflow calls into.
///
/// Keeps the transition logic free of any direct UI access: a host maps
/// these calls onto its widgets (or records them, in tests). All methods
/// are fire-and-forget.
pub trait FlowView: Send + Sync {
    /// Switches the visible panel to the given step.
    fn show_step(&self, step: AttemptState);

    /// Renders the countdown, formatted `MM:SS`.
    fn render_countdown(&self, remaining: &str);

    /// Enables or disables the resend control.
    fn set_resend_enabled(&self, enabled: bool);

    /// Disables a control while the call it triggered is outstanding.
    fn set_busy(&self, control: Control, busy: bool);

    /// Shows a field-scoped error message.
    fn show_field_error(&self, field: Field, message: &str);

    /// Clears the error message for a field.
    fn clear_field_error(&self, field: Field);

    /// Shows a transient toast.
    fn show_toast(&self, kind: ToastKind, message: &str);

    /// Mirrors the code buffer slots onto the input controls.
    fn render_slots(&self, slots: &[Option<char>]);

    /// Moves input focus to a code slot.
    fn focus_slot(&self, index: usize);
}
