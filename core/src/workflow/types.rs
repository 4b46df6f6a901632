//! Types shared across the workflow surface.

/// Normalized successful reply from the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    /// Human-readable message from the server, when one was provided.
    pub message: Option<String>,
}

impl ApiReply {
    /// The server message, or `fallback` when the server sent none.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}

/// Controls the workflow disables while a call they trigger is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Submit,
    Verify,
    Resend,
    Finalize,
}

/// Severity of a transient toast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Generic message for transport-level failures; the underlying detail is
/// logged, never shown.
pub const NETWORK_ERROR_MESSAGE: &str = "A network error occurred. Please try again.";
