//! Workflow error types and error handling.

mod types;

// Re-export all error types
pub use types::{Field, FieldError, FieldIssue, GatewayError};

use thiserror::Error;

use crate::domain::entities::session::AttemptState;

/// Top-level workflow errors.
#[derive(Error, Debug)]
pub enum FlowError {
    /// One or more field validators failed; nothing was sent.
    #[error("validation failed")]
    Validation { issues: Vec<FieldIssue> },

    /// The remote call failed, either rejected by the API or at the
    /// transport level.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The action is not a legal transition from the current state.
    #[error("{action} is not allowed in the {state:?} state")]
    NotAllowed {
        action: &'static str,
        state: AttemptState,
    },

    /// A remote call for this flow is still outstanding; the trigger was
    /// dropped rather than queued.
    #[error("a request is already in flight")]
    Busy,

    /// Resend was triggered before the countdown reached zero.
    #[error("resend is not available until the countdown reaches zero")]
    ResendNotReady,
}

pub type FlowResult<T> = Result<T, FlowError>;
