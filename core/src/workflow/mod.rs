//! Verification workflow module.
//!
//! This module provides the complete one-time-code workflow:
//! - The parameterized state machine shared by the registration and
//!   password-reset flows
//! - Countdown gating of the resend control
//! - Code entry handling (per-slot keystrokes, paste, auto-submit)
//! - Trait seams for the remote gateway and the rendering surface

pub mod config;
mod countdown;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::{FlowConfig, GuardSet};
pub use countdown::{format_mm_ss, Countdown};
pub use service::VerificationFlow;
pub use traits::{FlowView, VerificationGateway};
pub use types::{ApiReply, Control, ToastKind, NETWORK_ERROR_MESSAGE};
