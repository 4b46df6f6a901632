//! # VeriFlow Core
//!
//! Core workflow engine for one-time-code (OTP) verification flows.
//! This crate contains the domain entities (verification session, code
//! entry buffer), the parameterized workflow state machine, field
//! validation, the countdown timer, and the trait seams a host wires up:
//! a [`VerificationGateway`] for the remote API and a [`FlowView`] for
//! rendering.
//!
//! [`VerificationGateway`]: workflow::VerificationGateway
//! [`FlowView`]: workflow::FlowView

pub mod domain;
pub mod errors;
pub mod validation;
pub mod workflow;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use workflow::*;
