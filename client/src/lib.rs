//! # VeriFlow HTTP Client
//!
//! This crate implements the remote side of the verification workflow: a
//! [`vf_core::VerificationGateway`] backed by an HTTP API that speaks
//! form-encoded requests and loosely structured JSON replies.
//!
//! The crate contains:
//! - **Endpoints**: per-flow URL tables (registration, password reset)
//! - **Response**: normalization of heterogeneous reply shapes
//! - **Gateway**: the `reqwest`-based [`HttpGateway`]

pub mod endpoints;
pub mod gateway;
pub mod response;

pub use endpoints::Endpoints;
pub use gateway::HttpGateway;
