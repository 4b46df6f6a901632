//! Domain entities representing the in-flight verification attempt.

pub mod code_buffer;
pub mod session;

// Re-export commonly used types
pub use code_buffer::CodeBuffer;
pub use session::{AttemptState, VerificationSession};
