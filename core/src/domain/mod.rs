//! Domain layer containing the verification entities and form field types.

pub mod entities;
pub mod fields;

// Re-export commonly used domain types
pub use entities::*;
pub use fields::FormFields;
