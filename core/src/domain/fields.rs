//! Form field collection submitted alongside verification requests.
//!
//! The workflow treats collected form data as opaque: fields gathered at the
//! initiating step are re-posted verbatim with every code request, resend,
//! and verification call. Insertion order is preserved so the wire encoding
//! matches the order the host collected the fields in.

/// Well-known field names used by the storefront flows.
pub mod names {
    pub const NAME: &str = "name";
    pub const PHONE: &str = "phone";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirm_password";
    pub const AGREED_TERMS: &str = "agreed_terms";
    /// Candidate code field appended on verification calls.
    pub const OTP: &str = "otp";
}

/// Ordered collection of form field name/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    entries: Vec<(String, String)>,
}

impl FormFields {
    /// Creates an empty field collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, replacing any existing value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the value for a field, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns all entries in insertion order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
