//! Configuration for a verification flow instance.

/// Which field guards are enforced at the collecting step.
///
/// The email field is always validated; the rest depend on the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardSet {
    pub name: bool,
    pub phone: bool,
    pub password_pair: bool,
    pub terms: bool,
}

impl GuardSet {
    /// The full registration guard set.
    pub fn registration() -> Self {
        Self {
            name: true,
            phone: true,
            password_pair: true,
            terms: true,
        }
    }

    /// Email shape only, as used by the password-reset flow.
    pub fn email_only() -> Self {
        Self {
            name: false,
            phone: false,
            password_pair: false,
            terms: false,
        }
    }
}

/// Parameterization of one verification flow.
///
/// The two product flows share one state machine and differ only in code
/// width, resend window, and guard set. The window values are a product
/// choice, not a technical constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowConfig {
    /// Number of code entry slots.
    pub code_width: usize,
    /// Seconds before the issued code is considered stale and resend is
    /// permitted.
    pub window_seconds: u64,
    /// Field guards enforced before a code may be requested.
    pub guards: GuardSet,
}

impl FlowConfig {
    /// Registration flow: 6-digit code, 120 second resend window.
    pub fn registration() -> Self {
        Self {
            code_width: 6,
            window_seconds: 120,
            guards: GuardSet::registration(),
        }
    }

    /// Password-reset flow: 4-digit code, 60 second resend window.
    pub fn password_reset() -> Self {
        Self {
            code_width: 4,
            window_seconds: 60,
            guards: GuardSet::email_only(),
        }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self::registration()
    }
}
