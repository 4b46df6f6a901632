//! Per-flow endpoint tables for the remote verification API.

/// URLs for one verification flow.
///
/// `finalize` is only present for flows with a post-verification step, such
/// as submitting the new password at the end of a reset.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub request_code: String,
    pub verify_code: String,
    pub resend_code: String,
    pub finalize: Option<String>,
}

impl Endpoints {
    /// Endpoints for the account-registration flow.
    pub fn registration(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            request_code: format!("{base}/register.php"),
            verify_code: format!("{base}/verify_otp.php"),
            resend_code: format!("{base}/resend_otp.php"),
            finalize: None,
        }
    }

    /// Endpoints for the password-reset flow.
    ///
    /// The API has no dedicated resend endpoint for resets; requesting a
    /// fresh code goes back through the initiating endpoint.
    pub fn password_reset(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            request_code: format!("{base}/forgot_password.php"),
            verify_code: format!("{base}/verify_forgot_password_otp.php"),
            resend_code: format!("{base}/forgot_password.php"),
            finalize: Some(format!("{base}/reset_password.php")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_endpoints() {
        let endpoints = Endpoints::registration("https://api.example.com");

        assert_eq!(endpoints.request_code, "https://api.example.com/register.php");
        assert_eq!(endpoints.verify_code, "https://api.example.com/verify_otp.php");
        assert_eq!(endpoints.resend_code, "https://api.example.com/resend_otp.php");
        assert!(endpoints.finalize.is_none());
    }

    #[test]
    fn test_password_reset_resend_reuses_initiating_endpoint() {
        let endpoints = Endpoints::password_reset("https://api.example.com");

        assert_eq!(endpoints.request_code, endpoints.resend_code);
        assert_eq!(
            endpoints.finalize.as_deref(),
            Some("https://api.example.com/reset_password.php")
        );
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let endpoints = Endpoints::registration("https://api.example.com/");

        assert_eq!(endpoints.request_code, "https://api.example.com/register.php");
    }
}
