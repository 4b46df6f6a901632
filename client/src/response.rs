//! Normalization of the remote API's reply shapes.
//!
//! The API is not uniform: some endpoints answer `{"status": "success"}`,
//! others `{"success": true}`, and messages are optional everywhere. This
//! module folds every shape into [`ApiReply`] or [`GatewayError`] so the
//! workflow never sees the differences.

use serde::Deserialize;

use vf_core::{ApiReply, GatewayError};

/// The superset of fields any endpoint is known to return.
#[derive(Debug, Deserialize)]
pub struct RawReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RawReply {
    fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success") || self.success == Some(true)
    }
}

/// Folds an HTTP reply into the workflow's result type.
///
/// A non-2xx status or an unparseable body is a transport failure; a parsed
/// body that does not signal success is an application rejection carrying
/// the server's message.
pub fn normalize(http_status: u16, body: &str) -> Result<ApiReply, GatewayError> {
    if !(200..300).contains(&http_status) {
        return Err(GatewayError::Transport {
            detail: format!("unexpected HTTP status {http_status}"),
        });
    }

    let raw: RawReply = serde_json::from_str(body).map_err(|e| GatewayError::Transport {
        detail: format!("malformed reply: {e}"),
    })?;

    if raw.is_success() {
        Ok(ApiReply { message: raw.message })
    } else {
        Err(GatewayError::Rejected {
            message: raw.message.unwrap_or_else(|| "Request failed".to_string()),
        })
    }
}
