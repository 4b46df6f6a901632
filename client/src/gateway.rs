//! HTTP implementation of the verification gateway.

use async_trait::async_trait;
use tracing::{debug, error};

use vf_core::domain::fields::{names, FormFields};
use vf_core::{ApiReply, GatewayError, VerificationGateway};

use crate::endpoints::Endpoints;
use crate::response;

/// Gateway that POSTs form-encoded requests to the remote verification API.
///
/// Every call sends the pending form verbatim; `verify_code` adds the
/// entered code under the `otp` key. Connection-level failures surface as
/// [`GatewayError::Transport`], reply bodies are folded by
/// [`response::normalize`].
pub struct HttpGateway {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpGateway {
    /// Creates a gateway with a default `reqwest` client.
    pub fn new(endpoints: Endpoints) -> Self {
        Self::with_client(reqwest::Client::new(), endpoints)
    }

    /// Creates a gateway with a caller-configured client (timeouts, proxy).
    pub fn with_client(http: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    async fn post(&self, url: &str, fields: &FormFields) -> Result<ApiReply, GatewayError> {
        debug!(url = url, field_count = fields.len(), event = "api_request", "Calling verification API");

        let response = self
            .http
            .post(url)
            .form(fields.entries())
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                detail: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| GatewayError::Transport {
            detail: e.to_string(),
        })?;

        response::normalize(status, &body)
    }
}

#[async_trait]
impl VerificationGateway for HttpGateway {
    async fn request_code(&self, fields: &FormFields) -> Result<ApiReply, GatewayError> {
        self.post(&self.endpoints.request_code, fields).await
    }

    async fn verify_code(&self, fields: &FormFields, code: &str) -> Result<ApiReply, GatewayError> {
        let mut fields = fields.clone();
        fields.set(names::OTP, code);
        self.post(&self.endpoints.verify_code, &fields).await
    }

    async fn resend_code(&self, fields: &FormFields) -> Result<ApiReply, GatewayError> {
        self.post(&self.endpoints.resend_code, fields).await
    }

    async fn finalize(&self, fields: &FormFields) -> Result<ApiReply, GatewayError> {
        let Some(url) = self.endpoints.finalize.as_deref() else {
            error!(event = "finalize_unconfigured", "Finalize called on a flow without a finalize endpoint");
            return Err(GatewayError::Rejected {
                message: "This flow has no completion step".to_string(),
            });
        };
        self.post(url, fields).await
    }
}
