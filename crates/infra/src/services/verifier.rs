use duewatch_domain::{Metadata, Monitor, Verification, VerificationResult, VerifyError};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Verifies the certificate behind a `Monitor`
#[async_trait::async_trait]
pub trait IVerifier: Send + Sync {
    async fn verify(&self, monitor: &Monitor) -> Result<Verification, VerifyError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    monitor_id: String,
    download_url: &'a str,
    version: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    result: VerificationResult,
    #[serde(default)]
    detail: Metadata,
    #[serde(default, alias = "expires_at")]
    expires_at: Option<i64>,
}

/// Delegates verification to a remote service which downloads and parses
/// the referenced material
pub struct HttpVerifier {
    client: Client,
    url: String,
}

impl HttpVerifier {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

fn error_for_status(status: StatusCode) -> Option<VerifyError> {
    if status.is_success() {
        None
    } else if status == StatusCode::UNSUPPORTED_MEDIA_TYPE
        || status == StatusCode::UNPROCESSABLE_ENTITY
    {
        Some(VerifyError::UnsupportedFormat(format!(
            "Verifier responded with {}",
            status
        )))
    } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        Some(VerifyError::Network(format!(
            "Verifier responded with {}",
            status
        )))
    } else {
        Some(VerifyError::Parse(format!(
            "Verifier responded with {}",
            status
        )))
    }
}

#[async_trait::async_trait]
impl IVerifier for HttpVerifier {
    async fn verify(&self, monitor: &Monitor) -> Result<Verification, VerifyError> {
        let body = VerifyRequest {
            monitor_id: monitor.id.as_string(),
            download_url: &monitor.download_url,
            version: &monitor.version_label,
        };
        let res = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| VerifyError::Network(e.to_string()))?;

        if let Some(e) = error_for_status(res.status()) {
            return Err(e);
        }

        let res = res
            .json::<VerifyResponse>()
            .await
            .map_err(|e| VerifyError::Parse(e.to_string()))?;
        Ok(Verification {
            result: res.result,
            detail: res.detail,
            expires_at: res.expires_at,
        })
    }
}

/// Used when no verification service is configured. Every check fails as
/// a transient error so already known results are kept.
pub struct UnavailableVerifier;

#[async_trait::async_trait]
impl IVerifier for UnavailableVerifier {
    async fn verify(&self, _monitor: &Monitor) -> Result<Verification, VerifyError> {
        Err(VerifyError::Network("No verification service is configured".into()))
    }
}
