use crate::{shared::metadata::Metadata, status::Status};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationResult {
    Unknown,
    Valid,
    Expired,
    Revoked,
}

impl From<VerificationResult> for Status {
    fn from(result: VerificationResult) -> Self {
        match result {
            VerificationResult::Unknown => Status::Unknown,
            VerificationResult::Valid => Status::Valid,
            VerificationResult::Expired => Status::Expired,
            VerificationResult::Revoked => Status::Revoked,
        }
    }
}

/// The last externally verified fact about a monitored certificate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSnapshot {
    /// When the check producing this snapshot was dispatched. Used to
    /// order results that arrive out of order.
    pub observed_at: i64,
    pub result: VerificationResult,
    pub detail: Metadata,
}

/// What a verifier reports back for a monitor
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub result: VerificationResult,
    pub detail: Metadata,
    /// Certificate expiry, if the verifier was able to read it
    pub expires_at: Option<i64>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerifyError {
    #[error("Network error while verifying: {0}")]
    Network(String),
    #[error("Unable to parse the verified material: {0}")]
    Parse(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl VerifyError {
    /// Transient failures keep the last known result instead of
    /// replacing it with `unknown`
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::UnsupportedFormat(_) => "unsupportedFormat",
        }
    }
}

/// A finished check, successful or not, waiting to be recorded on its monitor
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationAttempt {
    pub observed_at: i64,
    pub outcome: Result<Verification, VerifyError>,
}

impl VerificationAttempt {
    /// The snapshot this attempt writes when it is not preserved over
    pub fn snapshot(&self) -> VerificationSnapshot {
        match &self.outcome {
            Ok(verification) => VerificationSnapshot {
                observed_at: self.observed_at,
                result: verification.result,
                detail: verification.detail.clone(),
            },
            Err(e) => {
                let mut detail = Metadata::new();
                detail.insert("error".into(), e.to_string());
                detail.insert("errorKind".into(), e.kind().into());
                VerificationSnapshot {
                    observed_at: self.observed_at,
                    result: VerificationResult::Unknown,
                    detail,
                }
            }
        }
    }
}

/// How an attempt was recorded on its monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapshotWrite {
    /// The attempt replaced the stored snapshot
    Applied,
    /// Transient failure, the previous known result was kept
    PreservedKnown,
    /// A snapshot observed later is already stored, the attempt was dropped
    Stale,
}
