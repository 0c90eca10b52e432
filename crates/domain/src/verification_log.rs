use crate::{
    shared::{entity::ID, metadata::Metadata},
    verification::{SnapshotWrite, VerificationAttempt, VerificationResult},
};

/// One entry in the check history of a `Monitor`
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationLog {
    pub id: ID,
    pub monitor_id: ID,
    pub checked_at: i64,
    pub result: VerificationResult,
    pub detail: Metadata,
    pub error: Option<String>,
    /// Whether the check ended up delivering a notification
    pub notified: bool,
}

impl VerificationLog {
    pub fn new(monitor_id: ID, attempt: &VerificationAttempt, notified: bool) -> Self {
        let (result, detail, error) = match &attempt.outcome {
            Ok(verification) => (verification.result, verification.detail.clone(), None),
            Err(e) => (VerificationResult::Unknown, Metadata::new(), Some(e.to_string())),
        };
        Self {
            id: Default::default(),
            monitor_id,
            checked_at: attempt.observed_at,
            result,
            detail,
            error,
            notified,
        }
    }
}

/// Outcome of checking a single monitor, as reported to the caller of a check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub monitor_id: ID,
    pub attempt: VerificationAttempt,
    pub write: SnapshotWrite,
    pub notified: bool,
}
