use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The status shown for a memo or a monitor.
///
/// It is never stored. Every read computes it from the entity and the
/// current time, see `DeriveStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Completed,
    Expired,
    Valid,
    Revoked,
    Unknown,
    Paused,
}

impl Status {
    /// Monitor statuses the recipient should hear about
    pub fn is_alert_worthy(&self) -> bool {
        matches!(self, Self::Expired | Self::Revoked)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Expired => "expired",
            Self::Valid => "valid",
            Self::Revoked => "revoked",
            Self::Unknown => "unknown",
            Self::Paused => "paused",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pure status derivation.
///
/// Implementations must not read the clock themselves, the caller captures
/// `now` once per logical operation and passes it down.
pub trait DeriveStatus {
    fn status(&self, now: i64) -> Status;
}
