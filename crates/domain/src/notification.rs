use crate::{shared::entity::ID, status::Status};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The last transition a notification was delivered for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifiedTransition {
    pub status: Status,
    pub observed_at: i64,
}

impl NotifiedTransition {
    /// Whether the transition was caused by the deadline, in which case
    /// moving the deadline makes it meaningless. Revocations are facts
    /// about the certificate and survive.
    pub fn is_deadline_bound(&self) -> bool {
        self.status != Status::Revoked
    }
}

/// Moves `slot` to `next` unless that would move it back in time
pub(crate) fn advance_notified(
    slot: &mut Option<NotifiedTransition>,
    next: NotifiedTransition,
) -> bool {
    match slot {
        Some(current) if current.observed_at > next.observed_at => false,
        _ => {
            *slot = Some(next);
            true
        }
    }
}

/// Drops the recorded transition if it was tied to the deadline
pub(crate) fn forget_deadline_bound(slot: &mut Option<NotifiedTransition>) {
    if slot.as_ref().map(|t| t.is_deadline_bound()).unwrap_or(false) {
        *slot = None;
    }
}

/// A transition that should be delivered to the recipient
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub old_status: Status,
    pub new_status: Status,
    pub observed_at: i64,
}

impl Transition {
    pub fn notified(&self) -> NotifiedTransition {
        NotifiedTransition {
            status: self.new_status,
            observed_at: self.observed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlertDecision {
    /// Deliver the transition and record it once delivered
    Notify(Transition),
    /// The monitor recovered, record it silently so the next alert fires again
    Rearm(NotifiedTransition),
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Memo,
    Monitor,
}

/// Who and what a notification is about
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTarget {
    pub kind: EntityKind,
    pub id: ID,
    pub title: String,
    pub recipient: String,
    pub deadline: Option<i64>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotifyError {
    #[error("Notification recipient is unreachable: {0}")]
    Unreachable(String),
    #[error("Notification was rejected: {0}")]
    Rejected(String),
}
