use duewatch_domain::{DeriveStatus, Memo, MemoState, NotifiedTransition, Status, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MemoDTO {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub recipient: String,
    pub deadline: i64,
    pub reminder_minutes: i64,
    pub reminder_at: i64,
    pub state: MemoState,
    pub status: Status,
    pub completed_at: Option<i64>,
    pub last_notified: Option<NotifiedTransition>,
    pub created: i64,
    pub updated: i64,
}

impl MemoDTO {
    /// `now` is the instant the status is derived for
    pub fn new(memo: Memo, now: i64) -> Self {
        Self {
            status: memo.status(now),
            reminder_minutes: memo.reminder_minutes(),
            reminder_at: memo.reminder_at(),
            id: memo.id,
            title: memo.title,
            description: memo.description,
            recipient: memo.recipient,
            deadline: memo.deadline,
            state: memo.state,
            completed_at: memo.completed_at,
            last_notified: memo.last_notified,
            created: memo.created,
            updated: memo.updated,
        }
    }
}
