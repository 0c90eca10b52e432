use crate::{
    deferral::{postpone_deadline, Postpone, MILLIS_PER_MINUTE},
    error::ValidationError,
    notification::{
        advance_notified, forget_deadline_bound, EntityKind, NotificationTarget,
        NotifiedTransition, Transition,
    },
    shared::entity::{Entity, Versioned, ID},
    status::{DeriveStatus, Status},
};
use serde::{Deserialize, Serialize};

/// User controlled state of a `Memo`, independent of time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoState {
    Pending,
    Completed,
}

/// A `Memo` is something the user has to get done before its `deadline`.
/// The recipient is reminded `reminder_offset` millis before the deadline.
#[derive(Debug, Clone, PartialEq)]
pub struct Memo {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub recipient: String,
    pub deadline: i64,
    /// Millis before `deadline` at which the reminder fires, 0 means at the deadline
    pub reminder_offset: i64,
    pub state: MemoState,
    pub completed_at: Option<i64>,
    pub last_notified: Option<NotifiedTransition>,
    pub created: i64,
    pub updated: i64,
    pub version: i64,
}

/// Which memos a listing returns, matched against the derived status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoFilter {
    All,
    Pending,
    Completed,
    Expired,
}

impl MemoFilter {
    pub fn accepts(&self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == Status::Pending,
            Self::Completed => status == Status::Completed,
            Self::Expired => status == Status::Expired,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Expired => "expired",
        }
    }
}

impl Default for MemoFilter {
    fn default() -> Self {
        Self::All
    }
}

#[derive(Debug, Clone)]
pub struct NewMemo {
    pub title: String,
    pub description: String,
    pub recipient: String,
    pub deadline: Option<i64>,
    pub reminder_minutes: i64,
}

pub(crate) fn required(value: &str, err: ValidationError) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(err)
    } else {
        Ok(value.to_string())
    }
}

fn reminder_offset(minutes: i64) -> Result<i64, ValidationError> {
    if minutes < 0 {
        return Err(ValidationError::NegativeReminderOffset(minutes));
    }
    Ok(minutes.saturating_mul(MILLIS_PER_MINUTE))
}

impl Memo {
    pub fn new(memo: NewMemo, now: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Default::default(),
            title: required(&memo.title, ValidationError::MissingTitle)?,
            description: memo.description,
            recipient: required(&memo.recipient, ValidationError::MissingRecipient)?,
            deadline: memo.deadline.ok_or(ValidationError::MissingDeadline)?,
            reminder_offset: reminder_offset(memo.reminder_minutes)?,
            state: MemoState::Pending,
            completed_at: None,
            last_notified: None,
            created: now,
            updated: now,
            version: 0,
        })
    }

    pub fn reminder_at(&self) -> i64 {
        self.deadline.saturating_sub(self.reminder_offset)
    }

    pub fn reminder_minutes(&self) -> i64 {
        self.reminder_offset / MILLIS_PER_MINUTE
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), ValidationError> {
        self.title = required(title, ValidationError::MissingTitle)?;
        Ok(())
    }

    pub fn set_recipient(&mut self, recipient: &str) -> Result<(), ValidationError> {
        self.recipient = required(recipient, ValidationError::MissingRecipient)?;
        Ok(())
    }

    /// Changes the deadline and/or the reminder offset. A reminder already
    /// delivered for the old schedule does not count for the new one.
    pub fn reschedule(
        &mut self,
        deadline: Option<i64>,
        reminder_minutes: Option<i64>,
    ) -> Result<(), ValidationError> {
        let deadline = deadline.unwrap_or(self.deadline);
        let offset = match reminder_minutes {
            Some(minutes) => reminder_offset(minutes)?,
            None => self.reminder_offset,
        };
        if deadline != self.deadline || offset != self.reminder_offset {
            self.deadline = deadline;
            self.reminder_offset = offset;
            forget_deadline_bound(&mut self.last_notified);
        }
        Ok(())
    }

    pub fn set_state(&mut self, state: MemoState, now: i64) {
        if self.state == state {
            return;
        }
        self.state = state;
        self.completed_at = match state {
            MemoState::Completed => Some(now),
            MemoState::Pending => None,
        };
    }

    /// The reminder that is due at `now`, if it has not been delivered yet.
    ///
    /// Late evaluations still fire: a sweep that runs after the deadline
    /// delivers the reminder once, with the memo reported as expired.
    pub fn pending_reminder(&self, now: i64) -> Option<Transition> {
        if self.state == MemoState::Completed {
            return None;
        }
        let reminder_at = self.reminder_at();
        if now < reminder_at {
            return None;
        }
        if let Some(notified) = &self.last_notified {
            if notified.observed_at >= reminder_at {
                return None;
            }
        }

        Some(Transition {
            old_status: self
                .last_notified
                .as_ref()
                .map(|t| t.status)
                .unwrap_or(Status::Pending),
            new_status: self.status(now),
            observed_at: reminder_at,
        })
    }

    pub fn mark_notified(&mut self, transition: NotifiedTransition) -> bool {
        advance_notified(&mut self.last_notified, transition)
    }

    pub fn notification_target(&self) -> NotificationTarget {
        NotificationTarget {
            kind: EntityKind::Memo,
            id: self.id.clone(),
            title: self.title.clone(),
            recipient: self.recipient.clone(),
            deadline: Some(self.deadline),
        }
    }
}

impl DeriveStatus for Memo {
    fn status(&self, now: i64) -> Status {
        if self.state == MemoState::Completed {
            return Status::Completed;
        }
        if now >= self.deadline {
            Status::Expired
        } else {
            Status::Pending
        }
    }
}

impl Postpone for Memo {
    fn postpone(&mut self, days: i64, now: i64) -> Result<(), ValidationError> {
        self.deadline = postpone_deadline(self.deadline, days)?;
        forget_deadline_bound(&mut self.last_notified);
        self.updated = now;
        Ok(())
    }
}

impl Entity for Memo {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Versioned for Memo {
    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}
