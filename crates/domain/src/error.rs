use thiserror::Error;

/// Input that is rejected before anything is written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("A title is required")]
    MissingTitle,
    #[error("A deadline is required")]
    MissingDeadline,
    #[error("A notification recipient is required")]
    MissingRecipient,
    #[error("The reminder offset can not be negative, got {0} minutes")]
    NegativeReminderOffset(i64),
    #[error("Days to postpone must be a positive number, got {0}")]
    NonPositivePostponeDays(i64),
    #[error("Postponing by {0} days moves the deadline out of range")]
    DeadlineOutOfRange(i64),
    #[error("The download url: {0} is malformed")]
    MalformedUrl(String),
    #[error("The certificate expiry is not known yet, run a check first")]
    UnknownDeadline,
}
