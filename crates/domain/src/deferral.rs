use crate::error::ValidationError;

pub const MILLIS_PER_MINUTE: i64 = 1000 * 60;
pub const MILLIS_PER_DAY: i64 = MILLIS_PER_MINUTE * 60 * 24;

/// Moves an entity's deadline forward by a whole number of days
pub trait Postpone {
    fn postpone(&mut self, days: i64, now: i64) -> Result<(), ValidationError>;
}

pub fn postpone_deadline(deadline: i64, days: i64) -> Result<i64, ValidationError> {
    if days <= 0 {
        return Err(ValidationError::NonPositivePostponeDays(days));
    }
    days.checked_mul(MILLIS_PER_DAY)
        .and_then(|delta| deadline.checked_add(delta))
        .ok_or(ValidationError::DeadlineOutOfRange(days))
}
