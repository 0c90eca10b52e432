mod deferral;
mod error;
mod memo;
mod monitor;
mod notification;
mod shared;
mod stats;
mod status;
mod verification;
mod verification_log;

pub use deferral::{postpone_deadline, Postpone, MILLIS_PER_DAY, MILLIS_PER_MINUTE};
pub use error::ValidationError;
pub use memo::{Memo, MemoFilter, MemoState, NewMemo};
pub use monitor::{Monitor, NewMonitor};
pub use notification::{
    AlertDecision, EntityKind, NotificationTarget, NotifiedTransition, NotifyError, Transition,
};
pub use shared::entity::{Entity, Versioned, ID};
pub use shared::metadata::Metadata;
pub use stats::{MemoStats, MonitorStats};
pub use status::{DeriveStatus, Status};
pub use verification::{
    SnapshotWrite, Verification, VerificationAttempt, VerificationResult, VerificationSnapshot,
    VerifyError,
};
pub use verification_log::{CheckOutcome, VerificationLog};
