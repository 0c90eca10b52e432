use chrono::Utc;

/// Source of "now" for every derivation. Memo states, certificate statuses
/// and the due checks all read the clock through this, never directly.
pub trait ISys: Send + Sync {
    fn get_timestamp_millis(&self) -> i64;
}

/// Wall clock in epoch millis
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
