mod base;
mod memo;
mod monitor;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use duewatch_api_structs::dtos::*;
pub use duewatch_domain::{
    MemoFilter, MemoState, MemoStats, MonitorStats, SnapshotWrite, Status, VerificationResult,
    ID,
};
use memo::MemoClient;
pub use memo::{CreateMemoInput, GetMemosInput, UpdateMemoInput};
use monitor::MonitorClient;
pub use monitor::{CreateMonitorInput, GetMonitorLogsInput, UpdateMonitorInput};
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use duewatch_api_structs::dtos::MemoDTO as Memo;
pub use duewatch_api_structs::dtos::MonitorDTO as Monitor;
pub use duewatch_api_structs::dtos::VerificationLogDTO as VerificationLog;

/// Duewatch Server SDK
///
/// The SDK contains methods for interacting with the Duewatch server
/// API.
#[derive(Clone)]
pub struct DuewatchSDK {
    pub memo: MemoClient,
    pub monitor: MonitorClient,
    pub status: StatusClient,
}

impl DuewatchSDK {
    pub fn new<T: Into<String>>(address: T) -> Self {
        let base = Arc::new(BaseClient::new(format!("{}/api/v1", address.into())));
        let memo = MemoClient::new(base.clone());
        let monitor = MonitorClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            memo,
            monitor,
            status,
        }
    }
}
