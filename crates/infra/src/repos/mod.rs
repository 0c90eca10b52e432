mod memo;
mod monitor;
mod shared;
mod verification_log;

pub use memo::IMemoRepo;
use memo::InMemoryMemoRepo;
pub use monitor::IMonitorRepo;
use monitor::InMemoryMonitorRepo;
pub use shared::query_structs::{Page, PageQuery};
pub use shared::repo::{DeleteResult, IVersionedRepo};
use std::sync::Arc;
pub use verification_log::IVerificationLogRepo;
use verification_log::InMemoryVerificationLogRepo;

#[derive(Clone)]
pub struct Repos {
    pub memos: Arc<dyn IMemoRepo>,
    pub monitors: Arc<dyn IMonitorRepo>,
    pub verification_logs: Arc<dyn IVerificationLogRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            memos: Arc::new(InMemoryMemoRepo::new()),
            monitors: Arc::new(InMemoryMonitorRepo::new()),
            verification_logs: Arc::new(InMemoryVerificationLogRepo::new()),
        }
    }
}
