mod inmemory;

use crate::repos::shared::{
    query_structs::{Page, PageQuery},
    repo::DeleteResult,
};
pub use inmemory::InMemoryVerificationLogRepo;
use duewatch_domain::{VerificationLog, ID};

#[async_trait::async_trait]
pub trait IVerificationLogRepo: Send + Sync {
    async fn insert(&self, log: &VerificationLog) -> anyhow::Result<()>;
    /// Newest first
    async fn find_by_monitor(
        &self,
        monitor_id: &ID,
        query: PageQuery,
    ) -> anyhow::Result<Page<VerificationLog>>;
    async fn delete_by_monitor(&self, monitor_id: &ID) -> anyhow::Result<DeleteResult>;
}
