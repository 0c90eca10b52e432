mod inmemory;

pub use inmemory::InMemoryMonitorRepo;
use crate::repos::shared::repo::IVersionedRepo;
use duewatch_domain::{Monitor, ID};

#[async_trait::async_trait]
pub trait IMonitorRepo: IVersionedRepo<Monitor> {
    async fn insert(&self, monitor: &Monitor) -> anyhow::Result<()>;
    /// All monitors, oldest first
    async fn find_all(&self) -> anyhow::Result<Vec<Monitor>>;
    async fn find_enabled(&self) -> anyhow::Result<Vec<Monitor>>;
    async fn delete(&self, monitor_id: &ID) -> Option<Monitor>;
}
