use super::IVerificationLogRepo;
use crate::repos::shared::{
    inmemory_repo::*,
    query_structs::{Page, PageQuery},
    repo::DeleteResult,
};
use duewatch_domain::{VerificationLog, ID};

pub struct InMemoryVerificationLogRepo {
    logs: std::sync::Mutex<Vec<VerificationLog>>,
}

impl InMemoryVerificationLogRepo {
    pub fn new() -> Self {
        Self {
            logs: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IVerificationLogRepo for InMemoryVerificationLogRepo {
    async fn insert(&self, log: &VerificationLog) -> anyhow::Result<()> {
        insert(log, &self.logs);
        Ok(())
    }

    async fn find_by_monitor(
        &self,
        monitor_id: &ID,
        query: PageQuery,
    ) -> anyhow::Result<Page<VerificationLog>> {
        let mut logs = find_by(&self.logs, |log| log.monitor_id == *monitor_id);
        logs.sort_by(|l1, l2| l2.checked_at.cmp(&l1.checked_at));
        Ok(Page::from_all(logs, query))
    }

    async fn delete_by_monitor(&self, monitor_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.logs, |log| log.monitor_id == *monitor_id))
    }
}
