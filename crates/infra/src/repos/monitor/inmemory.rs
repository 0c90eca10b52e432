use super::IMonitorRepo;
use crate::repos::shared::repo::IVersionedRepo;
use crate::repos::shared::inmemory_repo::*;
use duewatch_domain::{Monitor, ID};

pub struct InMemoryMonitorRepo {
    monitors: std::sync::Mutex<Vec<Monitor>>,
}

impl InMemoryMonitorRepo {
    pub fn new() -> Self {
        Self {
            monitors: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IVersionedRepo<Monitor> for InMemoryMonitorRepo {
    async fn find(&self, monitor_id: &ID) -> Option<Monitor> {
        find(monitor_id, &self.monitors)
    }

    async fn compare_and_swap(
        &self,
        expected_version: i64,
        monitor: &Monitor,
    ) -> anyhow::Result<Option<Monitor>> {
        Ok(compare_and_swap(expected_version, monitor, &self.monitors))
    }
}

#[async_trait::async_trait]
impl IMonitorRepo for InMemoryMonitorRepo {
    async fn insert(&self, monitor: &Monitor) -> anyhow::Result<()> {
        insert(monitor, &self.monitors);
        Ok(())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Monitor>> {
        let mut monitors = find_by(&self.monitors, |_| true);
        monitors.sort_by_key(|m| m.created);
        Ok(monitors)
    }

    async fn find_enabled(&self) -> anyhow::Result<Vec<Monitor>> {
        Ok(find_by(&self.monitors, |m| m.enabled))
    }

    async fn delete(&self, monitor_id: &ID) -> Option<Monitor> {
        delete(monitor_id, &self.monitors)
    }
}
