use duewatch_domain::ID;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per entity mutual exclusion for the write paths.
///
/// Writes of verification snapshots and notified transitions for one entity
/// are serialized, writes to different entities never wait on each other.
/// Reads do not take these locks.
#[derive(Clone, Default)]
pub struct EntityLocks {
    locks: Arc<Mutex<HashMap<ID, Arc<AsyncMutex<()>>>>>,
}

impl EntityLocks {
    pub fn new() -> Self {
        Default::default()
    }

    pub async fn lock(&self, entity_id: &ID) -> EntityGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap();
            // Drop entries nobody holds or waits for
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry(entity_id.clone())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        EntityGuard {
            _guard: lock.lock_owned().await,
        }
    }
}

pub struct EntityGuard {
    _guard: OwnedMutexGuard<()>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[actix_web::test]
    async fn serializes_same_entity() {
        let locks = EntityLocks::new();
        let id = ID::default();
        let guard = locks.lock(&id).await;

        let second = tokio::time::timeout(Duration::from_millis(50), locks.lock(&id)).await;
        assert!(second.is_err());

        drop(guard);
        let second = tokio::time::timeout(Duration::from_millis(50), locks.lock(&id)).await;
        assert!(second.is_ok());
    }

    #[actix_web::test]
    async fn different_entities_do_not_wait() {
        let locks = EntityLocks::new();
        let _first = locks.lock(&ID::default()).await;
        let second =
            tokio::time::timeout(Duration::from_millis(50), locks.lock(&ID::default())).await;
        assert!(second.is_ok());
    }
}
