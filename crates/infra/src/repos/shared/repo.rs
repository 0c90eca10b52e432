use duewatch_domain::ID;

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteResult {
    pub deleted_count: i64,
}

/// Storage of entities that are written with optimistic concurrency
#[async_trait::async_trait]
pub trait IVersionedRepo<T>: Send + Sync {
    async fn find(&self, id: &ID) -> Option<T>;
    /// Writes `val` if the stored version still is `expected_version`.
    /// `None` means somebody else won, or the entity is gone.
    async fn compare_and_swap(&self, expected_version: i64, val: &T) -> anyhow::Result<Option<T>>;
}
