use super::IMemoRepo;
use crate::repos::shared::repo::IVersionedRepo;
use crate::repos::shared::inmemory_repo::*;
use duewatch_domain::{Memo, MemoState, ID};

pub struct InMemoryMemoRepo {
    memos: std::sync::Mutex<Vec<Memo>>,
}

impl InMemoryMemoRepo {
    pub fn new() -> Self {
        Self {
            memos: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IVersionedRepo<Memo> for InMemoryMemoRepo {
    async fn find(&self, memo_id: &ID) -> Option<Memo> {
        find(memo_id, &self.memos)
    }

    async fn compare_and_swap(
        &self,
        expected_version: i64,
        memo: &Memo,
    ) -> anyhow::Result<Option<Memo>> {
        Ok(compare_and_swap(expected_version, memo, &self.memos))
    }
}

#[async_trait::async_trait]
impl IMemoRepo for InMemoryMemoRepo {
    async fn insert(&self, memo: &Memo) -> anyhow::Result<()> {
        insert(memo, &self.memos);
        Ok(())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Memo>> {
        let mut memos = find_by(&self.memos, |_| true);
        memos.sort_by_key(|m| m.deadline);
        Ok(memos)
    }

    async fn find_reminders_due(&self, before: i64) -> anyhow::Result<Vec<Memo>> {
        Ok(find_by(&self.memos, |m| {
            m.state == MemoState::Pending && m.reminder_at() <= before
        }))
    }

    async fn delete(&self, memo_id: &ID) -> Option<Memo> {
        delete(memo_id, &self.memos)
    }
}
