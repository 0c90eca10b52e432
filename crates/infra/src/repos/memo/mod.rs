mod inmemory;

pub use inmemory::InMemoryMemoRepo;
use crate::repos::shared::repo::IVersionedRepo;
use duewatch_domain::{Memo, ID};

#[async_trait::async_trait]
pub trait IMemoRepo: IVersionedRepo<Memo> {
    async fn insert(&self, memo: &Memo) -> anyhow::Result<()>;
    /// All memos, ordered by deadline
    async fn find_all(&self) -> anyhow::Result<Vec<Memo>>;
    /// Memos whose reminder time is at or before `before`
    async fn find_reminders_due(&self, before: i64) -> anyhow::Result<Vec<Memo>>;
    async fn delete(&self, memo_id: &ID) -> Option<Memo>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use duewatch_domain::{MemoState, NewMemo};

    fn memo_factory(deadline: i64) -> Memo {
        Memo::new(
            NewMemo {
                title: "Title".into(),
                description: "".into(),
                recipient: "someone@example.com".into(),
                deadline: Some(deadline),
                reminder_minutes: 1,
            },
            0,
        )
        .unwrap()
    }

    #[actix_web::test]
    async fn crud() {
        let repo = InMemoryMemoRepo::new();
        let memo = memo_factory(100_000);
        repo.insert(&memo).await.unwrap();

        assert_eq!(repo.find(&memo.id).await, Some(memo.clone()));
        assert_eq!(repo.delete(&memo.id).await, Some(memo.clone()));
        assert!(repo.find(&memo.id).await.is_none());
        assert!(repo.delete(&memo.id).await.is_none());
    }

    #[actix_web::test]
    async fn lists_by_deadline() {
        let repo = InMemoryMemoRepo::new();
        let late = memo_factory(300_000);
        let early = memo_factory(100_000);
        repo.insert(&late).await.unwrap();
        repo.insert(&early).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.iter().map(|m| m.id.clone()).collect::<Vec<_>>(), vec![early.id, late.id]);
    }

    #[actix_web::test]
    async fn finds_due_reminders_of_pending_memos() {
        let repo = InMemoryMemoRepo::new();
        let due = memo_factory(100_000);
        let not_due = memo_factory(1_000_000);
        let mut completed = memo_factory(100_000);
        completed.set_state(MemoState::Completed, 0);
        for memo in &[&due, &not_due, &completed] {
            repo.insert(memo).await.unwrap();
        }

        let reminders = repo.find_reminders_due(50_000).await.unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].id, due.id);
    }

    #[actix_web::test]
    async fn compare_and_swap_rejects_stale_versions() {
        let repo = InMemoryMemoRepo::new();
        let memo = memo_factory(100_000);
        repo.insert(&memo).await.unwrap();

        let mut first = memo.clone();
        first.title = "First".into();
        let saved = repo
            .compare_and_swap(memo.version, &first)
            .await
            .unwrap()
            .expect("First writer wins");
        assert_eq!(saved.version, memo.version + 1);

        let mut second = memo.clone();
        second.title = "Second".into();
        assert!(repo
            .compare_and_swap(memo.version, &second)
            .await
            .unwrap()
            .is_none());
        assert_eq!(repo.find(&memo.id).await.unwrap().title, "First");
    }
}
