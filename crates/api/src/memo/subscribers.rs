use super::{get_memo::GetMemoUseCase, get_memos::GetMemosUseCase, get_memos::MemoListing};
use crate::dispatcher::dispatch_memo_reminder;
use crate::shared::usecase::Subscriber;
use duewatch_domain::Memo;
use duewatch_infra::DuewatchContext;

/// A memo read is one of the moments its reminder is evaluated
pub struct DispatchReminderOnMemoRead;

#[async_trait::async_trait(?Send)]
impl Subscriber<GetMemoUseCase> for DispatchReminderOnMemoRead {
    async fn notify(&self, memo: &Memo, ctx: &DuewatchContext) {
        let now = ctx.sys.get_timestamp_millis();
        if memo.pending_reminder(now).is_some() {
            // Sideeffect, ignore result
            let _ = dispatch_memo_reminder(&memo.id, now, ctx).await;
        }
    }
}

pub struct DispatchRemindersOnMemosListed;

#[async_trait::async_trait(?Send)]
impl Subscriber<GetMemosUseCase> for DispatchRemindersOnMemosListed {
    async fn notify(&self, listing: &MemoListing, ctx: &DuewatchContext) {
        let now = ctx.sys.get_timestamp_millis();
        for memo in &listing.memos.items {
            if memo.pending_reminder(now).is_some() {
                // Sideeffect, ignore result
                let _ = dispatch_memo_reminder(&memo.id, now, ctx).await;
            }
        }
    }
}
