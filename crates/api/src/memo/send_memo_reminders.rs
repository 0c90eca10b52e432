use crate::dispatcher::{dispatch_memo_reminder, Dispatch};
use crate::shared::usecase::UseCase;
use duewatch_infra::DuewatchContext;

/// Delivers every memo reminder that is due and not delivered yet
#[derive(Debug)]
pub struct SendMemoRemindersUseCase {}

#[derive(Debug, Default, PartialEq)]
pub struct RemindersReport {
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendMemoRemindersUseCase {
    type Response = RemindersReport;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let memos = ctx
            .repos
            .memos
            .find_reminders_due(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut report = RemindersReport::default();
        for memo in memos {
            match dispatch_memo_reminder(&memo.id, now, ctx).await {
                Dispatch::Sent(_) => report.sent += 1,
                Dispatch::Failed(_) => report.failed += 1,
                _ => (),
            }
        }
        Ok(report)
    }
}
