use super::subscribers::DispatchReminderOnMemoRead;
use crate::error::DuewatchError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::get_memo::*;
use duewatch_domain::{Memo, ID};
use duewatch_infra::{DuewatchContext, IVersionedRepo};

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::NotFound(memo_id) => {
            DuewatchError::NotFound(format!("The memo with id: {}, was not found.", memo_id))
        }
    }
}

pub async fn get_memo_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let now = ctx.sys.get_timestamp_millis();
    let usecase = GetMemoUseCase {
        memo_id: path.memo_id.clone(),
        now,
    };

    execute(usecase, &ctx)
        .await
        .map(|memo| HttpResponse::Ok().json(APIResponse::new(memo, now)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetMemoUseCase {
    pub memo_id: ID,
    pub now: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMemoUseCase {
    type Response = Memo;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .memos
            .find(&self.memo_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.memo_id.clone()))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(DispatchReminderOnMemoRead)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::testing::*;

    #[actix_web::test]
    async fn reading_a_due_memo_sends_its_reminder() {
        let deadline = JAN_1_2025;
        let TestContext { ctx, notifier, .. } = setup(deadline - 10 * MINUTE);
        let memo = insert_memo(&ctx, deadline, 30).await;

        for _ in 0..2 {
            let usecase = GetMemoUseCase {
                memo_id: memo.id.clone(),
                now: deadline - 10 * MINUTE,
            };
            execute(usecase, &ctx).await.expect("To find memo");
        }
        assert_eq!(notifier.sent_to(&memo.id).len(), 1);
    }

    #[actix_web::test]
    async fn unknown_memo_is_not_found() {
        let TestContext { ctx, .. } = setup(JAN_1_2025);
        let mut usecase = GetMemoUseCase {
            memo_id: ID::default(),
            now: JAN_1_2025,
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
