use crate::error::DuewatchError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::delete_memo::*;
use duewatch_domain::{Memo, ID};
use duewatch_infra::DuewatchContext;

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::NotFound(memo_id) => {
            DuewatchError::NotFound(format!("The memo with id: {}, was not found.", memo_id))
        }
    }
}

pub async fn delete_memo_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let now = ctx.sys.get_timestamp_millis();
    let usecase = DeleteMemoUseCase {
        memo_id: path.memo_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|memo| HttpResponse::Ok().json(APIResponse::new(memo, now)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct DeleteMemoUseCase {
    pub memo_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteMemoUseCase {
    type Response = Memo;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        let _guard = ctx.locks.lock(&self.memo_id).await;

        ctx.repos
            .memos
            .delete(&self.memo_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.memo_id.clone()))
    }
}
