use crate::error::DuewatchError;
use crate::shared::{
    usecase::{execute, UseCase},
    versioned::{write_with_retry, WriteError},
};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::postpone_memo::*;
use duewatch_domain::{Memo, Postpone, ValidationError, ID};
use duewatch_infra::DuewatchContext;

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::NotFound(memo_id) => {
            DuewatchError::NotFound(format!("The memo with id: {}, was not found.", memo_id))
        }
        UseCaseError::InvalidPostpone(e) => DuewatchError::BadClientData(e.to_string()),
        UseCaseError::Contention => DuewatchError::Conflict(
            "The memo is being modified concurrently, try again.".into(),
        ),
        UseCaseError::StorageError => DuewatchError::InternalError,
    }
}

pub async fn postpone_memo_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let now = ctx.sys.get_timestamp_millis();
    let usecase = PostponeMemoUseCase {
        memo_id: path.memo_id.clone(),
        days: body.days,
        now,
    };

    execute(usecase, &ctx)
        .await
        .map(|memo| HttpResponse::Ok().json(APIResponse::new(memo, now)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct PostponeMemoUseCase {
    pub memo_id: ID,
    pub days: i64,
    pub now: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidPostpone(ValidationError),
    Contention,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for PostponeMemoUseCase {
    type Response = Memo;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        let _guard = ctx.locks.lock(&self.memo_id).await;

        let (days, now) = (self.days, self.now);
        write_with_retry(ctx.repos.memos.as_ref(), &self.memo_id, |memo| {
            memo.postpone(days, now)
        })
        .await
        .map(|(memo, _)| memo)
        .map_err(|e| match e {
            WriteError::NotFound => UseCaseError::NotFound(self.memo_id.clone()),
            WriteError::Rejected(e) => UseCaseError::InvalidPostpone(e),
            WriteError::Contention => UseCaseError::Contention,
            WriteError::StorageError => UseCaseError::StorageError,
        })
    }
}
