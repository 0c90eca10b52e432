use crate::error::DuewatchError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::create_memo::*;
use duewatch_domain::{Memo, NewMemo, ValidationError};
use duewatch_infra::DuewatchContext;

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::InvalidMemo(e) => DuewatchError::BadClientData(e.to_string()),
        UseCaseError::StorageError => DuewatchError::InternalError,
    }
}

pub async fn create_memo_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let now = ctx.sys.get_timestamp_millis();
    let body = body.0;
    let usecase = CreateMemoUseCase {
        title: body.title,
        description: body.description,
        recipient: body.recipient,
        deadline: body.deadline,
        reminder_minutes: body.reminder_minutes.unwrap_or(0),
        now,
    };

    execute(usecase, &ctx)
        .await
        .map(|memo| HttpResponse::Created().json(APIResponse::new(memo, now)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct CreateMemoUseCase {
    pub title: String,
    pub description: String,
    pub recipient: String,
    pub deadline: Option<i64>,
    pub reminder_minutes: i64,
    pub now: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidMemo(ValidationError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateMemoUseCase {
    type Response = Memo;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        let memo = Memo::new(
            NewMemo {
                title: self.title.clone(),
                description: self.description.clone(),
                recipient: self.recipient.clone(),
                deadline: self.deadline,
                reminder_minutes: self.reminder_minutes,
            },
            self.now,
        )
        .map_err(UseCaseError::InvalidMemo)?;

        ctx.repos
            .memos
            .insert(&memo)
            .await
            .map(|_| memo)
            .map_err(|_| UseCaseError::StorageError)
    }
}
