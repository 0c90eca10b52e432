use crate::error::DuewatchError;
use crate::shared::{
    usecase::{execute, UseCase},
    versioned::{write_with_retry, WriteError},
};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::update_memo::*;
use duewatch_domain::{Memo, MemoState, ValidationError, ID};
use duewatch_infra::DuewatchContext;

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::NotFound(memo_id) => {
            DuewatchError::NotFound(format!("The memo with id: {}, was not found.", memo_id))
        }
        UseCaseError::InvalidMemo(e) => DuewatchError::BadClientData(e.to_string()),
        UseCaseError::Contention => DuewatchError::Conflict(
            "The memo is being modified concurrently, try again.".into(),
        ),
        UseCaseError::StorageError => DuewatchError::InternalError,
    }
}

pub async fn update_memo_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let now = ctx.sys.get_timestamp_millis();
    let body = body.0;
    let usecase = UpdateMemoUseCase {
        memo_id: path.memo_id.clone(),
        title: body.title,
        description: body.description,
        recipient: body.recipient,
        deadline: body.deadline,
        reminder_minutes: body.reminder_minutes,
        state: body.state,
        now,
    };

    execute(usecase, &ctx)
        .await
        .map(|memo| HttpResponse::Ok().json(APIResponse::new(memo, now)))
        .map_err(handle_error)
}

#[derive(Debug, Default)]
pub struct UpdateMemoUseCase {
    pub memo_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub recipient: Option<String>,
    pub deadline: Option<i64>,
    pub reminder_minutes: Option<i64>,
    pub state: Option<MemoState>,
    pub now: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidMemo(ValidationError),
    Contention,
    StorageError,
}

impl UpdateMemoUseCase {
    fn apply(&self, memo: &mut Memo) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            memo.set_title(title)?;
        }
        if let Some(description) = &self.description {
            memo.description = description.clone();
        }
        if let Some(recipient) = &self.recipient {
            memo.set_recipient(recipient)?;
        }
        memo.reschedule(self.deadline, self.reminder_minutes)?;
        if let Some(state) = self.state {
            memo.set_state(state, self.now);
        }
        memo.updated = self.now;
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateMemoUseCase {
    type Response = Memo;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        let _guard = ctx.locks.lock(&self.memo_id).await;

        let this = &*self;
        write_with_retry(ctx.repos.memos.as_ref(), &self.memo_id, |memo| this.apply(memo))
            .await
            .map(|(memo, _)| memo)
            .map_err(|e| match e {
                WriteError::NotFound => UseCaseError::NotFound(self.memo_id.clone()),
                WriteError::Rejected(e) => UseCaseError::InvalidMemo(e),
                WriteError::Contention => UseCaseError::Contention,
                WriteError::StorageError => UseCaseError::StorageError,
            })
    }
}
