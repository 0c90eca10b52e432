use crate::error::DuewatchError;
use crate::shared::{
    usecase::{execute, UseCase},
    versioned::{write_with_retry, WriteError},
};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::postpone_monitor::*;
use duewatch_domain::{Monitor, Postpone, ValidationError, ID};
use duewatch_infra::DuewatchContext;

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::NotFound(monitor_id) => DuewatchError::NotFound(format!(
            "The monitor with id: {}, was not found.",
            monitor_id
        )),
        UseCaseError::InvalidPostpone(e) => DuewatchError::BadClientData(e.to_string()),
        UseCaseError::Contention => DuewatchError::Conflict(
            "The monitor is being modified concurrently, try again.".into(),
        ),
        UseCaseError::StorageError => DuewatchError::InternalError,
    }
}

pub async fn postpone_monitor_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let now = ctx.sys.get_timestamp_millis();
    let usecase = PostponeMonitorUseCase {
        monitor_id: path.monitor_id.clone(),
        days: body.days,
        now,
    };

    execute(usecase, &ctx)
        .await
        .map(|monitor| HttpResponse::Ok().json(APIResponse::new(monitor, now)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct PostponeMonitorUseCase {
    pub monitor_id: ID,
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
impl UseCase for PostponeMonitorUseCase {
    type Response = Monitor;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        let _guard = ctx.locks.lock(&self.monitor_id).await;

        let (days, now) = (self.days, self.now);
        write_with_retry(ctx.repos.monitors.as_ref(), &self.monitor_id, |monitor| {
            monitor.postpone(days, now)
        })
        .await
        .map(|(monitor, _)| monitor)
        .map_err(|e| match e {
            WriteError::NotFound => UseCaseError::NotFound(self.monitor_id.clone()),
            WriteError::Rejected(e) => UseCaseError::InvalidPostpone(e),
            WriteError::Contention => UseCaseError::Contention,
            WriteError::StorageError => UseCaseError::StorageError,
        })
    }
}
