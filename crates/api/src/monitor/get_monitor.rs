use crate::error::DuewatchError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::get_monitor::*;
use duewatch_domain::{Monitor, ID};
use duewatch_infra::{DuewatchContext, IVersionedRepo};

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::NotFound(monitor_id) => DuewatchError::NotFound(format!(
            "The monitor with id: {}, was not found.",
            monitor_id
        )),
    }
}

pub async fn get_monitor_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let now = ctx.sys.get_timestamp_millis();
    let usecase = GetMonitorUseCase {
        monitor_id: path.monitor_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|monitor| HttpResponse::Ok().json(APIResponse::new(monitor, now)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetMonitorUseCase {
    pub monitor_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMonitorUseCase {
    type Response = Monitor;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .monitors
            .find(&self.monitor_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.monitor_id.clone()))
    }
}
