use crate::error::DuewatchError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::dtos::MonitorDTO;
use duewatch_api_structs::get_monitors::*;
use duewatch_domain::{DeriveStatus, Monitor, MonitorStats};
use duewatch_infra::DuewatchContext;

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::StorageError => DuewatchError::InternalError,
    }
}

pub async fn get_monitors_controller(
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let now = ctx.sys.get_timestamp_millis();
    let usecase = GetMonitorsUseCase { now };

    execute(usecase, &ctx)
        .await
        .map(|(monitors, stats)| {
            HttpResponse::Ok().json(APIResponse {
                monitors: monitors
                    .into_iter()
                    .map(|monitor| MonitorDTO::new(monitor, now))
                    .collect(),
                stats,
            })
        })
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetMonitorsUseCase {
    pub now: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMonitorsUseCase {
    type Response = (Vec<Monitor>, MonitorStats);

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        let monitors = ctx
            .repos
            .monitors
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let now = self.now;
        let stats = MonitorStats::tally(monitors.iter().map(|monitor| monitor.status(now)));

        Ok((monitors, stats))
    }
}
