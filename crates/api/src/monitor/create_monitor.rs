use crate::error::DuewatchError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::create_monitor::*;
use duewatch_domain::{Monitor, NewMonitor, ValidationError};
use duewatch_infra::DuewatchContext;

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::InvalidMonitor(e) => DuewatchError::BadClientData(e.to_string()),
        UseCaseError::StorageError => DuewatchError::InternalError,
    }
}

pub async fn create_monitor_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let now = ctx.sys.get_timestamp_millis();
    let body = body.0;
    let usecase = CreateMonitorUseCase {
        monitor: NewMonitor {
            name: body.name,
            download_url: body.download_url,
            recipient: body.recipient,
            version_label: body.version_label,
        },
        now,
    };

    execute(usecase, &ctx)
        .await
        .map(|monitor| HttpResponse::Created().json(APIResponse::new(monitor, now)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct CreateMonitorUseCase {
    pub monitor: NewMonitor,
    pub now: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidMonitor(ValidationError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateMonitorUseCase {
    type Response = Monitor;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        let monitor =
            Monitor::new(self.monitor.clone(), self.now).map_err(UseCaseError::InvalidMonitor)?;

        ctx.repos
            .monitors
            .insert(&monitor)
            .await
            .map(|_| monitor)
            .map_err(|_| UseCaseError::StorageError)
    }
}
