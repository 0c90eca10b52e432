use crate::error::DuewatchError;
use crate::shared::{
    usecase::{execute, UseCase},
    versioned::{write_with_retry, WriteError},
};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::update_monitor::*;
use duewatch_domain::{Monitor, ValidationError, ID};
use duewatch_infra::DuewatchContext;

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::NotFound(monitor_id) => DuewatchError::NotFound(format!(
            "The monitor with id: {}, was not found.",
            monitor_id
        )),
        UseCaseError::InvalidMonitor(e) => DuewatchError::BadClientData(e.to_string()),
        UseCaseError::Contention => DuewatchError::Conflict(
            "The monitor is being modified concurrently, try again.".into(),
        ),
        UseCaseError::StorageError => DuewatchError::InternalError,
    }
}

pub async fn update_monitor_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let now = ctx.sys.get_timestamp_millis();
    let body = body.0;
    let usecase = UpdateMonitorUseCase {
        monitor_id: path.monitor_id.clone(),
        name: body.name,
        download_url: body.download_url,
        recipient: body.recipient,
        version_label: body.version_label,
        enabled: body.enabled,
        now,
    };

    execute(usecase, &ctx)
        .await
        .map(|monitor| HttpResponse::Ok().json(APIResponse::new(monitor, now)))
        .map_err(handle_error)
}

#[derive(Debug, Default)]
pub struct UpdateMonitorUseCase {
    pub monitor_id: ID,
    pub name: Option<String>,
    pub download_url: Option<String>,
    pub recipient: Option<String>,
    pub version_label: Option<String>,
    pub enabled: Option<bool>,
    pub now: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidMonitor(ValidationError),
    Contention,
    StorageError,
}

impl UpdateMonitorUseCase {
    fn apply(&self, monitor: &mut Monitor) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            monitor.set_name(name);
        }
        if let Some(download_url) = &self.download_url {
            monitor.set_download_url(download_url, self.now)?;
        }
        if let Some(recipient) = &self.recipient {
            monitor.set_recipient(recipient)?;
        }
        if let Some(version_label) = &self.version_label {
            monitor.set_version_label(version_label, self.now);
        }
        if let Some(enabled) = self.enabled {
            monitor.enabled = enabled;
        }
        monitor.updated = self.now;
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateMonitorUseCase {
    type Response = Monitor;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        let _guard = ctx.locks.lock(&self.monitor_id).await;

        let this = &*self;
        write_with_retry(ctx.repos.monitors.as_ref(), &self.monitor_id, |monitor| {
            this.apply(monitor)
        })
        .await
        .map(|(monitor, _)| monitor)
        .map_err(|e| match e {
            WriteError::NotFound => UseCaseError::NotFound(self.monitor_id.clone()),
            WriteError::Rejected(e) => UseCaseError::InvalidMonitor(e),
            WriteError::Contention => UseCaseError::Contention,
            WriteError::StorageError => UseCaseError::StorageError,
        })
    }
}
