use crate::error::DuewatchError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::dtos::VerificationLogDTO;
use duewatch_api_structs::get_monitor_logs::*;
use duewatch_domain::{VerificationLog, ID};
use duewatch_infra::{DuewatchContext, IVersionedRepo, Page, PageQuery};

const DEFAULT_PAGE_SIZE: usize = 10;

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::NotFound(monitor_id) => DuewatchError::NotFound(format!(
            "The monitor with id: {}, was not found.",
            monitor_id
        )),
        UseCaseError::StorageError => DuewatchError::InternalError,
    }
}

pub async fn get_monitor_logs_controller(
    path: web::Path<PathParams>,
    query: web::Query<QueryParams>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let usecase = GetMonitorLogsUseCase {
        monitor_id: path.monitor_id.clone(),
        page: PageQuery::new(query.page, query.page_size, DEFAULT_PAGE_SIZE),
    };

    execute(usecase, &ctx)
        .await
        .map(|logs| {
            let total_pages = logs.total_pages();
            let logs = logs.map(VerificationLogDTO::new);
            HttpResponse::Ok().json(APIResponse {
                logs: logs.items,
                page: logs.page,
                page_size: logs.page_size,
                total: logs.total,
                total_pages,
            })
        })
        .map_err(handle_error)
}

/// Check history of a monitor, newest first
#[derive(Debug)]
pub struct GetMonitorLogsUseCase {
    pub monitor_id: ID,
    pub page: PageQuery,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMonitorLogsUseCase {
    type Response = Page<VerificationLog>;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        if ctx.repos.monitors.find(&self.monitor_id).await.is_none() {
            return Err(UseCaseError::NotFound(self.monitor_id.clone()));
        }

        ctx.repos
            .verification_logs
            .find_by_monitor(&self.monitor_id, self.page)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
