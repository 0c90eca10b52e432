use crate::error::DuewatchError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::delete_monitor::*;
use duewatch_domain::{Monitor, ID};
use duewatch_infra::DuewatchContext;
use tracing::error;

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::NotFound(monitor_id) => DuewatchError::NotFound(format!(
            "The monitor with id: {}, was not found.",
            monitor_id
        )),
    }
}

pub async fn delete_monitor_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let now = ctx.sys.get_timestamp_millis();
    let usecase = DeleteMonitorUseCase {
        monitor_id: path.monitor_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|monitor| HttpResponse::Ok().json(APIResponse::new(monitor, now)))
        .map_err(handle_error)
}

/// Deletes the monitor together with its verification log
#[derive(Debug)]
pub struct DeleteMonitorUseCase {
    pub monitor_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteMonitorUseCase {
    type Response = Monitor;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        let _guard = ctx.locks.lock(&self.monitor_id).await;

        let monitor = ctx
            .repos
            .monitors
            .delete(&self.monitor_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.monitor_id.clone()))?;

        if let Err(e) = ctx
            .repos
            .verification_logs
            .delete_by_monitor(&self.monitor_id)
            .await
        {
            error!(
                "Unable to delete verification logs of monitor {}: {:?}",
                self.monitor_id, e
            );
        }

        Ok(monitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::monitor::check_monitors::{CheckMonitorsUseCase, CheckTarget};
    use crate::shared::testing::*;
    use duewatch_infra::PageQuery;
    use tokio_util::sync::CancellationToken;

    #[actix_web::test]
    async fn deletes_monitor_and_logs() {
        let TestContext { ctx, .. } = setup(JAN_1_2025);
        let monitor = insert_monitor(&ctx, "https://example.com/app.ipa").await;
        CheckMonitorsUseCase {
            target: CheckTarget::One(monitor.id.clone()),
            cancel: CancellationToken::new(),
        }
        .execute(&ctx)
        .await
        .unwrap();

        let mut usecase = DeleteMonitorUseCase {
            monitor_id: monitor.id.clone(),
        };
        assert!(usecase.execute(&ctx).await.is_ok());
        let logs = ctx
            .repos
            .verification_logs
            .find_by_monitor(&monitor.id, PageQuery::new(None, None, 10))
            .await
            .unwrap();
        assert_eq!(logs.total, 0);

        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
