use crate::{APIResponse, BaseClient};
use duewatch_api_structs::*;
use duewatch_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct MonitorClient {
    base: Arc<BaseClient>,
}

pub struct CreateMonitorInput {
    pub name: String,
    pub download_url: String,
    pub recipient: String,
    pub version_label: String,
}

#[derive(Default)]
pub struct UpdateMonitorInput {
    pub monitor_id: ID,
    pub name: Option<String>,
    pub download_url: Option<String>,
    pub recipient: Option<String>,
    pub version_label: Option<String>,
    pub enabled: Option<bool>,
}

pub struct GetMonitorLogsInput {
    pub monitor_id: ID,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl MonitorClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateMonitorInput,
    ) -> APIResponse<create_monitor::APIResponse> {
        let body = create_monitor::RequestBody {
            name: input.name,
            download_url: input.download_url,
            recipient: input.recipient,
            version_label: input.version_label,
        };
        self.base
            .post(body, "monitors".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, monitor_id: ID) -> APIResponse<get_monitor::APIResponse> {
        self.base
            .get(format!("monitors/{}", monitor_id), StatusCode::OK)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_monitors::APIResponse> {
        self.base.get("monitors".into(), StatusCode::OK).await
    }

    pub async fn update(
        &self,
        input: UpdateMonitorInput,
    ) -> APIResponse<update_monitor::APIResponse> {
        let body = update_monitor::RequestBody {
            name: input.name,
            download_url: input.download_url,
            recipient: input.recipient,
            version_label: input.version_label,
            enabled: input.enabled,
        };
        self.base
            .put(body, format!("monitors/{}", input.monitor_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, monitor_id: ID) -> APIResponse<delete_monitor::APIResponse> {
        self.base
            .delete(format!("monitors/{}", monitor_id), StatusCode::OK)
            .await
    }

    pub async fn postpone(
        &self,
        monitor_id: ID,
        days: i64,
    ) -> APIResponse<postpone_monitor::APIResponse> {
        let body = postpone_monitor::RequestBody { days };
        self.base
            .post(
                body,
                format!("monitors/{}/postpone", monitor_id),
                StatusCode::OK,
            )
            .await
    }

    /// Verifies every enabled monitor
    pub async fn check_all(&self) -> APIResponse<check_monitors::APIResponse> {
        self.base
            .post((), "monitors/check".into(), StatusCode::OK)
            .await
    }

    pub async fn check(&self, monitor_id: ID) -> APIResponse<check_monitor::APIResponse> {
        self.base
            .post((), format!("monitors/{}/check", monitor_id), StatusCode::OK)
            .await
    }

    pub async fn logs(
        &self,
        input: GetMonitorLogsInput,
    ) -> APIResponse<get_monitor_logs::APIResponse> {
        let mut params = Vec::new();
        if let Some(page) = input.page {
            params.push(format!("page={}", page));
        }
        if let Some(page_size) = input.page_size {
            params.push(format!("pageSize={}", page_size));
        }
        self.base
            .get(
                format!("monitors/{}/logs?{}", input.monitor_id, params.join("&")),
                StatusCode::OK,
            )
            .await
    }
}
