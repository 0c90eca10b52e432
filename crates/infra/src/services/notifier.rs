use duewatch_domain::{NotificationTarget, NotifyError, Status};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

/// Delivers a status transition to the recipient of an entity
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn send(
        &self,
        target: &NotificationTarget,
        old_status: Status,
        new_status: Status,
    ) -> Result<(), NotifyError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationPayload<'a> {
    #[serde(flatten)]
    target: &'a NotificationTarget,
    old_status: Status,
    new_status: Status,
}

/// Posts notifications as json to a webhook, e.g. a mail relay
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Unable to build webhook client with a timeout: {:?}", e);
                Client::new()
            });
        Self { client, url }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    async fn send(
        &self,
        target: &NotificationTarget,
        old_status: Status,
        new_status: Status,
    ) -> Result<(), NotifyError> {
        let payload = NotificationPayload {
            target,
            old_status,
            new_status,
        };
        let res = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Unreachable(e.to_string()))?;

        let status = res.status();
        if status.is_success() {
            Ok(())
        } else if status.is_server_error() {
            Err(NotifyError::Unreachable(format!(
                "Webhook responded with {}",
                status
            )))
        } else {
            Err(NotifyError::Rejected(format!(
                "Webhook responded with {}",
                status
            )))
        }
    }
}

/// Only logs notifications, used when no webhook is configured
pub struct LogNotifier;

#[async_trait::async_trait]
impl INotifier for LogNotifier {
    async fn send(
        &self,
        target: &NotificationTarget,
        old_status: Status,
        new_status: Status,
    ) -> Result<(), NotifyError> {
        info!(
            "Notification for {:?} {} to {}: {} -> {}",
            target.kind, target.id, target.recipient, old_status, new_status
        );
        Ok(())
    }
}
