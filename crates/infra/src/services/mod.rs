mod notifier;
mod verifier;

use crate::config::Config;
pub use notifier::{INotifier, LogNotifier, WebhookNotifier};
use std::{sync::Arc, time::Duration};
use tracing::warn;
pub use verifier::{HttpVerifier, IVerifier, UnavailableVerifier};

/// External collaborators of the engine
#[derive(Clone)]
pub struct Services {
    pub verifier: Arc<dyn IVerifier>,
    pub notifier: Arc<dyn INotifier>,
}

impl Services {
    pub fn from_config(config: &Config) -> Self {
        let verifier: Arc<dyn IVerifier> = match &config.verifier_url {
            Some(url) => Arc::new(HttpVerifier::new(url.clone())),
            None => {
                warn!("No VERIFIER_URL configured, monitor checks will fail until one is set.");
                Arc::new(UnavailableVerifier)
            }
        };
        let notifier: Arc<dyn INotifier> = match &config.notifier_webhook_url {
            Some(url) => Arc::new(WebhookNotifier::new(
                url.clone(),
                Duration::from_millis(config.notify_timeout as u64),
            )),
            None => Arc::new(LogNotifier),
        };
        Self { verifier, notifier }
    }
}
