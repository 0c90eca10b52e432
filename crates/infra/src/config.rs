use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// A monitor is due for re-verification when its last snapshot is at
    /// least this old (millis)
    pub check_interval: i64,
    /// How often the verification sweep looks for due monitors (millis)
    pub verification_sweep_interval: i64,
    /// How often due memo reminders are dispatched (millis)
    pub reminder_sweep_interval: i64,
    /// Maximum number of verifications in flight at once
    pub verification_concurrency: usize,
    /// A single verification is abandoned after this many millis
    pub verification_timeout: i64,
    /// A single notification delivery is abandoned after this many millis
    pub notify_timeout: i64,
    /// Endpoint of the certificate verification service
    pub verifier_url: Option<String>,
    /// Endpoint notifications are posted to
    pub notifier_webhook_url: Option<String>,
}

fn parse_env<T>(name: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn optional_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => {
            info!("Did not find {} environment variable.", name);
            None
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let port = parse_env("PORT", 5000_usize);
        let check_interval_secs = parse_env("CHECK_INTERVAL_SECS", 5 * 60_i64);
        let verification_sweep_secs = parse_env("VERIFICATION_SWEEP_SECS", 60_i64);
        let reminder_sweep_secs = parse_env("REMINDER_SWEEP_SECS", 60_i64);
        let verification_concurrency = parse_env("VERIFICATION_CONCURRENCY", 4_usize);
        let verification_timeout_secs = parse_env("VERIFICATION_TIMEOUT_SECS", 30_i64);
        let notify_timeout_secs = parse_env("NOTIFY_TIMEOUT_SECS", 10_i64);

        Self {
            port,
            check_interval: 1000 * check_interval_secs.max(1),
            verification_sweep_interval: 1000 * verification_sweep_secs.max(1),
            reminder_sweep_interval: 1000 * reminder_sweep_secs.max(1),
            verification_concurrency: verification_concurrency.max(1),
            verification_timeout: 1000 * verification_timeout_secs.max(1),
            notify_timeout: 1000 * notify_timeout_secs.max(1),
            verifier_url: optional_env("VERIFIER_URL"),
            notifier_webhook_url: optional_env("NOTIFIER_WEBHOOK_URL"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
