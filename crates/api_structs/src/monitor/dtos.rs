use duewatch_domain::{
    CheckOutcome, DeriveStatus, Metadata, Monitor, NotifiedTransition, SnapshotWrite, Status,
    VerificationLog, VerificationResult, VerificationSnapshot, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MonitorDTO {
    pub id: ID,
    pub name: String,
    pub download_url: String,
    pub recipient: String,
    pub version_label: String,
    pub enabled: bool,
    pub deadline: Option<i64>,
    pub status: Status,
    pub last_verification: Option<VerificationSnapshot>,
    pub last_checked_at: Option<i64>,
    pub last_error: Option<String>,
    pub last_notified: Option<NotifiedTransition>,
    pub created: i64,
    pub updated: i64,
}

impl MonitorDTO {
    pub fn new(monitor: Monitor, now: i64) -> Self {
        Self {
            status: monitor.status(now),
            id: monitor.id,
            name: monitor.name,
            download_url: monitor.download_url,
            recipient: monitor.recipient,
            version_label: monitor.version_label,
            enabled: monitor.enabled,
            deadline: monitor.deadline,
            last_verification: monitor.last_verification,
            last_checked_at: monitor.last_checked_at,
            last_error: monitor.last_error,
            last_notified: monitor.last_notified,
            created: monitor.created,
            updated: monitor.updated,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VerificationLogDTO {
    pub id: ID,
    pub monitor_id: ID,
    pub checked_at: i64,
    pub result: VerificationResult,
    pub detail: Metadata,
    pub error: Option<String>,
    pub notified: bool,
}

impl VerificationLogDTO {
    pub fn new(log: VerificationLog) -> Self {
        Self {
            id: log.id,
            monitor_id: log.monitor_id,
            checked_at: log.checked_at,
            result: log.result,
            detail: log.detail,
            error: log.error,
            notified: log.notified,
        }
    }
}

/// A monitor that got verified during a check
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CheckedMonitorDTO {
    pub monitor: MonitorDTO,
    pub observed_at: i64,
    pub write: SnapshotWrite,
    pub notified: bool,
}

/// A monitor whose verification failed during a check
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CheckFailureDTO {
    pub monitor_id: ID,
    pub observed_at: i64,
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CheckReportDTO {
    pub checked: Vec<CheckedMonitorDTO>,
    pub failures: Vec<CheckFailureDTO>,
    pub cancelled: bool,
}

impl CheckReportDTO {
    /// Every outcome shows up under `checked`, failed ones are listed
    /// under `failures` as well
    pub fn new(outcomes: Vec<(Monitor, CheckOutcome)>, cancelled: bool, now: i64) -> Self {
        let mut checked = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for (monitor, outcome) in outcomes {
            if let Err(e) = &outcome.attempt.outcome {
                failures.push(CheckFailureDTO {
                    monitor_id: outcome.monitor_id.clone(),
                    observed_at: outcome.attempt.observed_at,
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                });
            }
            checked.push(CheckedMonitorDTO {
                monitor: MonitorDTO::new(monitor, now),
                observed_at: outcome.attempt.observed_at,
                write: outcome.write,
                notified: outcome.notified,
            });
        }
        Self {
            checked,
            failures,
            cancelled,
        }
    }
}
