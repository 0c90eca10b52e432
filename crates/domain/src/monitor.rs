use crate::{
    deferral::{postpone_deadline, Postpone},
    error::ValidationError,
    memo::required,
    notification::{
        advance_notified, forget_deadline_bound, AlertDecision, EntityKind, NotificationTarget,
        NotifiedTransition, Transition,
    },
    shared::entity::{Entity, Versioned, ID},
    status::{DeriveStatus, Status},
    verification::{SnapshotWrite, VerificationAttempt, VerificationResult, VerificationSnapshot},
};
use url::Url;

const DEFAULT_NAME: &str = "Unnamed monitor";
const DEFAULT_VERSION_LABEL: &str = "v1";

/// A `Monitor` watches the signing certificate of a distributed app build.
///
/// Its `deadline` is the certificate expiry as last reported by the
/// verifier, the status itself is whatever the verifier last observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    pub id: ID,
    pub name: String,
    /// Reference material handed to the verifier
    pub download_url: String,
    pub recipient: String,
    /// Cache label for the verified material. Changing it forces a new check.
    pub version_label: String,
    pub enabled: bool,
    pub deadline: Option<i64>,
    pub last_verification: Option<VerificationSnapshot>,
    pub last_checked_at: Option<i64>,
    pub last_error: Option<String>,
    pub last_notified: Option<NotifiedTransition>,
    /// Checks observed before this instant concern material or an expiry
    /// that has since been replaced, they are never applied
    pub verification_invalidated_at: Option<i64>,
    pub created: i64,
    pub updated: i64,
    pub version: i64,
}

#[derive(Debug, Clone)]
pub struct NewMonitor {
    pub name: String,
    pub download_url: String,
    pub recipient: String,
    pub version_label: String,
}

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn download_url(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();
    Url::parse(url).map_err(|_| ValidationError::MalformedUrl(url.to_string()))?;
    Ok(url.to_string())
}

impl Monitor {
    pub fn new(monitor: NewMonitor, now: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Default::default(),
            name: or_default(&monitor.name, DEFAULT_NAME),
            download_url: download_url(&monitor.download_url)?,
            recipient: required(&monitor.recipient, ValidationError::MissingRecipient)?,
            version_label: or_default(&monitor.version_label, DEFAULT_VERSION_LABEL),
            enabled: true,
            deadline: None,
            last_verification: None,
            last_checked_at: None,
            last_error: None,
            last_notified: None,
            verification_invalidated_at: None,
            created: now,
            updated: now,
            version: 0,
        })
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = or_default(name, DEFAULT_NAME);
    }

    pub fn set_recipient(&mut self, recipient: &str) -> Result<(), ValidationError> {
        self.recipient = required(recipient, ValidationError::MissingRecipient)?;
        Ok(())
    }

    pub fn set_download_url(&mut self, url: &str, now: i64) -> Result<(), ValidationError> {
        let url = download_url(url)?;
        if url != self.download_url {
            self.download_url = url;
            self.invalidate_verification(now);
        }
        Ok(())
    }

    pub fn set_version_label(&mut self, label: &str, now: i64) {
        let label = or_default(label, DEFAULT_VERSION_LABEL);
        if label != self.version_label {
            self.version_label = label;
            self.invalidate_verification(now);
        }
    }

    /// The verified material changed, so the monitor is due right away
    fn invalidate_verification(&mut self, now: i64) {
        self.last_verification = None;
        self.deadline = None;
        self.last_error = None;
        self.invalidate_checks_before(now);
    }

    fn invalidate_checks_before(&mut self, now: i64) {
        self.verification_invalidated_at = Some(
            self.verification_invalidated_at
                .map_or(now, |t| t.max(now)),
        );
    }

    /// Whether the periodic sweep should verify this monitor at `now`
    pub fn is_due(&self, now: i64, check_interval: i64) -> bool {
        if !self.enabled {
            return false;
        }
        match &self.last_verification {
            None => true,
            Some(snapshot) => now - snapshot.observed_at >= check_interval,
        }
    }

    /// Records a finished check.
    ///
    /// Results are ordered by `observed_at`, not by arrival: an attempt
    /// observed before the stored snapshot, or before the material or the
    /// expiry was last changed, is dropped. A transient failure keeps a
    /// previously known result.
    pub fn record_verification(&mut self, attempt: &VerificationAttempt) -> SnapshotWrite {
        if let Some(invalidated_at) = self.verification_invalidated_at {
            if attempt.observed_at < invalidated_at {
                return SnapshotWrite::Stale;
            }
        }
        if let Some(current) = &self.last_verification {
            if current.observed_at > attempt.observed_at {
                return SnapshotWrite::Stale;
            }
        }
        self.last_checked_at = Some(
            self.last_checked_at
                .map_or(attempt.observed_at, |t| t.max(attempt.observed_at)),
        );

        match &attempt.outcome {
            Ok(verification) => {
                self.last_verification = Some(attempt.snapshot());
                if verification.expires_at.is_some() {
                    self.deadline = verification.expires_at;
                }
                self.last_error = None;
                SnapshotWrite::Applied
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                let known = self
                    .last_verification
                    .as_ref()
                    .map(|s| s.result != VerificationResult::Unknown)
                    .unwrap_or(false);
                if e.is_transient() && known {
                    SnapshotWrite::PreservedKnown
                } else {
                    self.last_verification = Some(attempt.snapshot());
                    SnapshotWrite::Applied
                }
            }
        }
    }

    /// Decides what the dispatcher should do about the current status.
    pub fn alert_decision(&self, now: i64) -> AlertDecision {
        let snapshot = match &self.last_verification {
            Some(snapshot) if self.enabled => snapshot,
            _ => return AlertDecision::Nothing,
        };
        if let Some(notified) = &self.last_notified {
            if notified.observed_at > snapshot.observed_at {
                return AlertDecision::Nothing;
            }
        }
        let status = self.status(now);
        let notified_status = self.last_notified.as_ref().map(|t| t.status);

        if status.is_alert_worthy() {
            if notified_status == Some(status) {
                return AlertDecision::Nothing;
            }
            return AlertDecision::Notify(Transition {
                old_status: notified_status.unwrap_or(Status::Unknown),
                new_status: status,
                observed_at: snapshot.observed_at,
            });
        }

        match notified_status {
            Some(notified) if status == Status::Valid && notified != Status::Valid => {
                AlertDecision::Rearm(NotifiedTransition {
                    status,
                    observed_at: snapshot.observed_at,
                })
            }
            _ => AlertDecision::Nothing,
        }
    }

    pub fn mark_notified(&mut self, transition: NotifiedTransition) -> bool {
        advance_notified(&mut self.last_notified, transition)
    }

    pub fn notification_target(&self) -> NotificationTarget {
        NotificationTarget {
            kind: EntityKind::Monitor,
            id: self.id.clone(),
            title: self.name.clone(),
            recipient: self.recipient.clone(),
            deadline: self.deadline,
        }
    }
}

impl DeriveStatus for Monitor {
    fn status(&self, _now: i64) -> Status {
        if !self.enabled {
            return Status::Paused;
        }
        let observed = self.last_verification.as_ref().map(|s| s.result);
        if observed == Some(VerificationResult::Revoked) {
            return Status::Revoked;
        }
        // Expiry is verifier authoritative, passing `deadline` on the clock
        // alone does not make a monitor expired
        observed.map(Status::from).unwrap_or(Status::Unknown)
    }
}

impl Postpone for Monitor {
    fn postpone(&mut self, days: i64, now: i64) -> Result<(), ValidationError> {
        let old_deadline = self.deadline.ok_or(ValidationError::UnknownDeadline)?;
        self.deadline = Some(postpone_deadline(old_deadline, days)?);

        let stale_expiry = self
            .last_verification
            .as_ref()
            .map(|s| s.result == VerificationResult::Expired && s.observed_at < old_deadline)
            .unwrap_or(false);
        if stale_expiry {
            self.last_verification = None;
        }
        forget_deadline_bound(&mut self.last_notified);
        self.invalidate_checks_before(now);
        self.updated = now;
        Ok(())
    }
}

impl Entity for Monitor {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Versioned for Monitor {
    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}
