use crate::dispatcher::dispatch_monitor_alert_locked;
use crate::error::DuewatchError;
use crate::shared::{
    usecase::{execute, UseCase},
    versioned::{write_with_retry, WriteError},
};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::{check_monitor, check_monitors};
use duewatch_domain::{
    CheckOutcome, Monitor, SnapshotWrite, VerificationAttempt, VerificationLog, VerifyError, ID,
};
use duewatch_infra::{DuewatchContext, IVersionedRepo};
use futures::stream::{FuturesUnordered, StreamExt};
use std::{convert::Infallible, sync::Arc, time::Duration};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::NotFound(monitor_id) => DuewatchError::NotFound(format!(
            "The monitor with id: {}, was not found.",
            monitor_id
        )),
        UseCaseError::StorageError => DuewatchError::InternalError,
    }
}

pub async fn check_monitors_controller(
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let usecase = CheckMonitorsUseCase {
        target: CheckTarget::All,
        cancel: CancellationToken::new(),
    };

    execute(usecase, &ctx)
        .await
        .map(|report| {
            HttpResponse::Ok().json(check_monitors::APIResponse::new(
                report.outcomes,
                report.cancelled,
                report.now,
            ))
        })
        .map_err(handle_error)
}

pub async fn check_monitor_controller(
    path: web::Path<check_monitor::PathParams>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let usecase = CheckMonitorsUseCase {
        target: CheckTarget::One(path.monitor_id.clone()),
        cancel: CancellationToken::new(),
    };

    execute(usecase, &ctx)
        .await
        .map(|report| {
            HttpResponse::Ok().json(check_monitor::APIResponse::new(
                report.outcomes,
                report.cancelled,
                report.now,
            ))
        })
        .map_err(handle_error)
}

#[derive(Debug, Clone)]
pub enum CheckTarget {
    /// A single monitor, regardless of its interval or whether it is enabled
    One(ID),
    /// Every enabled monitor, regardless of interval
    All,
    /// Enabled monitors whose last verification is older than the check interval
    Due,
}

/// Verifies monitors concurrently and records the results.
///
/// Failing checks never stop the others, they end up in the report.
/// Cancelling drops the checks still in flight, results that were already
/// written are kept.
#[derive(Debug)]
pub struct CheckMonitorsUseCase {
    pub target: CheckTarget,
    pub cancel: CancellationToken,
}

#[derive(Debug)]
pub struct CheckReport {
    pub outcomes: Vec<(Monitor, CheckOutcome)>,
    pub cancelled: bool,
    /// When the check started
    pub now: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CheckMonitorsUseCase {
    type Response = CheckReport;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let monitors = match &self.target {
            CheckTarget::One(monitor_id) => {
                let monitor = ctx
                    .repos
                    .monitors
                    .find(monitor_id)
                    .await
                    .ok_or_else(|| UseCaseError::NotFound(monitor_id.clone()))?;
                vec![monitor]
            }
            CheckTarget::All => ctx
                .repos
                .monitors
                .find_enabled()
                .await
                .map_err(|_| UseCaseError::StorageError)?,
            CheckTarget::Due => ctx
                .repos
                .monitors
                .find_enabled()
                .await
                .map_err(|_| UseCaseError::StorageError)?
                .into_iter()
                .filter(|monitor| monitor.is_due(now, ctx.config.check_interval))
                .collect(),
        };

        let permits = Arc::new(Semaphore::new(ctx.config.verification_concurrency));
        let mut checks = monitors
            .into_iter()
            .map(|monitor| check_monitor(monitor, permits.clone(), ctx))
            .collect::<FuturesUnordered<_>>();

        let mut outcomes = Vec::new();
        let mut cancelled = false;
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    cancelled = true;
                    break;
                }
                next = checks.next() => match next {
                    Some(Some(outcome)) => outcomes.push(outcome),
                    Some(None) => (),
                    None => break,
                },
            }
        }
        if cancelled {
            info!(
                "Monitor check cancelled with {} checks in flight",
                checks.len()
            );
        }

        Ok(CheckReport {
            outcomes,
            cancelled,
            now,
        })
    }
}

/// Runs one verification. `None` when the monitor disappeared or its
/// result could not be stored. Dropping this future abandons the
/// verification, never a recording that already started.
async fn check_monitor(
    monitor: Monitor,
    permits: Arc<Semaphore>,
    ctx: &DuewatchContext,
) -> Option<(Monitor, CheckOutcome)> {
    let _permit = permits.acquire().await.ok()?;

    let observed_at = ctx.sys.get_timestamp_millis();
    let timeout = Duration::from_millis(ctx.config.verification_timeout as u64);
    let outcome = match tokio::time::timeout(timeout, ctx.services.verifier.verify(&monitor)).await
    {
        Ok(res) => res,
        Err(_) => Err(VerifyError::Network(format!(
            "Verification timed out after {} ms",
            ctx.config.verification_timeout
        ))),
    };
    if let Err(e) = &outcome {
        warn!("Verification of monitor {} failed: {}", monitor.id, e);
    }

    let attempt = VerificationAttempt {
        observed_at,
        outcome,
    };
    // Detached, runs to completion even when the sweep is cancelled
    let ctx = ctx.clone();
    let monitor_id = monitor.id;
    actix_web::rt::spawn(async move { record_attempt(&monitor_id, attempt, &ctx).await })
        .await
        .ok()
        .flatten()
}

/// Writes the attempt to the monitor, dispatches the resulting alert and
/// appends it to the verification log
pub async fn record_attempt(
    monitor_id: &ID,
    attempt: VerificationAttempt,
    ctx: &DuewatchContext,
) -> Option<(Monitor, CheckOutcome)> {
    let _guard = ctx.locks.lock(monitor_id).await;

    let res = write_with_retry(ctx.repos.monitors.as_ref(), monitor_id, |monitor| {
        Ok::<_, Infallible>(monitor.record_verification(&attempt))
    })
    .await;
    let (monitor, write) = match res {
        Ok(res) => res,
        Err(WriteError::NotFound) => {
            info!("Monitor {} was deleted during verification", monitor_id);
            return None;
        }
        Err(e) => {
            error!(
                "Unable to record verification of monitor {}: {:?}",
                monitor_id, e
            );
            return None;
        }
    };

    let (monitor, notified) = if write == SnapshotWrite::Stale {
        (monitor, false)
    } else {
        let now = ctx.sys.get_timestamp_millis();
        let dispatch = dispatch_monitor_alert_locked(monitor_id, now, ctx).await;
        let monitor = ctx.repos.monitors.find(monitor_id).await.unwrap_or(monitor);
        (monitor, dispatch.is_sent())
    };

    let log = VerificationLog::new(monitor_id.clone(), &attempt, notified);
    if let Err(e) = ctx.repos.verification_logs.insert(&log).await {
        error!(
            "Unable to store verification log of monitor {}: {:?}",
            monitor_id, e
        );
    }

    Some((
        monitor,
        CheckOutcome {
            monitor_id: monitor_id.clone(),
            attempt,
            write,
            notified,
        },
    ))
}
