use crate::{
    memo::send_memo_reminders::SendMemoRemindersUseCase,
    monitor::check_monitors::{CheckMonitorsUseCase, CheckTarget},
    shared::usecase::execute,
};
use actix_web::rt::time::interval;
use duewatch_infra::DuewatchContext;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// What started a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepTrigger {
    Interval,
    Manual,
}

/// Sends `SweepTrigger::Interval` every `period` until the receiver is dropped
pub fn interval_triggers(period: Duration) -> mpsc::Receiver<SweepTrigger> {
    let (sender, receiver) = mpsc::channel(1);
    actix_web::rt::spawn(async move {
        let mut interval = interval(period);
        loop {
            interval.tick().await;
            if sender.send(SweepTrigger::Interval).await.is_err() {
                break;
            }
        }
    });
    receiver
}

/// Runs a sweep per trigger until the trigger source closes or `shutdown`
/// is cancelled. Triggers that queued up during a sweep are merged into
/// the next one.
async fn run_sweeps<F, Fut>(
    mut triggers: mpsc::Receiver<SweepTrigger>,
    shutdown: CancellationToken,
    mut sweep: F,
) where
    F: FnMut(SweepTrigger) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    loop {
        let trigger = tokio::select! {
            _ = shutdown.cancelled() => break,
            trigger = triggers.recv() => match trigger {
                Some(trigger) => trigger,
                None => break,
            },
        };
        while triggers.try_recv().is_ok() {}

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = sweep(trigger) => (),
        }
    }
}

/// Verifies the monitors that are due, once per trigger
pub async fn run_verification_sweeps(
    ctx: DuewatchContext,
    triggers: mpsc::Receiver<SweepTrigger>,
    shutdown: CancellationToken,
) {
    let cancel = shutdown.clone();
    run_sweeps(triggers, shutdown, |trigger| {
        let usecase = CheckMonitorsUseCase {
            target: CheckTarget::Due,
            cancel: cancel.child_token(),
        };
        let ctx = &ctx;
        async move {
            if let Ok(report) = execute(usecase, ctx).await {
                if !report.outcomes.is_empty() {
                    info!(
                        "Verification sweep ({:?}) checked {} monitors",
                        trigger,
                        report.outcomes.len()
                    );
                }
            }
        }
    })
    .await
}

/// Delivers due memo reminders, once per trigger
pub async fn run_memo_reminder_sweeps(
    ctx: DuewatchContext,
    triggers: mpsc::Receiver<SweepTrigger>,
    shutdown: CancellationToken,
) {
    run_sweeps(triggers, shutdown, |trigger| {
        let ctx = &ctx;
        async move {
            if let Ok(report) = execute(SendMemoRemindersUseCase {}, ctx).await {
                if report.sent > 0 || report.failed > 0 {
                    info!(
                        "Reminder sweep ({:?}) sent {} reminders, {} failed",
                        trigger, report.sent, report.failed
                    );
                }
            }
        }
    })
    .await
}

pub fn start_verification_job_scheduler(ctx: DuewatchContext, shutdown: CancellationToken) {
    let period = Duration::from_millis(ctx.config.verification_sweep_interval as u64);
    actix_web::rt::spawn(run_verification_sweeps(
        ctx,
        interval_triggers(period),
        shutdown,
    ));
}

pub fn start_memo_reminders_job_scheduler(ctx: DuewatchContext, shutdown: CancellationToken) {
    let period = Duration::from_millis(ctx.config.reminder_sweep_interval as u64);
    actix_web::rt::spawn(run_memo_reminder_sweeps(
        ctx,
        interval_triggers(period),
        shutdown,
    ));
}
