use crate::shared::versioned::{write_with_retry, WriteError};
use duewatch_domain::{AlertDecision, NotificationTarget, NotifyError, Transition, ID};
use duewatch_infra::{DuewatchContext, IVersionedRepo};
use std::{convert::Infallible, time::Duration};
use tracing::{error, info, warn};

/// What happened when looking for a notification to deliver
#[derive(Debug)]
pub enum Dispatch {
    Sent(Transition),
    /// Back to a healthy status, the next alert may fire again
    Rearmed,
    NothingToSend,
    /// Delivery failed, nothing was recorded and the next cycle retries
    Failed(NotifyError),
    /// The entity does not exist anymore
    Gone,
}

impl Dispatch {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

/// Delivers the reminder of a memo if it is due at `now` and was not
/// delivered before
pub async fn dispatch_memo_reminder(memo_id: &ID, now: i64, ctx: &DuewatchContext) -> Dispatch {
    let _guard = ctx.locks.lock(memo_id).await;

    let memo = match ctx.repos.memos.find(memo_id).await {
        Some(memo) => memo,
        None => return Dispatch::Gone,
    };
    let transition = match memo.pending_reminder(now) {
        Some(transition) => transition,
        None => return Dispatch::NothingToSend,
    };

    if let Err(e) = deliver(&memo.notification_target(), &transition, ctx).await {
        warn!("Unable to deliver reminder for memo {}: {}", memo_id, e);
        return Dispatch::Failed(e);
    }
    info!("Delivered reminder for memo {}", memo_id);

    let notified = transition.notified();
    let res = write_with_retry(ctx.repos.memos.as_ref(), memo_id, |memo| {
        memo.mark_notified(notified.clone());
        Ok::<_, Infallible>(())
    })
    .await;
    record_result(memo_id, res.map(|_| ()));
    Dispatch::Sent(transition)
}

/// Acts on the alert decision of a monitor.
///
/// The caller must hold the lock of the monitor, this runs right after a
/// snapshot was written within the same critical section.
pub async fn dispatch_monitor_alert_locked(
    monitor_id: &ID,
    now: i64,
    ctx: &DuewatchContext,
) -> Dispatch {
    let monitor = match ctx.repos.monitors.find(monitor_id).await {
        Some(monitor) => monitor,
        None => return Dispatch::Gone,
    };

    match monitor.alert_decision(now) {
        AlertDecision::Nothing => Dispatch::NothingToSend,
        AlertDecision::Rearm(notified) => {
            let res = write_with_retry(ctx.repos.monitors.as_ref(), monitor_id, |monitor| {
                monitor.mark_notified(notified.clone());
                Ok::<_, Infallible>(())
            })
            .await;
            record_result(monitor_id, res.map(|_| ()));
            Dispatch::Rearmed
        }
        AlertDecision::Notify(transition) => {
            if let Err(e) = deliver(&monitor.notification_target(), &transition, ctx).await {
                warn!("Unable to deliver alert for monitor {}: {}", monitor_id, e);
                return Dispatch::Failed(e);
            }
            info!(
                "Delivered alert for monitor {}: {} -> {}",
                monitor_id, transition.old_status, transition.new_status
            );

            let notified = transition.notified();
            let res = write_with_retry(ctx.repos.monitors.as_ref(), monitor_id, |monitor| {
                monitor.mark_notified(notified.clone());
                Ok::<_, Infallible>(())
            })
            .await;
            record_result(monitor_id, res.map(|_| ()));
            Dispatch::Sent(transition)
        }
    }
}

/// Sends one notification, giving up after the configured notify timeout.
/// The entity lock is held while this runs.
async fn deliver(
    target: &NotificationTarget,
    transition: &Transition,
    ctx: &DuewatchContext,
) -> Result<(), NotifyError> {
    let timeout = Duration::from_millis(ctx.config.notify_timeout as u64);
    let send = ctx
        .services
        .notifier
        .send(target, transition.old_status, transition.new_status);
    match tokio::time::timeout(timeout, send).await {
        Ok(res) => res,
        Err(_) => Err(NotifyError::Unreachable(format!(
            "No answer within {} ms",
            ctx.config.notify_timeout
        ))),
    }
}

fn record_result(entity_id: &ID, res: Result<(), WriteError<Infallible>>) {
    match res {
        Ok(_) => (),
        // Deleted after the notification went out, nothing left to record on
        Err(WriteError::NotFound) => (),
        Err(e) => error!(
            "Notification for {} was delivered but could not be recorded: {:?}",
            entity_id, e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::*;
    use duewatch_domain::{Status, VerificationAttempt, VerificationResult};

    #[actix_web::test]
    async fn memo_reminder_is_sent_once() {
        let deadline = JAN_1_2025;
        let TestContext {
            ctx, sys, notifier, ..
        } = setup(deadline - 60 * MINUTE);
        let memo = insert_memo(&ctx, deadline, 30).await;

        let now = deadline - 31 * MINUTE;
        sys.set(now);
        assert!(matches!(
            dispatch_memo_reminder(&memo.id, now, &ctx).await,
            Dispatch::NothingToSend
        ));

        let now = deadline - 30 * MINUTE;
        sys.set(now);
        assert!(dispatch_memo_reminder(&memo.id, now, &ctx).await.is_sent());
        for _ in 0..3 {
            assert!(!dispatch_memo_reminder(&memo.id, now, &ctx).await.is_sent());
        }
        assert_eq!(
            notifier.sent_to(&memo.id),
            vec![(Status::Pending, Status::Pending)]
        );
        let stored = find_memo(&ctx, &memo.id).await;
        assert_eq!(
            stored.last_notified.map(|t| t.observed_at),
            Some(deadline - 30 * MINUTE)
        );
    }

    #[actix_web::test]
    async fn failed_reminder_is_retried() {
        let deadline = JAN_1_2025;
        let TestContext { ctx, notifier, .. } = setup(deadline);
        let memo = insert_memo(&ctx, deadline, 0).await;

        notifier.fail_next(1);
        assert!(matches!(
            dispatch_memo_reminder(&memo.id, deadline, &ctx).await,
            Dispatch::Failed(_)
        ));
        assert!(find_memo(&ctx, &memo.id).await.last_notified.is_none());

        assert!(dispatch_memo_reminder(&memo.id, deadline, &ctx).await.is_sent());
        assert!(!dispatch_memo_reminder(&memo.id, deadline, &ctx).await.is_sent());
        assert_eq!(notifier.sent_to(&memo.id).len(), 1);
    }

    #[actix_web::test]
    async fn deleted_memo_is_gone() {
        let TestContext { ctx, .. } = setup(0);
        assert!(matches!(
            dispatch_memo_reminder(&ID::default(), 0, &ctx).await,
            Dispatch::Gone
        ));
    }

    #[actix_web::test]
    async fn monitor_alert_follows_snapshot() {
        let TestContext { ctx, notifier, .. } = setup(JAN_1_2025);
        let monitor = insert_monitor(&ctx, "https://example.com/app.ipa").await;

        let attempt = VerificationAttempt {
            observed_at: JAN_1_2025,
            outcome: Ok(verification(VerificationResult::Revoked, None)),
        };
        write_with_retry(ctx.repos.monitors.as_ref(), &monitor.id, |m| {
            Ok::<_, Infallible>(m.record_verification(&attempt))
        })
        .await
        .unwrap();

        let dispatch = dispatch_monitor_alert_locked(&monitor.id, JAN_1_2025, &ctx).await;
        assert!(dispatch.is_sent());
        assert!(matches!(
            dispatch_monitor_alert_locked(&monitor.id, JAN_1_2025, &ctx).await,
            Dispatch::NothingToSend
        ));
        assert_eq!(
            notifier.sent_to(&monitor.id),
            vec![(Status::Unknown, Status::Revoked)]
        );
    }

    #[actix_web::test]
    async fn hanging_notifier_gives_up_and_retries_later() {
        let deadline = JAN_1_2025;
        let TestContext { ctx, notifier, .. } = setup(deadline);
        let memo = insert_memo(&ctx, deadline, 0).await;

        notifier.hang_next(1);
        let dispatch = tokio::time::timeout(
            Duration::from_secs(3),
            dispatch_memo_reminder(&memo.id, deadline, &ctx),
        )
        .await
        .expect("Dispatch to give up after the notify timeout");
        match dispatch {
            Dispatch::Failed(NotifyError::Unreachable(_)) => (),
            other => panic!("Expected an unreachable recipient, got {:?}", other),
        }
        assert!(find_memo(&ctx, &memo.id).await.last_notified.is_none());

        // The lock was released, so the next cycle goes through
        assert!(dispatch_memo_reminder(&memo.id, deadline, &ctx).await.is_sent());
        assert_eq!(
            notifier.sent_to(&memo.id),
            vec![(Status::Pending, Status::Expired)]
        );
    }
}
