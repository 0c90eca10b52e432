mod helpers;

use duewatch_sdk::{
    APIError, CreateMemoInput, CreateMonitorInput, DuewatchSDK, GetMemosInput,
    GetMonitorLogsInput, MemoFilter, MemoState, SnapshotWrite, Status, UpdateMemoInput,
    UpdateMonitorInput, VerificationResult, ID,
};
use helpers::setup::{now, spawn_app, CERT_EXPIRES_AT, DAY};

fn memo_input(title: &str, deadline: i64) -> CreateMemoInput {
    CreateMemoInput {
        title: title.into(),
        description: "".into(),
        recipient: "ops@example.com".into(),
        deadline: Some(deadline),
        reminder_minutes: Some(60),
    }
}

fn monitor_input(download_url: &str) -> CreateMonitorInput {
    CreateMonitorInput {
        name: "Signing certificate".into(),
        download_url: download_url.into(),
        recipient: "ops@example.com".into(),
        version_label: "v1".into(),
    }
}

async fn create_monitor(sdk: &DuewatchSDK, download_url: &str) -> duewatch_sdk::Monitor {
    sdk.monitor
        .create(monitor_input(download_url))
        .await
        .expect("To create monitor")
        .monitor
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_crud_memo() {
    let (_, sdk, _) = spawn_app().await;
    let deadline = now() + 2 * DAY;

    let memo = sdk
        .memo
        .create(memo_input("Renew domain", deadline))
        .await
        .expect("To create memo")
        .memo;
    assert_eq!(memo.title, "Renew domain");
    assert_eq!(memo.status, Status::Pending);
    assert_eq!(memo.reminder_at, deadline - 60 * 1000 * 60);

    let fetched = sdk.memo.get(memo.id.clone()).await.unwrap().memo;
    assert_eq!(fetched.id, memo.id);

    let updated = sdk
        .memo
        .update(UpdateMemoInput {
            memo_id: memo.id.clone(),
            title: Some("Renew domain and mail".into()),
            ..Default::default()
        })
        .await
        .unwrap()
        .memo;
    assert_eq!(updated.title, "Renew domain and mail");
    assert_eq!(updated.deadline, deadline);

    let postponed = sdk.memo.postpone(memo.id.clone(), 3).await.unwrap().memo;
    assert_eq!(postponed.deadline, deadline + 3 * DAY);

    let deleted = sdk.memo.delete(memo.id.clone()).await.unwrap().memo;
    assert_eq!(deleted.id, memo.id);
    assert!(matches!(
        sdk.memo.get(memo.id.clone()).await,
        Err(APIError::NotFound)
    ));
    assert!(matches!(
        sdk.memo.delete(memo.id).await,
        Err(APIError::NotFound)
    ));
}

#[actix_web::main]
#[test]
async fn test_create_memo_rejects_invalid_input() {
    let (_, sdk, _) = spawn_app().await;

    let mut missing_recipient = memo_input("Renew domain", now() + DAY);
    missing_recipient.recipient = "  ".into();
    assert!(matches!(
        sdk.memo.create(missing_recipient).await,
        Err(APIError::BadClientData)
    ));

    let mut missing_deadline = memo_input("Renew domain", now() + DAY);
    missing_deadline.deadline = None;
    assert!(matches!(
        sdk.memo.create(missing_deadline).await,
        Err(APIError::BadClientData)
    ));

    let mut negative_reminder = memo_input("Renew domain", now() + DAY);
    negative_reminder.reminder_minutes = Some(-5);
    assert!(matches!(
        sdk.memo.create(negative_reminder).await,
        Err(APIError::BadClientData)
    ));
}

#[actix_web::main]
#[test]
async fn test_postpone_memo_rejects_non_positive_days() {
    let (_, sdk, _) = spawn_app().await;
    let memo = sdk
        .memo
        .create(memo_input("Renew domain", now() + DAY))
        .await
        .unwrap()
        .memo;

    assert!(matches!(
        sdk.memo.postpone(memo.id.clone(), 0).await,
        Err(APIError::BadClientData)
    ));
    let unchanged = sdk.memo.get(memo.id).await.unwrap().memo;
    assert_eq!(unchanged.deadline, memo.deadline);
}

#[actix_web::main]
#[test]
async fn test_list_memos_filters_by_derived_status() {
    let (_, sdk, _) = spawn_app().await;
    let overdue = sdk
        .memo
        .create(memo_input("Overdue", now() - DAY))
        .await
        .unwrap()
        .memo;
    let upcoming = sdk
        .memo
        .create(memo_input("Upcoming", now() + 5 * DAY))
        .await
        .unwrap()
        .memo;
    let done = sdk
        .memo
        .create(memo_input("Done", now() - DAY))
        .await
        .unwrap()
        .memo;
    sdk.memo
        .update(UpdateMemoInput {
            memo_id: done.id.clone(),
            state: Some(MemoState::Completed),
            ..Default::default()
        })
        .await
        .unwrap();

    let expired = sdk
        .memo
        .list(GetMemosInput {
            status: Some(MemoFilter::Expired),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(expired.memos.len(), 1);
    assert_eq!(expired.memos[0].id, overdue.id);
    assert_eq!(expired.memos[0].status, Status::Expired);
    assert_eq!(expired.stats.total, 3);
    assert_eq!(expired.stats.pending, 1);
    assert_eq!(expired.stats.completed, 1);
    assert_eq!(expired.stats.expired, 1);

    let pending = sdk
        .memo
        .list(GetMemosInput {
            status: Some(MemoFilter::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.memos.len(), 1);
    assert_eq!(pending.memos[0].id, upcoming.id);

    let first_page = sdk
        .memo
        .list(GetMemosInput {
            page: Some(1),
            page_size: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(first_page.memos.len(), 2);
    assert_eq!(first_page.total, 3);
    assert_eq!(first_page.total_pages, 2);
}

#[actix_web::main]
#[test]
async fn test_overdue_memo_reminds_once() {
    let (app, sdk, _) = spawn_app().await;
    let memo = sdk
        .memo
        .create(memo_input("Pay invoice", now() - DAY))
        .await
        .unwrap()
        .memo;

    sdk.memo.get(memo.id.clone()).await.unwrap();
    sdk.memo.get(memo.id.clone()).await.unwrap();
    sdk.memo.list(GetMemosInput::default()).await.unwrap();

    let sent = app.notifications_about(&memo.id.to_string());
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["kind"], "memo");
    assert_eq!(sent[0]["recipient"], "ops@example.com");
    assert_eq!(sent[0]["newStatus"], "expired");

    let memo = sdk.memo.get(memo.id).await.unwrap().memo;
    let notified = memo.last_notified.expect("Reminder to be recorded");
    assert_eq!(notified.observed_at, memo.reminder_at);
}

#[actix_web::main]
#[test]
async fn test_crud_monitor() {
    let (_, sdk, _) = spawn_app().await;
    let monitor = create_monitor(&sdk, "https://certs.example.com/acme.pem").await;
    assert_eq!(monitor.status, Status::Unknown);
    assert!(monitor.enabled);
    assert!(monitor.deadline.is_none());

    let updated = sdk
        .monitor
        .update(UpdateMonitorInput {
            monitor_id: monitor.id.clone(),
            version_label: Some("v2".into()),
            enabled: Some(false),
            ..Default::default()
        })
        .await
        .unwrap()
        .monitor;
    assert_eq!(updated.version_label, "v2");
    assert_eq!(updated.status, Status::Paused);

    let listing = sdk.monitor.list().await.unwrap();
    assert_eq!(listing.monitors.len(), 1);
    assert_eq!(listing.stats.paused, 1);

    sdk.monitor.delete(monitor.id.clone()).await.unwrap();
    assert!(matches!(
        sdk.monitor.get(monitor.id).await,
        Err(APIError::NotFound)
    ));
}

#[actix_web::main]
#[test]
async fn test_create_monitor_rejects_invalid_url() {
    let (_, sdk, _) = spawn_app().await;
    assert!(matches!(
        sdk.monitor.create(monitor_input("not a url")).await,
        Err(APIError::BadClientData)
    ));
}

#[actix_web::main]
#[test]
async fn test_check_monitor_records_verification() {
    let (app, sdk, _) = spawn_app().await;
    let monitor = create_monitor(&sdk, "https://certs.example.com/acme.pem").await;

    let report = sdk.monitor.check(monitor.id.clone()).await.unwrap();
    assert!(!report.cancelled);
    assert!(report.failures.is_empty());
    assert_eq!(report.checked.len(), 1);
    let checked = &report.checked[0];
    assert_eq!(checked.write, SnapshotWrite::Applied);
    assert!(!checked.notified);
    assert_eq!(checked.monitor.status, Status::Valid);
    assert_eq!(checked.monitor.deadline, Some(CERT_EXPIRES_AT));
    let snapshot = checked
        .monitor
        .last_verification
        .as_ref()
        .expect("Snapshot to be stored");
    assert_eq!(snapshot.result, VerificationResult::Valid);

    let logs = sdk
        .monitor
        .logs(GetMonitorLogsInput {
            monitor_id: monitor.id.clone(),
            page: None,
            page_size: None,
        })
        .await
        .unwrap();
    assert_eq!(logs.total, 1);
    assert_eq!(logs.logs[0].result, VerificationResult::Valid);
    assert!(app.notifications_about(&monitor.id.to_string()).is_empty());

    let postponed = sdk.monitor.postpone(monitor.id, 3).await.unwrap().monitor;
    assert_eq!(postponed.deadline, Some(CERT_EXPIRES_AT + 3 * DAY));
}

#[actix_web::main]
#[test]
async fn test_revoked_monitor_alerts_once() {
    let (app, sdk, _) = spawn_app().await;
    let monitor = create_monitor(&sdk, "https://certs.example.com/revoked.pem").await;

    let first = sdk.monitor.check(monitor.id.clone()).await.unwrap();
    assert_eq!(first.checked[0].monitor.status, Status::Revoked);
    assert!(first.checked[0].notified);

    let second = sdk.monitor.check(monitor.id.clone()).await.unwrap();
    assert_eq!(second.checked[0].monitor.status, Status::Revoked);
    assert!(!second.checked[0].notified);

    let sent = app.notifications_about(&monitor.id.to_string());
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["kind"], "monitor");
    assert_eq!(sent[0]["oldStatus"], "unknown");
    assert_eq!(sent[0]["newStatus"], "revoked");

    let logs = sdk
        .monitor
        .logs(GetMonitorLogsInput {
            monitor_id: monitor.id,
            page: Some(1),
            page_size: Some(1),
        })
        .await
        .unwrap();
    assert_eq!(logs.total, 2);
    assert_eq!(logs.total_pages, 2);
    assert_eq!(logs.logs.len(), 1);
}

#[actix_web::main]
#[test]
async fn test_check_reports_verifier_failures() {
    let (_, sdk, _) = spawn_app().await;
    let monitor = create_monitor(&sdk, "https://certs.example.com/broken.bin").await;

    let report = sdk.monitor.check(monitor.id.clone()).await.unwrap();
    assert!(report.checked.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].monitor_id, monitor.id);
    assert_eq!(report.failures[0].kind, "unsupportedFormat");

    let monitor = sdk.monitor.get(monitor.id).await.unwrap().monitor;
    assert_eq!(monitor.status, Status::Unknown);
    assert!(monitor.last_error.is_some());
}

#[actix_web::main]
#[test]
async fn test_check_all_skips_disabled_monitors() {
    let (_, sdk, _) = spawn_app().await;
    let valid = create_monitor(&sdk, "https://certs.example.com/acme.pem").await;
    let expired = create_monitor(&sdk, "https://certs.example.com/expired.pem").await;
    let disabled = create_monitor(&sdk, "https://certs.example.com/other.pem").await;
    sdk.monitor
        .update(UpdateMonitorInput {
            monitor_id: disabled.id.clone(),
            enabled: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    let report = sdk.monitor.check_all().await.unwrap();
    assert_eq!(report.checked.len(), 2);
    assert!(report
        .checked
        .iter()
        .all(|checked| checked.monitor.id != disabled.id));
    let status_of = |id: &ID| {
        report
            .checked
            .iter()
            .find(|checked| &checked.monitor.id == id)
            .map(|checked| checked.monitor.status)
    };
    assert_eq!(status_of(&valid.id), Some(Status::Valid));
    assert_eq!(status_of(&expired.id), Some(Status::Expired));

    let listing = sdk.monitor.list().await.unwrap();
    assert_eq!(listing.stats.valid, 1);
    assert_eq!(listing.stats.expired, 1);
    assert_eq!(listing.stats.paused, 1);
}

#[actix_web::main]
#[test]
async fn test_unknown_monitor_is_not_found() {
    let (_, sdk, _) = spawn_app().await;
    let monitor = create_monitor(&sdk, "https://certs.example.com/acme.pem").await;
    sdk.monitor.delete(monitor.id.clone()).await.unwrap();

    assert!(matches!(
        sdk.monitor.check(monitor.id.clone()).await,
        Err(APIError::NotFound)
    ));
    assert!(matches!(
        sdk.monitor
            .logs(GetMonitorLogsInput {
                monitor_id: monitor.id.clone(),
                page: None,
                page_size: None,
            })
            .await,
        Err(APIError::NotFound)
    ));
    assert!(matches!(
        sdk.monitor.postpone(monitor.id, 1).await,
        Err(APIError::NotFound)
    ));
}
