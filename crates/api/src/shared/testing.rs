use duewatch_domain::{
    Memo, Monitor, NewMemo, NewMonitor, NotificationTarget, NotifyError, Status, Verification,
    VerificationResult, VerifyError, ID,
};
use duewatch_infra::{
    Config, DuewatchContext, INotifier, ISys, IVerifier, IVersionedRepo, Services,
};
use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicI64, AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

pub const MINUTE: i64 = 1000 * 60;

/// Wed Jan 01 2025 00:00:00 GMT+0000
pub const JAN_1_2025: i64 = 1735689600000;

/// Clock that only moves when told to
pub struct VirtualSys {
    now: AtomicI64,
}

impl VirtualSys {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl ISys for VirtualSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

pub enum Step {
    Reply(Result<Verification, VerifyError>),
    /// Never answers
    Hang,
}

/// Verifier answering from a script per download url. Unscripted
/// urls verify as valid.
#[derive(Default)]
pub struct ScriptedVerifier {
    steps: Mutex<HashMap<String, VecDeque<Step>>>,
    calls: AtomicUsize,
}

impl ScriptedVerifier {
    pub fn push(&self, download_url: &str, step: Step) {
        self.steps
            .lock()
            .unwrap()
            .entry(download_url.to_string())
            .or_default()
            .push_back(step);
    }

    pub fn reply(&self, download_url: &str, result: VerificationResult, expires_at: Option<i64>) {
        self.push(download_url, Step::Reply(Ok(verification(result, expires_at))));
    }

    pub fn fail(&self, download_url: &str, error: VerifyError) {
        self.push(download_url, Step::Reply(Err(error)));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn verification(result: VerificationResult, expires_at: Option<i64>) -> Verification {
    Verification {
        result,
        detail: Default::default(),
        expires_at,
    }
}

#[async_trait::async_trait]
impl IVerifier for ScriptedVerifier {
    async fn verify(&self, monitor: &Monitor) -> Result<Verification, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self
            .steps
            .lock()
            .unwrap()
            .get_mut(&monitor.download_url)
            .and_then(|steps| steps.pop_front());
        match step {
            Some(Step::Reply(res)) => res,
            Some(Step::Hang) => futures::future::pending().await,
            None => Ok(verification(VerificationResult::Valid, None)),
        }
    }
}

/// Notifier remembering what it delivered, optionally failing, hanging or
/// answering slowly first
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(ID, Status, Status)>>,
    failures_left: AtomicUsize,
    hangs_left: AtomicUsize,
    delay_millis: AtomicU64,
}

impl RecordingNotifier {
    pub fn fail_next(&self, times: usize) {
        self.failures_left.store(times, Ordering::SeqCst);
    }

    /// The next `times` sends never answer
    pub fn hang_next(&self, times: usize) {
        self.hangs_left.store(times, Ordering::SeqCst);
    }

    /// Every send waits this long (real time) before it is delivered
    pub fn delay(&self, millis: u64) {
        self.delay_millis.store(millis, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(ID, Status, Status)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, id: &ID) -> Vec<(Status, Status)> {
        self.sent()
            .into_iter()
            .filter(|(sent_id, _, _)| sent_id == id)
            .map(|(_, old, new)| (old, new))
            .collect()
    }
}

#[async_trait::async_trait]
impl INotifier for RecordingNotifier {
    async fn send(
        &self,
        target: &NotificationTarget,
        old_status: Status,
        new_status: Status,
    ) -> Result<(), NotifyError> {
        let failures_left = self.failures_left.load(Ordering::SeqCst);
        if failures_left > 0 {
            self.failures_left.store(failures_left - 1, Ordering::SeqCst);
            return Err(NotifyError::Unreachable("connection refused".into()));
        }
        let hangs_left = self.hangs_left.load(Ordering::SeqCst);
        if hangs_left > 0 {
            self.hangs_left.store(hangs_left - 1, Ordering::SeqCst);
            return futures::future::pending().await;
        }
        let delay = self.delay_millis.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.sent
            .lock()
            .unwrap()
            .push((target.id.clone(), old_status, new_status));
        Ok(())
    }
}

pub struct TestContext {
    pub ctx: DuewatchContext,
    pub sys: Arc<VirtualSys>,
    pub verifier: Arc<ScriptedVerifier>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn setup(now: i64) -> TestContext {
    let mut config = Config::new();
    config.check_interval = 5 * MINUTE;
    config.verification_concurrency = 2;
    config.verification_timeout = 1000;
    config.notify_timeout = 1000;

    let sys = Arc::new(VirtualSys::new(now));
    let verifier = Arc::new(ScriptedVerifier::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let mut ctx = DuewatchContext::create(config);
    ctx.sys = sys.clone();
    ctx.services = Services {
        verifier: verifier.clone(),
        notifier: notifier.clone(),
    };

    TestContext {
        ctx,
        sys,
        verifier,
        notifier,
    }
}

pub async fn insert_memo(ctx: &DuewatchContext, deadline: i64, reminder_minutes: i64) -> Memo {
    let memo = Memo::new(
        NewMemo {
            title: "Renew passport".into(),
            description: "".into(),
            recipient: "someone@example.com".into(),
            deadline: Some(deadline),
            reminder_minutes,
        },
        ctx.sys.get_timestamp_millis(),
    )
    .unwrap();
    ctx.repos.memos.insert(&memo).await.unwrap();
    memo
}

pub async fn insert_monitor(ctx: &DuewatchContext, download_url: &str) -> Monitor {
    let monitor = Monitor::new(
        NewMonitor {
            name: "Field app".into(),
            download_url: download_url.into(),
            recipient: "ops@example.com".into(),
            version_label: "v1".into(),
        },
        ctx.sys.get_timestamp_millis(),
    )
    .unwrap();
    ctx.repos.monitors.insert(&monitor).await.unwrap();
    monitor
}

pub async fn find_memo(ctx: &DuewatchContext, id: &ID) -> Memo {
    ctx.repos.memos.find(id).await.unwrap()
}

pub async fn find_monitor(ctx: &DuewatchContext, id: &ID) -> Monitor {
    ctx.repos.monitors.find(id).await.unwrap()
}
