use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use aicompare_core::clipboard::MemoryClipboard;
use aicompare_core::comparison::{ComparisonController, FetchPhase};
use aicompare_core::notify::{Notification, RecordingNotifier};
use aicompare_core::{
    AnswerRecord, CompareError, ComparisonApi, HumanizedAnswer, Result, Session, SessionStore,
};
use async_trait::async_trait;
use tokio::sync::Notify;

/// Backend double returning scripted responses, optionally parked until released.
#[derive(Default)]
struct ScriptedApi {
    answers: Mutex<Vec<Result<Vec<AnswerRecord>>>>,
    humanized: Mutex<Vec<Result<HumanizedAnswer>>>,
    asks: AtomicUsize,
    humanizes: AtomicUsize,
    humanizes_in_flight: AtomicUsize,
    max_humanizes_in_flight: AtomicUsize,
    park_humanize: bool,
    park_ask: bool,
    entered: Notify,
    release: Notify,
}

impl ScriptedApi {
    fn with_answers(self, result: Result<Vec<AnswerRecord>>) -> Self {
        self.answers.lock().unwrap().push(result);
        self
    }

    fn with_humanized(self, result: Result<HumanizedAnswer>) -> Self {
        self.humanized.lock().unwrap().push(result);
        self
    }
}

#[async_trait]
impl ComparisonApi for ScriptedApi {
    async fn login(&self, _email: &str, _password: &str) -> Result<Session> {
        Err(CompareError::auth("Login failed"))
    }

    async fn register(&self, _email: &str, _password: &str, _name: &str) -> Result<Session> {
        Err(CompareError::auth("Registration failed"))
    }

    async fn ask_question(&self, _question: &str, _token: Option<&str>) -> Result<Vec<AnswerRecord>> {
        self.asks.fetch_add(1, Ordering::SeqCst);
        let result = self.answers.lock().unwrap().remove(0);
        if self.park_ask {
            self.entered.notify_one();
            self.release.notified().await;
        }
        result
    }

    async fn humanize_answer(
        &self,
        _question: &str,
        _model: &str,
        _token: Option<&str>,
    ) -> Result<HumanizedAnswer> {
        self.humanizes.fetch_add(1, Ordering::SeqCst);
        let running = self.humanizes_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_humanizes_in_flight.fetch_max(running, Ordering::SeqCst);
        let result = self.humanized.lock().unwrap().remove(0);
        if self.park_humanize {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.humanizes_in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

struct Harness {
    controller: Arc<ComparisonController>,
    notifier: Arc<RecordingNotifier>,
    clipboard: Arc<MemoryClipboard>,
}

fn harness(api: Arc<ScriptedApi>) -> Harness {
    let notifier = Arc::new(RecordingNotifier::new());
    let clipboard = Arc::new(MemoryClipboard::new());
    let controller = Arc::new(ComparisonController::new(
        api,
        Arc::new(SessionStore::new()),
        notifier.clone(),
        clipboard.clone(),
    ));
    Harness {
        controller,
        notifier,
        clipboard,
    }
}

fn two_answers() -> Vec<AnswerRecord> {
    vec![
        AnswerRecord::new("GPT-4", "4"),
        AnswerRecord::new("Claude", "four"),
    ]
}

#[tokio::test]
async fn test_ask_then_humanize_one_model() {
    let api = Arc::new(
        ScriptedApi::default()
            .with_answers(Ok(two_answers()))
            .with_humanized(Ok(HumanizedAnswer::new("GPT-4", "It's 4!"))),
    );
    let h = harness(api);

    let state = h.controller.on_submit("What is 2+2?").await;
    assert_eq!(state.answers, two_answers());
    assert!(!state.is_loading());

    let state = h.controller.humanize("GPT-4").await;
    let gpt = state.answer("GPT-4").unwrap();
    assert_eq!(gpt.answer, "4");
    assert_eq!(gpt.humanized_answer.as_deref(), Some("It's 4!"));
    assert_eq!(state.answer("Claude"), Some(&AnswerRecord::new("Claude", "four")));
    assert!(state.humanize_loading().is_none());
}

#[tokio::test]
async fn test_server_error_leaves_answers_empty() {
    let api = Arc::new(
        ScriptedApi::default().with_answers(Err(CompareError::request(500, "Failed to get AI answers"))),
    );
    let h = harness(api);

    let state = h.controller.on_submit("What is 2+2?").await;

    assert!(state.answers.is_empty());
    assert!(!state.is_loading());
    assert_eq!(state.fetch, FetchPhase::Failed);
    assert_eq!(h.notifier.notifications(), vec![Notification::fetch_failed()]);
}

#[tokio::test]
async fn test_new_question_never_keeps_old_answers() {
    let api = Arc::new(
        ScriptedApi::default()
            .with_answers(Ok(two_answers()))
            .with_answers(Ok(vec![AnswerRecord::new("PaLM", "blue")])),
    );
    let h = harness(api);

    h.controller.on_submit("What is 2+2?").await;
    let state = h.controller.on_submit("Why is the sky blue?").await;

    assert_eq!(state.answers, vec![AnswerRecord::new("PaLM", "blue")]);
    assert_eq!(state.asked_question.as_deref(), Some("Why is the sky blue?"));
}

#[tokio::test]
async fn test_loading_is_visible_while_fetch_is_pending() {
    let api = Arc::new(ScriptedApi {
        park_ask: true,
        ..ScriptedApi::default()
    }
    .with_answers(Ok(two_answers())));
    let h = harness(api.clone());

    let ctrl = h.controller.clone();
    let pending = tokio::spawn(async move { ctrl.on_submit("What is 2+2?").await });
    api.entered.notified().await;

    let during = h.controller.snapshot().await;
    assert!(during.is_loading());
    assert!(during.answers.is_empty());

    // A second submission while the first is pending is ignored.
    h.controller.on_submit("Another question").await;
    assert_eq!(api.asks.load(Ordering::SeqCst), 1);

    api.release.notify_one();
    let settled = pending.await.unwrap();
    assert!(!settled.is_loading());
    assert_eq!(settled.answers, two_answers());
}

#[tokio::test]
async fn test_only_one_humanize_in_flight() {
    let api = Arc::new(ScriptedApi {
        park_humanize: true,
        ..ScriptedApi::default()
    }
    .with_answers(Ok(two_answers()))
    .with_humanized(Ok(HumanizedAnswer::new("GPT-4", "It's 4!"))));
    let h = harness(api.clone());
    h.controller.on_submit("What is 2+2?").await;

    let ctrl = h.controller.clone();
    let first = tokio::spawn(async move { ctrl.humanize("GPT-4").await });
    api.entered.notified().await;

    let during = h.controller.humanize("Claude").await;
    assert_eq!(during.humanize_loading(), Some("GPT-4"));
    assert_eq!(api.humanizes.load(Ordering::SeqCst), 1);

    api.release.notify_one();
    let settled = first.await.unwrap();
    assert!(settled.humanize_loading().is_none());
    assert!(settled.answer("Claude").unwrap().humanized_answer.is_none());
    assert!(settled.can_humanize("Claude"));
}

#[tokio::test]
async fn test_reset_discards_in_flight_answers() {
    let api = Arc::new(ScriptedApi {
        park_ask: true,
        ..ScriptedApi::default()
    }
    .with_answers(Ok(two_answers())));
    let h = harness(api.clone());

    let ctrl = h.controller.clone();
    let pending = tokio::spawn(async move { ctrl.on_submit("What is 2+2?").await });
    api.entered.notified().await;

    h.controller.reset().await;
    api.release.notify_one();
    let settled = pending.await.unwrap();

    assert!(settled.answers.is_empty());
    assert_eq!(settled.fetch, FetchPhase::Idle);
}

#[tokio::test]
async fn test_reset_and_resubmit_keep_single_humanize_in_flight() {
    let api = Arc::new(ScriptedApi {
        park_humanize: true,
        ..ScriptedApi::default()
    }
    .with_answers(Ok(two_answers()))
    .with_answers(Ok(two_answers()))
    .with_humanized(Ok(HumanizedAnswer::new("GPT-4", "stale")))
    .with_humanized(Ok(HumanizedAnswer::new("GPT-4", "It's 4!"))));
    let h = harness(api.clone());
    h.controller.on_submit("What is 2+2?").await;

    let ctrl = h.controller.clone();
    let first = tokio::spawn(async move { ctrl.humanize("GPT-4").await });
    api.entered.notified().await;

    h.controller.reset().await;
    let resubmitted = h.controller.on_submit("What is 3+1?").await;
    assert_eq!(resubmitted.answers, two_answers());
    assert_eq!(resubmitted.humanize_loading(), Some("GPT-4"));

    // The first request is still running, so this one must not go out.
    let during = h.controller.humanize("GPT-4").await;
    assert_eq!(during.humanize_loading(), Some("GPT-4"));
    assert_eq!(api.humanizes.load(Ordering::SeqCst), 1);

    api.release.notify_one();
    let settled = first.await.unwrap();
    assert!(settled.humanize_loading().is_none());
    assert!(settled.answer("GPT-4").unwrap().humanized_answer.is_none());

    let ctrl = h.controller.clone();
    let second = tokio::spawn(async move { ctrl.humanize("GPT-4").await });
    api.entered.notified().await;
    api.release.notify_one();
    let done = second.await.unwrap();

    assert_eq!(
        done.answer("GPT-4").unwrap().humanized_answer.as_deref(),
        Some("It's 4!")
    );
    assert_eq!(api.humanizes.load(Ordering::SeqCst), 2);
    assert_eq!(api.max_humanizes_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_humanize_failure_allows_retry() {
    let api = Arc::new(
        ScriptedApi::default()
            .with_answers(Ok(two_answers()))
            .with_humanized(Err(CompareError::transport("connection reset")))
            .with_humanized(Ok(HumanizedAnswer::new("Claude", "Four, friend."))),
    );
    let h = harness(api.clone());
    h.controller.on_submit("What is 2+2?").await;

    let failed = h.controller.humanize("Claude").await;
    assert!(failed.answer("Claude").unwrap().humanized_answer.is_none());
    assert_eq!(h.notifier.drain(), vec![Notification::humanize_failed()]);

    let retried = h.controller.humanize("Claude").await;
    assert_eq!(
        retried.answer("Claude").unwrap().humanized_answer.as_deref(),
        Some("Four, friend.")
    );
    assert_eq!(api.humanizes.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_copy_uses_humanized_then_original() {
    let api = Arc::new(
        ScriptedApi::default()
            .with_answers(Ok(vec![AnswerRecord::new("GPT-4", "Y")]))
            .with_humanized(Ok(HumanizedAnswer::new("GPT-4", "X"))),
    );
    let h = harness(api);
    h.controller.on_submit("q").await;

    h.controller.copy("GPT-4").await;
    assert_eq!(h.clipboard.contents().as_deref(), Some("Y"));

    h.controller.humanize("GPT-4").await;
    h.controller.copy("GPT-4").await;
    assert_eq!(h.clipboard.contents().as_deref(), Some("X"));
    assert_eq!(
        h.notifier.notifications(),
        vec![Notification::copied(), Notification::copied()]
    );
}
