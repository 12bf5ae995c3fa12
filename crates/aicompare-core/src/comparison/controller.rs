//! Async driver for the comparison state machine.
//!
//! The controller owns the [`ComparisonState`], feeds events through
//! [`transition`] and runs the resulting effects against the backend,
//! clipboard and notifier. The state lock is released while a request is
//! in flight, so several callers can drive one controller concurrently.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::effect::Effect;
use super::event::Event;
use super::state::ComparisonState;
use super::transition::transition;
use crate::api::ComparisonApi;
use crate::clipboard::Clipboard;
use crate::notify::{Notification, Notifier};
use crate::session::SessionStore;

pub struct ComparisonController {
    state: Mutex<ComparisonState>,
    api: Arc<dyn ComparisonApi>,
    sessions: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    clipboard: Arc<dyn Clipboard>,
}

impl ComparisonController {
    pub fn new(
        api: Arc<dyn ComparisonApi>,
        sessions: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            state: Mutex::new(ComparisonState::new()),
            api,
            sessions,
            notifier,
            clipboard,
        }
    }

    /// Returns a copy of the current state for rendering.
    pub async fn snapshot(&self) -> ComparisonState {
        self.state.lock().await.clone()
    }

    pub async fn edit_question(&self, text: impl Into<String>) {
        self.dispatch(Event::QuestionEdited(text.into())).await;
    }

    /// Submits the current question and waits until the fetch settles.
    pub async fn submit(&self) -> ComparisonState {
        self.dispatch(Event::Submit).await;
        self.snapshot().await
    }

    /// Sets the question and submits it in one step.
    pub async fn on_submit(&self, text: impl Into<String>) -> ComparisonState {
        self.edit_question(text).await;
        self.submit().await
    }

    /// Humanizes one model's answer.
    ///
    /// Dropped without a request when another humanize is in flight or the
    /// record is already humanized.
    pub async fn humanize(&self, model: &str) -> ComparisonState {
        self.dispatch(Event::HumanizeRequested(model.to_string()))
            .await;
        self.snapshot().await
    }

    /// Copies one model's answer (humanized when available).
    pub async fn copy(&self, model: &str) {
        self.dispatch(Event::CopyRequested(model.to_string())).await;
    }

    pub async fn reset(&self) {
        self.dispatch(Event::Reset).await;
    }

    async fn apply(&self, event: Event) -> Vec<Effect> {
        let mut guard = self.state.lock().await;
        let (next, effects) = transition(&guard, event);
        *guard = next;
        effects
    }

    async fn dispatch(&self, event: Event) {
        let mut queue: VecDeque<Effect> = self.apply(event).await.into();

        while let Some(effect) = queue.pop_front() {
            if let Some(follow_up) = self.run_effect(effect).await {
                queue.extend(self.apply(follow_up).await);
            }
        }
    }

    async fn run_effect(&self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::FetchAnswers {
                generation,
                question,
            } => {
                tracing::debug!(generation, "Fetching answers");
                let token = self.sessions.token();
                let event = match self.api.ask_question(&question, token.as_deref()).await {
                    Ok(answers) => Event::AnswersLoaded {
                        generation,
                        answers,
                    },
                    Err(err) => Event::AnswersFailed {
                        generation,
                        message: err.to_string(),
                    },
                };
                Some(event)
            }
            Effect::Humanize {
                generation,
                question,
                model,
            } => {
                tracing::debug!(%model, generation, "Humanizing answer");
                let token = self.sessions.token();
                let event = match self
                    .api
                    .humanize_answer(&question, &model, token.as_deref())
                    .await
                {
                    Ok(payload) => {
                        if let Some(returned) = payload.model.as_deref()
                            && returned != model
                        {
                            tracing::warn!(requested = %model, %returned, "Humanize payload names another model");
                        }
                        Event::HumanizeSucceeded {
                            generation,
                            model,
                            text: payload.humanized_answer,
                        }
                    }
                    Err(err) => Event::HumanizeFailed {
                        generation,
                        model,
                        message: err.to_string(),
                    },
                };
                Some(event)
            }
            Effect::CopyToClipboard(text) => {
                match self.clipboard.write_text(&text) {
                    Ok(()) => self.notifier.notify(Notification::copied()),
                    Err(err) => tracing::warn!(error = %err, "Copy to clipboard failed"),
                }
                None
            }
            Effect::Notify(notification) => {
                self.notifier.notify(notification);
                None
            }
        }
    }
}
