//! View-model state for the comparison screen.

use serde::{Deserialize, Serialize};

use crate::answer::AnswerRecord;

/// Progress of the "fetch all answers" flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FetchPhase {
    /// Nothing asked yet
    #[default]
    Idle,
    /// Waiting for the answers of the latest submission
    Fetching,
    /// Answers of the latest submission are shown
    Populated,
    /// The latest submission failed; no answers are shown
    Failed,
}

/// The humanize request currently on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanizeInFlight {
    pub model: String,
    /// Generation the request was issued under
    pub generation: u64,
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonState {
    /// Current input text; kept after submission
    pub question: String,
    pub answers: Vec<AnswerRecord>,
    pub fetch: FetchPhase,
    /// Humanize request in flight; held until that request settles,
    /// even across a reset or a new submission
    pub humanizing: Option<HumanizeInFlight>,
    /// Bumped on every accepted submission and on reset
    pub generation: u64,
    /// Question the shown answers belong to
    pub asked_question: Option<String>,
}

impl ComparisonState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.fetch == FetchPhase::Fetching
    }

    pub fn humanize_loading(&self) -> Option<&str> {
        self.humanizing.as_ref().map(|pending| pending.model.as_str())
    }

    pub fn answer(&self, model: &str) -> Option<&AnswerRecord> {
        self.answers.iter().find(|record| record.model == model)
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.question.trim().is_empty()
    }

    /// Whether the humanize control for `model` should be enabled.
    pub fn can_humanize(&self, model: &str) -> bool {
        self.humanizing.is_none()
            && self
                .answer(model)
                .is_some_and(|record| !record.is_humanized())
    }
}
