//! Answer record domain model.

use serde::{Deserialize, Serialize};

/// One model's answer to a question, plus its optional humanized variant.
///
/// `model` is the record key within a comparison: a humanize result is
/// matched back to its record by this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    /// Model identifier (e.g. "GPT-4")
    pub model: String,
    /// Original answer text
    pub answer: String,
    /// Humanized answer, present only after a successful humanize
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humanized_answer: Option<String>,
}

impl AnswerRecord {
    pub fn new(model: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            answer: answer.into(),
            humanized_answer: None,
        }
    }

    pub fn is_humanized(&self) -> bool {
        self.humanized_answer.is_some()
    }

    /// Text placed on the clipboard: the humanized answer when present.
    pub fn copy_text(&self) -> &str {
        self.humanized_answer.as_deref().unwrap_or(&self.answer)
    }

    /// Sets the humanized answer if the record does not have one yet.
    ///
    /// Returns `true` when the record changed.
    pub fn apply_humanized(&mut self, text: impl Into<String>) -> bool {
        if self.humanized_answer.is_some() {
            return false;
        }
        self.humanized_answer = Some(text.into());
        true
    }
}

/// Payload returned by the humanize endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizedAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(alias = "answer")]
    pub humanized_answer: String,
}

impl HumanizedAnswer {
    pub fn new(model: impl Into<String>, humanized_answer: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            humanized_answer: humanized_answer.into(),
        }
    }
}

/// Drops records whose model already appeared earlier in the list.
pub fn dedup_by_model(answers: Vec<AnswerRecord>) -> Vec<AnswerRecord> {
    let mut unique: Vec<AnswerRecord> = Vec::with_capacity(answers.len());
    for record in answers {
        if unique.iter().any(|existing| existing.model == record.model) {
            tracing::warn!(model = %record.model, "Dropping duplicate answer record");
            continue;
        }
        unique.push(record);
    }
    unique
}
