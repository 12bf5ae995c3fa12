//! Inputs to the comparison state machine.

use crate::answer::AnswerRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The question input changed
    QuestionEdited(String),
    /// The user submitted the current question
    Submit,
    /// The backend answered a submission
    AnswersLoaded {
        generation: u64,
        answers: Vec<AnswerRecord>,
    },
    /// A submission failed
    AnswersFailed { generation: u64, message: String },
    /// The user asked to humanize one model's answer
    HumanizeRequested(String),
    HumanizeSucceeded {
        generation: u64,
        model: String,
        text: String,
    },
    HumanizeFailed {
        generation: u64,
        model: String,
        message: String,
    },
    /// The user asked to copy one model's answer
    CopyRequested(String),
    /// Drop all answers, e.g. on logout
    Reset,
}
