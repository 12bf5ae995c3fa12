//! Side effects requested by the comparison state machine.

use crate::notify::Notification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask every model `question`; the result is tagged with `generation`
    FetchAnswers { generation: u64, question: String },
    /// Humanize `model`'s answer to `question`
    Humanize {
        generation: u64,
        question: String,
        model: String,
    },
    CopyToClipboard(String),
    Notify(Notification),
}
