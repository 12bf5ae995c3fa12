//! Backend port for the comparison client.

use async_trait::async_trait;

use crate::answer::{AnswerRecord, HumanizedAnswer};
use crate::error::Result;
use crate::session::Session;

/// The four backend operations the client depends on.
///
/// Implemented by the HTTP client, the offline simulation and test doubles.
#[async_trait]
pub trait ComparisonApi: Send + Sync {
    /// Exchanges credentials for a session.
    async fn login(&self, email: &str, password: &str) -> Result<Session>;

    /// Creates an account and returns its session.
    async fn register(&self, email: &str, password: &str, name: &str) -> Result<Session>;

    /// Asks every model the question.
    async fn ask_question(&self, question: &str, token: Option<&str>)
    -> Result<Vec<AnswerRecord>>;

    /// Requests a humanized rewrite of one model's answer.
    async fn humanize_answer(
        &self,
        question: &str,
        model: &str,
        token: Option<&str>,
    ) -> Result<HumanizedAnswer>;
}
