//! Offline backend with placeholder answers.

use std::time::Duration;

use aicompare_core::{AnswerRecord, ComparisonApi, HumanizedAnswer, Result, Session, UserProfile};
use async_trait::async_trait;

/// Models answered by the simulation, in display order.
pub const SIMULATED_MODELS: [&str; 3] = ["GPT-4", "Claude", "PaLM"];

/// Answers every question locally without contacting a server.
#[derive(Debug, Clone, Default)]
pub struct SimulatedComparisonApi {
    latency: Duration,
}

impl SimulatedComparisonApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn session(email: &str, name: Option<&str>) -> Session {
        Session {
            token: uuid::Uuid::new_v4().to_string(),
            user: UserProfile {
                email: Some(email.to_string()),
                name: name.map(str::to_string),
                ..UserProfile::default()
            },
        }
    }
}

#[async_trait]
impl ComparisonApi for SimulatedComparisonApi {
    async fn login(&self, email: &str, _password: &str) -> Result<Session> {
        self.pause().await;
        Ok(Self::session(email, None))
    }

    async fn register(&self, email: &str, _password: &str, name: &str) -> Result<Session> {
        self.pause().await;
        Ok(Self::session(email, Some(name)))
    }

    async fn ask_question(&self, question: &str, _token: Option<&str>) -> Result<Vec<AnswerRecord>> {
        tracing::debug!(%question, "Simulating answers");
        self.pause().await;
        Ok(SIMULATED_MODELS
            .iter()
            .map(|model| AnswerRecord::new(*model, format!("This is a simulated answer from {model}.")))
            .collect())
    }

    async fn humanize_answer(
        &self,
        _question: &str,
        model: &str,
        _token: Option<&str>,
    ) -> Result<HumanizedAnswer> {
        self.pause().await;
        Ok(HumanizedAnswer::new(
            model,
            format!("This is a simulated humanized answer for the {model} model."),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_answers_cover_all_models() {
        let api = SimulatedComparisonApi::new();
        let answers = api.ask_question("anything", None).await.unwrap();

        let models: Vec<&str> = answers.iter().map(|a| a.model.as_str()).collect();
        assert_eq!(models, SIMULATED_MODELS);
        assert_eq!(answers[1].answer, "This is a simulated answer from Claude.");
        assert!(answers.iter().all(|a| a.humanized_answer.is_none()));
    }

    #[tokio::test]
    async fn test_simulated_humanize_names_model() {
        let api = SimulatedComparisonApi::new();
        let payload = api.humanize_answer("q", "PaLM", None).await.unwrap();
        assert_eq!(
            payload.humanized_answer,
            "This is a simulated humanized answer for the PaLM model."
        );
    }

    #[tokio::test]
    async fn test_simulated_sessions_have_distinct_tokens() {
        let api = SimulatedComparisonApi::new();
        let first = api.login("a@b.c", "pw").await.unwrap();
        let second = api.register("a@b.c", "pw", "Ada").await.unwrap();

        assert_ne!(first.token, second.token);
        assert_eq!(second.user.display_name(), "Ada");
    }
}
