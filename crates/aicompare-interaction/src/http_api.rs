//! HttpComparisonApi - JSON client for the comparison backend.
//!
//! All four operations POST a JSON body to one base origin. A cookie store
//! keeps server cookies across calls; ask/humanize also send the session
//! token as a bearer header.

use std::time::Duration;

use aicompare_core::{AnswerRecord, CompareError, ComparisonApi, HumanizedAnswer, Result, Session};
use aicompare_infrastructure::ClientConfig;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const ASK_TYPE_NORMAL: &str = "normal";
const ASK_TYPE_HUMANIZE: &str = "Humanize AI";

/// Client for the `/login`, `/register` and `/ask` endpoints.
#[derive(Clone)]
pub struct HttpComparisonApi {
    client: Client,
    base_url: String,
}

impl HttpComparisonApi {
    /// Creates a client for `base_url` with an optional request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| CompareError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Response> {
        let url = self.endpoint(path);
        tracing::debug!(%url, authorized = token.is_some(), "POST");

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        request.send().await.map_err(|err| {
            tracing::warn!(%url, error = %err, "Request did not reach the server");
            CompareError::transport(format!("{path} request failed: {err}"))
        })
    }
}

#[async_trait]
impl ComparisonApi for HttpComparisonApi {
    async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .post("login", &Credentials { email, password, name: None }, None)
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = login_error_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "Login rejected");
            return Err(CompareError::auth(message));
        }

        decode(response, "login").await
    }

    async fn register(&self, email: &str, password: &str, name: &str) -> Result<Session> {
        let response = self
            .post(
                "register",
                &Credentials {
                    email,
                    password,
                    name: Some(name),
                },
                None,
            )
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = response.status().as_u16(), "Registration rejected");
            return Err(CompareError::auth("Registration failed"));
        }

        decode(response, "register").await
    }

    async fn ask_question(&self, question: &str, token: Option<&str>) -> Result<Vec<AnswerRecord>> {
        let body = AskRequest {
            question,
            r#type: ASK_TYPE_NORMAL,
            model: None,
        };
        let response = self.post("ask", &body, token).await?;

        if !response.status().is_success() {
            return Err(CompareError::request(
                response.status().as_u16(),
                "Failed to get AI answers",
            ));
        }

        decode(response, "ask").await
    }

    async fn humanize_answer(
        &self,
        question: &str,
        model: &str,
        token: Option<&str>,
    ) -> Result<HumanizedAnswer> {
        let body = AskRequest {
            question,
            r#type: ASK_TYPE_HUMANIZE,
            model: Some(model),
        };
        let response = self.post("ask", &body, token).await?;

        if !response.status().is_success() {
            return Err(CompareError::request(
                response.status().as_u16(),
                "Failed to humanize AI response",
            ));
        }

        decode(response, "humanize").await
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
    r#type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

fn login_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| "Login failed".to_string())
}

async fn decode<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T> {
    let bytes = response.bytes().await.map_err(|err| {
        CompareError::transport(format!("Failed to read {operation} response: {err}"))
    })?;
    serde_json::from_slice(&bytes)
        .map_err(|err| CompareError::decode(format!("Failed to parse {operation} response: {err}")))
}
