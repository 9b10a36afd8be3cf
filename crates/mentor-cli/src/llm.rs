//! OpenAI-compatible chat-completions backend.
//!
//! Works with any server exposing `POST {base_url}/chat/completions` with
//! Bearer authentication (Groq, OpenAI, local gateways).

use async_trait::async_trait;
use log::debug;
use mentor_core::{
    error::{FailureKind, MentorError},
    ChatMessage, LanguageModel,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Maps a non-success HTTP status to the failure it represents.
fn failure_for_status(status: StatusCode) -> FailureKind {
    match status.as_u16() {
        401 | 403 => FailureKind::Auth,
        429 => FailureKind::RateLimited,
        _ => FailureKind::InvalidResponse,
    }
}

fn transport_failure(error: &reqwest::Error) -> MentorError {
    let kind = if error.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Transport
    };
    MentorError::model_unavailable(kind).with_message(error.to_string())
}

/// Chat-completions client. No retries: a failed call is reported at once
/// and the orchestrator falls back.
pub struct ChatCompletionsModel {
    http: Client,
    url: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl ChatCompletionsModel {
    /// Creates a client from resolved configuration.
    pub fn from_config(config: &ModelConfig, api_key: String) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            url: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
        })
    }

    fn build_request<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.temperature,
        }
    }

    fn extract_reply(response: ChatResponse) -> Result<String, MentorError> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                MentorError::model_unavailable(FailureKind::InvalidResponse)
                    .with_message("response contained no message content")
            })
    }
}

#[async_trait]
impl LanguageModel for ChatCompletionsModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, MentorError> {
        debug!("POST {} ({} messages, model {})", self.url, messages.len(), self.model);

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(messages))
            .send()
            .await
            .map_err(|e| transport_failure(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Model backend answered {status}: {body}");
            return Err(MentorError::model_unavailable(failure_for_status(status))
                .with_message(format!("HTTP {status}")));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            MentorError::model_unavailable(FailureKind::InvalidResponse)
                .with_message(format!("undecodable response: {e}"))
        })?;

        Self::extract_reply(parsed)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
