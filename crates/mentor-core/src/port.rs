//! The language-model port.
//!
//! The orchestrator only ever sees [`LanguageModel`]: an async function from
//! a list of chat messages to reply text. Front ends plug in an HTTP client;
//! tests and offline runs use [`ScriptedModel`] or [`OfflineModel`].

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use log::debug;

use crate::{
    error::{FailureKind, MentorError, Result},
    models::ChatMessage,
};

/// Stateless chat-completion backend.
///
/// Every call carries its full context; implementations keep nothing between
/// calls. Failures are reported as `MentorError::ModelUnavailable`.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Produce the assistant's reply to `messages`.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Short backend name for logs.
    fn name(&self) -> &str {
        "model"
    }
}

/// A backend that is never available. Every turn takes its fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineModel;

#[async_trait]
impl LanguageModel for OfflineModel {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
        Err(MentorError::model_unavailable(FailureKind::Transport)
            .with_message("offline mode, no language model configured"))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// One canned outcome for [`ScriptedModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    Text(String),
    Failure(FailureKind),
    /// Wait before answering with the text
    Delayed(Duration, String),
}

impl From<&str> for ScriptedReply {
    fn from(text: &str) -> Self {
        ScriptedReply::Text(text.to_string())
    }
}

impl From<FailureKind> for ScriptedReply {
    fn from(kind: FailureKind) -> Self {
        ScriptedReply::Failure(kind)
    }
}

/// Replays canned replies in order and records every request it receives.
///
/// Once the script is exhausted each call fails with `InvalidResponse`.
///
/// # Examples
///
/// ```rust
/// use mentor_core::{error::FailureKind, models::ChatMessage, port::{LanguageModel, ScriptedModel}};
///
/// # async fn example() {
/// let model = ScriptedModel::new(["Sounds great!".into(), FailureKind::RateLimited.into()]);
/// let messages = [ChatMessage::user("hi")];
///
/// assert_eq!(model.complete(&messages).await.unwrap(), "Sounds great!");
/// assert!(model.complete(&messages).await.is_err());
/// assert_eq!(model.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedModel {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A model that answers every call with the same text.
    pub fn always(text: &str, times: usize) -> Self {
        Self::new(std::iter::repeat_with(|| ScriptedReply::from(text)).take(times))
    }

    /// A model whose every call fails with `kind`.
    pub fn failing(kind: FailureKind, times: usize) -> Self {
        Self::new(std::iter::repeat(ScriptedReply::Failure(kind)).take(times))
    }

    /// Appends another reply to the script.
    pub fn push(&self, reply: ScriptedReply) {
        lock(&self.replies).push_back(reply);
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Replies not consumed yet.
    pub fn remaining(&self) -> usize {
        lock(&self.replies).len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        lock(&self.requests).push(messages.to_vec());
        let next = lock(&self.replies).pop_front();
        debug!("Scripted model reply: {next:?}");

        match next {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Failure(kind)) => {
                Err(MentorError::model_unavailable(kind).with_message("scripted failure"))
            }
            Some(ScriptedReply::Delayed(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            None => Err(MentorError::model_unavailable(FailureKind::InvalidResponse)
                .with_message("script exhausted")),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_model_is_unavailable() {
        let err = OfflineModel.complete(&[]).await.unwrap_err();
        assert_eq!(err.failure_kind(), Some(FailureKind::Transport));
    }

    #[tokio::test]
    async fn test_scripted_model_replays_in_order_and_records() {
        let model = ScriptedModel::new(["one".into(), FailureKind::Auth.into(), "three".into()]);
        let request = [ChatMessage::system("ctx"), ChatMessage::user("hello")];

        assert_eq!(model.complete(&request).await.unwrap(), "one");
        let err = model.complete(&request).await.unwrap_err();
        assert_eq!(err.failure_kind(), Some(FailureKind::Auth));
        assert_eq!(model.complete(&request[..1]).await.unwrap(), "three");

        let requests = model.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0], request.to_vec());
        assert_eq!(requests[2].len(), 1);
        assert_eq!(model.remaining(), 0);
    }

    #[tokio::test]
    async fn test_scripted_model_exhausted() {
        let model = ScriptedModel::always("ok", 1);
        assert!(model.complete(&[]).await.is_ok());
        let err = model.complete(&[]).await.unwrap_err();
        assert_eq!(err.failure_kind(), Some(FailureKind::InvalidResponse));

        model.push(ScriptedReply::from("again"));
        assert_eq!(model.complete(&[]).await.unwrap(), "again");
        assert_eq!(model.call_count(), 3);
    }
}
