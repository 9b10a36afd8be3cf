//! Error types for the mentor library.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Mode;

/// Why a language-model call did not produce usable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Connection, DNS or TLS failure
    Transport,
    /// The call exceeded the configured timeout
    Timeout,
    /// Credentials were missing or rejected
    Auth,
    /// The backend refused the call because of quota or rate limits
    RateLimited,
    /// The backend answered but the answer was unusable
    InvalidResponse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Transport => "transport",
            FailureKind::Timeout => "timeout",
            FailureKind::Auth => "auth",
            FailureKind::RateLimited => "rate_limited",
            FailureKind::InvalidResponse => "invalid_response",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for all mentor operations.
///
/// Only `Configuration` ever reaches callers of the public API, from
/// `OrchestratorBuilder::build`. The other variants are produced and
/// recovered inside the orchestrator's handlers.
#[derive(Error, Debug)]
pub enum MentorError {
    /// The language-model backend could not be used for this call
    #[error("Model unavailable ({kind}): {message}")]
    ModelUnavailable { kind: FailureKind, message: String },
    /// Raw model text did not contain a usable plan
    #[error("Malformed plan text: {reason}")]
    MalformedPlanText { reason: String },
    /// A handler was invoked with state it cannot act on
    #[error("Invalid state transition in mode '{mode}': {reason}")]
    InvalidStateTransition { mode: Mode, reason: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for model failures.
pub struct ModelUnavailableBuilder {
    kind: FailureKind,
}

impl ModelUnavailableBuilder {
    pub fn new(kind: FailureKind) -> Self {
        Self { kind }
    }

    /// Build the error with the given message.
    pub fn with_message(self, message: impl Into<String>) -> MentorError {
        MentorError::ModelUnavailable {
            kind: self.kind,
            message: message.into(),
        }
    }
}

impl MentorError {
    /// Creates a builder for model failures of the given kind.
    pub fn model_unavailable(kind: FailureKind) -> ModelUnavailableBuilder {
        ModelUnavailableBuilder::new(kind)
    }

    /// Creates a plan parsing error.
    pub fn malformed_plan(reason: impl Into<String>) -> Self {
        MentorError::MalformedPlanText {
            reason: reason.into(),
        }
    }

    /// Creates an invalid transition error for the given mode.
    pub fn invalid_transition(mode: Mode, reason: impl Into<String>) -> Self {
        MentorError::InvalidStateTransition {
            mode,
            reason: reason.into(),
        }
    }

    /// The failure kind when this is a model failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            MentorError::ModelUnavailable { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result type alias for mentor operations
pub type Result<T> = std::result::Result<T, MentorError>;
