//! Completion records for plan steps.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Written once, when a step moves from active to completed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionRecord {
    /// When the user reported the step done (UTC)
    pub completed_at: Timestamp,

    /// The user's message that completed the step
    pub user_feedback: String,
}

impl CompletionRecord {
    pub fn new(user_feedback: impl Into<String>) -> Self {
        Self {
            completed_at: Timestamp::now(),
            user_feedback: user_feedback.into(),
        }
    }
}
