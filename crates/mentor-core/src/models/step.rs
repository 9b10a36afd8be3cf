//! Step model definition.

use serde::{Deserialize, Serialize};

/// Number of steps in every plan. Each step covers one week.
pub const PLAN_LENGTH: usize = 4;

/// One week of a plan.
///
/// Steps are immutable once a plan is produced; their position in the plan
/// is the week index (0-based).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    /// Short title, usually prefixed with the week ("Week 1: ...")
    #[serde(default)]
    pub title: String,

    /// What to focus on during the week
    #[serde(default)]
    pub description: String,

    /// Practical tips for success
    #[serde(default)]
    pub tips: String,

    /// Specific things to do
    #[serde(default)]
    pub key_actions: String,
}

impl Step {
    /// Creates a step with all four fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        tips: impl Into<String>,
        key_actions: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tips: tips.into(),
            key_actions: key_actions.into(),
        }
    }

    /// Creates a step that only carries a title, as produced from a
    /// numbered list.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
