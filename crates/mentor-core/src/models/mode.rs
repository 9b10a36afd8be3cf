//! Conversation modes.

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of the orchestrator's modes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Waiting for a goal, or refining one
    #[default]
    GoalSetting,

    /// Goal accepted, plan not produced yet
    Planning,

    /// Working through the plan one step at a time
    Execution,

    /// The user asked for help with the current step
    Help,

    /// Every step has been passed; terminal for the current goal
    Completed,
}

impl Mode {
    /// Wire name of the mode, as used in prompts and snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::GoalSetting => "goal_setting",
            Mode::Planning => "planning",
            Mode::Execution => "execution",
            Mode::Help => "help",
            Mode::Completed => "completed",
        }
    }

    /// Get the mode with an icon for dashboards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mentor_core::models::Mode;
    ///
    /// assert_eq!(Mode::Execution.with_icon(), "🔄 Execution");
    /// assert_eq!(Mode::Completed.with_icon(), "🎉 Completed");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            Mode::GoalSetting => "🎯 Goal setting",
            Mode::Planning => "🗺 Planning",
            Mode::Execution => "🔄 Execution",
            Mode::Help => "🆘 Help",
            Mode::Completed => "🎉 Completed",
        }
    }
}
