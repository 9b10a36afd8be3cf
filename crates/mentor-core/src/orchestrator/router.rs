//! Pure routing from mode and intent to a handler.

use crate::{intent::Intent, models::Mode};

/// The handler that processes a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Discard the session and ask for a new goal
    Reset,
    GoalAnalysis,
    Planning,
    Execution,
    Help,
    Completion,
}

/// Selects the handler for the current mode. `NewGoal` wins in every mode.
///
/// # Examples
///
/// ```rust
/// use mentor_core::{intent::Intent, models::Mode, orchestrator::{route, Handler}};
///
/// assert_eq!(route(Mode::Execution, Intent::NewGoal), Handler::Reset);
/// assert_eq!(route(Mode::Execution, Intent::StepDone), Handler::Execution);
/// assert_eq!(route(Mode::Help, Intent::Other), Handler::Help);
/// ```
pub fn route(mode: Mode, intent: Intent) -> Handler {
    if intent == Intent::NewGoal {
        return Handler::Reset;
    }

    match mode {
        Mode::GoalSetting => Handler::GoalAnalysis,
        Mode::Planning => Handler::Planning,
        Mode::Help => Handler::Help,
        Mode::Completed => Handler::Completion,
        Mode::Execution => Handler::Execution,
    }
}
