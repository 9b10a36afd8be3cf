//! Bounded conversation context for language-model calls.
//!
//! The model backend keeps nothing between calls, so every request starts
//! with a system message restating the session, followed by the most recent
//! slice of history.

use crate::models::{ChatMessage, ConversationState};

/// Number of history entries sent with each model call.
pub const CONTEXT_WINDOW: usize = 6;

/// Natural-language summary of the session for the system message.
pub fn system_summary(state: &ConversationState) -> String {
    let goal = if state.goal.trim().is_empty() {
        "Not set yet"
    } else {
        state.goal.as_str()
    };

    format!(
        "You are a professional goal mentor. The user's goal is: \"{goal}\"\n\
         \n\
         Current situation:\n\
         - Mode: {mode}\n\
         - Current step: {step}\n\
         - Times asked for help: {stuck}\n\
         \n\
         Be encouraging, practical, and conversational. Don't be robotic.",
        mode = state.mode.as_str(),
        step = step_position(state),
        stuck = state.stuck_count,
    )
}

/// "2 of 4", or a phrase when there is no step to point at.
fn step_position(state: &ConversationState) -> String {
    let total = state.plan.len();
    if total == 0 {
        "no plan yet".to_string()
    } else if state.current_step_index >= total {
        format!("all {total} steps passed")
    } else {
        format!("{} of {total}", state.current_step_index + 1)
    }
}

/// Builds the messages for one model call: a system summary followed by the
/// last [`CONTEXT_WINDOW`] history entries in their original order.
pub fn build_context(state: &ConversationState) -> Vec<ChatMessage> {
    let start = state.history.len().saturating_sub(CONTEXT_WINDOW);

    let mut messages = Vec::with_capacity(CONTEXT_WINDOW + 2);
    messages.push(ChatMessage::system(system_summary(state)));
    messages.extend(state.history[start..].iter().map(ChatMessage::from));
    messages
}
