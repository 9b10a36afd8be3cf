use super::{prompts, Orchestrator, Outcome};
use crate::models::ConversationState;

impl Orchestrator {
    /// Summarize the finished plan. No model call.
    pub(crate) fn celebrate(state: ConversationState) -> Outcome {
        let response = prompts::completion_summary(&state);
        Outcome::reply(state, response)
    }
}
