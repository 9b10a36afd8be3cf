//! Help for a stuck user, escalating with each request.

use log::warn;

use super::{complete_overrun, prompts, Orchestrator, Outcome, TurnLog};
use crate::{
    context::build_context,
    models::{ChatMessage, ConversationState, Mode},
};

impl Orchestrator {
    /// One model call tailored to how often the user has been stuck, then
    /// back to execution.
    pub(crate) async fn give_help(
        &self,
        mut state: ConversationState,
        input: &str,
        log: &mut TurnLog,
    ) -> Outcome {
        let Some(step) = state.current_step().cloned() else {
            return complete_overrun(state);
        };

        let mut messages = build_context(&state);
        messages.push(ChatMessage::user(prompts::help(&step, input, state.stuck_count)));

        let response = match self.ask(log, messages).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Help unavailable, using canned advice: {e}");
                prompts::help_fallback(&step)
            }
        };

        state.mode = Mode::Execution;
        Outcome::reply(state, response)
    }
}
