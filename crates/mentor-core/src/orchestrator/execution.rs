//! Step execution: completion, skipping, help requests and step talk.

use log::{info, warn};

use super::{complete_overrun, prompts, Orchestrator, Outcome, TurnLog};
use crate::{
    context::build_context,
    intent::Intent,
    models::{ChatMessage, ConversationState, Mode},
};

impl Orchestrator {
    pub(crate) async fn execute_step(
        &self,
        state: ConversationState,
        input: &str,
        intent: Intent,
        log: &mut TurnLog,
    ) -> Outcome {
        if state.plan.is_empty() {
            warn!("Execution without a plan, returning to planning");
            let mut state = state;
            state.mode = Mode::Planning;
            return Outcome::pass(state);
        }
        if state.current_step().is_none() {
            return complete_overrun(state);
        }

        match intent {
            Intent::StepDone | Intent::Affirm => Self::complete_step(state, input),
            Intent::Skip => Self::skip_step(state),
            Intent::NeedsHelp | Intent::Deny => Self::request_help(state),
            Intent::Other | Intent::NewGoal => self.discuss_step(state, input, log).await,
        }
    }

    fn complete_step(mut state: ConversationState, input: &str) -> Outcome {
        let index = state.current_step_index;
        state.record_completion(index, input);
        state.current_step_index += 1;
        info!("Step {} completed", index + 1);

        let response = match state.current_step() {
            Some(next) => prompts::step_done(&state.plan[index], next),
            None => {
                state.mode = Mode::Completed;
                prompts::all_steps_done(&state.goal)
            }
        };
        Outcome::reply(state, response)
    }

    fn skip_step(mut state: ConversationState) -> Outcome {
        state.current_step_index += 1;
        info!("Step {} skipped", state.current_step_index);

        let response = match state.current_step() {
            Some(next) => prompts::step_skipped(state.current_step_index + 1, next),
            None => {
                state.mode = Mode::Completed;
                prompts::END_OF_PLAN.to_string()
            }
        };
        Outcome::reply(state, response)
    }

    fn request_help(mut state: ConversationState) -> Outcome {
        state.stuck_count += 1;
        state.mode = Mode::Help;
        Outcome::pass(state)
    }

    async fn discuss_step(&self, state: ConversationState, input: &str, log: &mut TurnLog) -> Outcome {
        let Some(step) = state.current_step().cloned() else {
            return complete_overrun(state);
        };

        let mut messages = build_context(&state);
        messages.push(ChatMessage::user(prompts::execution(&step, input)));

        let response = match self.ask(log, messages).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Step conversation unavailable: {e}");
                prompts::execution_fallback(&step)
            }
        };
        Outcome::reply(state, response)
    }
}
