//! Goal analysis: capture the goal and decide whether it needs refining.

use log::{info, warn};

use super::{prompts, Orchestrator, Outcome, TurnLog};
use crate::{
    context::build_context,
    models::{ChatMessage, ConversationState, Mode},
};

impl Orchestrator {
    /// Handle a message while no usable goal exists yet.
    ///
    /// The first non-empty message becomes the goal. A model reply containing
    /// a question keeps the session in goal setting so the user can answer;
    /// any other reply accepts the goal and moves on to planning. When the
    /// model is unavailable the goal is accepted as stated.
    pub(crate) async fn analyze_goal(
        &self,
        mut state: ConversationState,
        input: &str,
        log: &mut TurnLog,
    ) -> Outcome {
        if state.goal.trim().is_empty() {
            if input.is_empty() {
                return Outcome::reply(state, prompts::ASK_FOR_GOAL);
            }
            state.goal = input.to_string();
            info!("Goal set: {}", state.goal);
        }

        let mut messages = build_context(&state);
        messages.push(ChatMessage::user(prompts::goal_analysis(&state.goal, input)));

        match self.ask(log, messages).await {
            Ok(reply) => {
                // A question back to the user means the goal is not settled.
                let needs_refinement = reply.contains('?') && !state.goal_refined;
                if !needs_refinement {
                    state.goal_refined = true;
                    state.mode = Mode::Planning;
                }
                Outcome::reply(state, reply)
            }
            Err(e) => {
                warn!("Goal analysis unavailable, accepting goal as stated: {e}");
                state.goal_refined = true;
                state.mode = Mode::Planning;
                let response = prompts::goal_analysis_offline(&state.goal);
                Outcome::reply(state, response)
            }
        }
    }
}
