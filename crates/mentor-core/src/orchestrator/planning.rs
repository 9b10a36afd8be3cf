//! Plan generation.

use log::{info, warn};

use super::{prompts, Orchestrator, Outcome, TurnLog};
use crate::{
    context::build_context,
    models::{ChatMessage, ConversationState, Mode},
    plan_parser::{self, PlanSource},
};

impl Orchestrator {
    /// Produce the four-week plan with a single model call.
    ///
    /// Unusable output and model failures both yield the fallback plan; the
    /// session always leaves this handler in execution with a full plan.
    pub(crate) async fn create_plan(&self, mut state: ConversationState, log: &mut TurnLog) -> Outcome {
        if state.goal.trim().is_empty() {
            warn!("Planning requested without a goal, returning to goal setting");
            state.goal_refined = false;
            state.mode = Mode::GoalSetting;
            return Outcome::pass(state);
        }

        let mut messages = build_context(&state);
        messages.push(ChatMessage::user(prompts::planning(&state.goal)));

        let plan = match self.ask(log, messages).await {
            Ok(raw) => plan_parser::parse_plan(&raw, &state.goal),
            Err(e) => {
                warn!("Plan generation unavailable, using fallback plan: {e}");
                plan_parser::fallback(&state.goal)
            }
        };
        info!("Plan ready ({:?}, {} steps)", plan.source, plan.steps.len());

        state.plan = plan.steps;
        state.current_step_index = 0;
        state.completions.clear();
        state.mode = Mode::Execution;

        let first = state.plan.first();
        let response = match plan.source {
            PlanSource::Fallback => prompts::plan_fallback(first),
            PlanSource::Structured | PlanSource::NumberedList => prompts::plan_ready(
                plan.encouragement
                    .as_deref()
                    .unwrap_or(prompts::DEFAULT_ENCOURAGEMENT),
                first,
            ),
        };

        Outcome::reply(state, response)
    }
}
