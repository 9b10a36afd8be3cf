//! The conversation orchestrator.
//!
//! [`Orchestrator::process`] takes the session state and one user message and
//! returns the next state together with the assistant's reply. It never
//! fails: every model or parse failure is recovered inside the handler that
//! hit it.
//!
//! # Dispatch
//!
//! ```text
//!            ┌────────────┐  classify   ┌────────┐  route(mode, intent)
//!  input ───▶│ Vocabulary │────────────▶│ Intent │──────────────────────┐
//!            └────────────┘             └────────┘                      ▼
//!  ┌──────────────┬──────────┬───────────┬──────┬────────────┬───────────┐
//!  │ GoalAnalysis │ Planning │ Execution │ Help │ Completion │   Reset   │
//!  └──────────────┴──────────┴───────────┴──────┴────────────┴───────────┘
//! ```
//!
//! A handler either awaits the next user message or asks for another
//! dispatch in the same turn. Dispatches chain only while no model call has
//! been made, so a turn performs at most one model call. Execution hands a
//! help request to the Help handler this way, and a plan that has run past
//! its last step reaches Completion.
//!
//! # Examples
//!
//! ```rust
//! use mentor_core::{models::Mode, port::ScriptedModel, OrchestratorBuilder, ConversationState};
//!
//! # async fn example() -> mentor_core::Result<()> {
//! let orchestrator = OrchestratorBuilder::new()
//!     .with_model(ScriptedModel::always("Love it! Let's plan.", 1))
//!     .build()?;
//!
//! let turn = orchestrator
//!     .process(ConversationState::new(), "Run a half marathon in May")
//!     .await;
//! assert_eq!(turn.state.goal, "Run a half marathon in May");
//! assert_eq!(turn.state.mode, Mode::Planning);
//! # Ok(())
//! # }
//! ```

use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};

use crate::{
    error::{FailureKind, MentorError, Result},
    intent::{classify, Intent, Vocabulary},
    models::{ChatMessage, ConversationState, ConversationTurn, Mode},
    port::LanguageModel,
};

pub mod builder;
mod completion;
mod execution;
mod goal;
mod help;
mod planning;
pub mod prompts;
pub mod router;


pub use builder::OrchestratorBuilder;
pub use router::{route, Handler};

/// Upper bound on dispatches within one turn.
const MAX_DISPATCHES: usize = 4;

/// Drives a goal-mentoring conversation one turn at a time.
///
/// Holds no session state, so one instance can serve many sessions.
pub struct Orchestrator {
    pub(crate) model: Arc<dyn LanguageModel>,
    pub(crate) timeout: Duration,
    pub(crate) vocabulary: Vocabulary,
}

/// Result of processing one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub state: ConversationState,
    pub response: String,
}

/// What the router does after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Wait for the next user message
    Await,
    /// Dispatch again within the same turn
    Continue,
}

pub(crate) struct Outcome {
    pub state: ConversationState,
    pub response: Option<String>,
    pub flow: Flow,
}

impl Outcome {
    pub(crate) fn reply(state: ConversationState, response: impl Into<String>) -> Self {
        Self {
            state,
            response: Some(response.into()),
            flow: Flow::Await,
        }
    }

    pub(crate) fn pass(state: ConversationState) -> Self {
        Self {
            state,
            response: None,
            flow: Flow::Continue,
        }
    }
}

/// Per-turn bookkeeping shared by the dispatches of one turn.
#[derive(Debug, Default)]
pub(crate) struct TurnLog {
    pub model_calls: usize,
}

impl Orchestrator {
    pub(crate) fn new(model: Arc<dyn LanguageModel>, timeout: Duration, vocabulary: Vocabulary) -> Self {
        Self {
            model,
            timeout,
            vocabulary,
        }
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Processes one user message.
    ///
    /// The user message (when non-empty) and the reply are appended to the
    /// history of the returned state, except on reset, which starts a fresh
    /// history.
    pub async fn process(&self, state: ConversationState, user_input: &str) -> Turn {
        let input = user_input.trim();
        let intent = classify(input, self.vocabulary);
        debug!("Classified message as {intent:?} in mode {}", state.mode);

        if route(state.mode, intent) == Handler::Reset {
            info!("Resetting session for a new goal");
            return Self::reset();
        }

        let mut log = TurnLog::default();
        let mut state = state;
        let mut replies: Vec<String> = Vec::new();

        for dispatch in 1..=MAX_DISPATCHES {
            let handler = route(state.mode, intent);
            let before = state.mode;
            debug!("Dispatch {dispatch}: {handler:?}");

            let outcome = self.dispatch(handler, state, input, intent, &mut log).await;
            state = outcome.state;
            if state.mode != before {
                info!("Mode {before} -> {}", state.mode);
            }
            replies.extend(outcome.response);

            if outcome.flow == Flow::Await || log.model_calls > 0 {
                break;
            }
        }

        let response = replies.join("\n\n");
        state.push_exchange(input, &response);
        if let Err(e) = state.check_invariants() {
            warn!("Turn left inconsistent state: {e}");
        }

        Turn { state, response }
    }

    /// A fresh session that has just been asked for a new goal.
    ///
    /// Deterministic: two resets produce identical turns.
    pub fn reset() -> Turn {
        let mut state = ConversationState::new();
        state
            .history
            .push(ConversationTurn::assistant(prompts::NEW_GOAL_PROMPT));
        Turn {
            state,
            response: prompts::NEW_GOAL_PROMPT.to_string(),
        }
    }

    async fn dispatch(
        &self,
        handler: Handler,
        state: ConversationState,
        input: &str,
        intent: Intent,
        log: &mut TurnLog,
    ) -> Outcome {
        match handler {
            Handler::Reset => {
                let turn = Self::reset();
                Outcome::reply(turn.state, turn.response)
            }
            Handler::GoalAnalysis => self.analyze_goal(state, input, log).await,
            Handler::Planning => self.create_plan(state, log).await,
            Handler::Execution => self.execute_step(state, input, intent, log).await,
            Handler::Help => self.give_help(state, input, log).await,
            Handler::Completion => Self::celebrate(state),
        }
    }

    /// Sends one request to the model, bounded by the configured timeout.
    ///
    /// Counts as the turn's model call whether or not it succeeds.
    pub(crate) async fn ask(&self, log: &mut TurnLog, messages: Vec<ChatMessage>) -> Result<String> {
        log.model_calls += 1;
        debug!(
            "Calling {} with {} messages (timeout {:?})",
            self.model.name(),
            messages.len(),
            self.timeout
        );

        let reply = tokio::time::timeout(self.timeout, self.model.complete(&messages))
            .await
            .map_err(|_| {
                MentorError::model_unavailable(FailureKind::Timeout)
                    .with_message(format!("no reply within {:?}", self.timeout))
            })??;

        let reply = reply.trim();
        if reply.is_empty() {
            return Err(MentorError::model_unavailable(FailureKind::InvalidResponse)
                .with_message("empty reply"));
        }
        Ok(reply.to_string())
    }
}

/// Forces a session whose step index ran past the plan into `Completed`.
pub(crate) fn complete_overrun(mut state: ConversationState) -> Outcome {
    let err = MentorError::invalid_transition(
        state.mode,
        format!(
            "step index {} has no step in a plan of {}",
            state.current_step_index,
            state.plan.len()
        ),
    );
    warn!("{err}; completing the plan");

    state.current_step_index = state.plan.len();
    state.mode = Mode::Completed;
    Outcome::pass(state)
}
