//! The conversation state aggregate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CompletionRecord, ConversationTurn, Mode, Step};
use crate::error::{MentorError, Result};

/// Everything the orchestrator knows about one session.
///
/// Each turn consumes a state and produces the next one; front ends keep the
/// latest value between turns and never edit it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConversationState {
    /// What the user wants to achieve; empty until the first goal message
    #[serde(default)]
    pub goal: String,

    /// Whether goal analysis accepted the goal
    #[serde(default)]
    pub goal_refined: bool,

    /// The plan, empty until planning has run
    #[serde(default)]
    pub plan: Vec<Step>,

    /// Index of the active step; equals `plan.len()` once every step passed
    #[serde(default)]
    pub current_step_index: usize,

    #[serde(default)]
    pub mode: Mode,

    /// Full conversation, oldest first
    #[serde(default)]
    pub history: Vec<ConversationTurn>,

    /// Help requests for the current goal
    #[serde(default)]
    pub stuck_count: u32,

    /// Completion records keyed by step index
    #[serde(default)]
    pub completions: BTreeMap<usize, CompletionRecord>,
}

impl ConversationState {
    /// A fresh session waiting for a goal.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active step, if the plan has one at the current index.
    pub fn current_step(&self) -> Option<&Step> {
        self.plan.get(self.current_step_index)
    }

    /// Whether the step at `index` has a completion record.
    pub fn is_completed(&self, index: usize) -> bool {
        self.completions.contains_key(&index)
    }

    /// Whether every step of a non-empty plan has been passed.
    pub fn is_plan_finished(&self) -> bool {
        !self.plan.is_empty() && self.current_step_index >= self.plan.len()
    }

    /// Fraction of the plan passed (completed or skipped), in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.plan.is_empty() {
            return 0.0;
        }
        (self.current_step_index as f64 / self.plan.len() as f64).min(1.0)
    }

    /// Records the step at `index` as completed.
    ///
    /// Returns `false` without touching the existing record when the step was
    /// already completed.
    pub fn record_completion(&mut self, index: usize, user_feedback: &str) -> bool {
        if self.completions.contains_key(&index) {
            return false;
        }
        self.completions
            .insert(index, CompletionRecord::new(user_feedback));
        true
    }

    /// Appends the user's message (when non-empty) and the assistant's reply.
    pub fn push_exchange(&mut self, user_input: &str, response: &str) {
        if !user_input.trim().is_empty() {
            self.history.push(ConversationTurn::user(user_input));
        }
        self.history.push(ConversationTurn::assistant(response));
    }

    /// Checks the structural invariants between mode, plan and step index.
    ///
    /// # Errors
    ///
    /// Returns `MentorError::InvalidStateTransition` naming the first violated
    /// invariant.
    pub fn check_invariants(&self) -> Result<()> {
        if self.goal_refined && self.goal.trim().is_empty() {
            return Err(MentorError::invalid_transition(
                self.mode,
                "goal marked refined but goal is empty",
            ));
        }
        if self.mode == Mode::Planning && !self.plan.is_empty() {
            return Err(MentorError::invalid_transition(
                self.mode,
                "planning mode with an existing plan",
            ));
        }
        if self.current_step_index > self.plan.len() {
            return Err(MentorError::invalid_transition(
                self.mode,
                format!(
                    "step index {} beyond plan of {}",
                    self.current_step_index,
                    self.plan.len()
                ),
            ));
        }
        if self.is_plan_finished() && self.mode != Mode::Completed {
            return Err(MentorError::invalid_transition(
                self.mode,
                "every step passed but session is not completed",
            ));
        }
        if let Some(index) = self.completions.keys().find(|i| **i >= self.plan.len()) {
            return Err(MentorError::invalid_transition(
                self.mode,
                format!("completion record for missing step {index}"),
            ));
        }
        Ok(())
    }
}
