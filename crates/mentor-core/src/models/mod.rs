//! Data models for goal mentoring sessions.
//!
//! This module contains the domain models the orchestrator works on. Display
//! implementations for these models live in [`crate::display::models`] so the
//! data structures stay free of presentation logic.
//!
//! - [`ConversationState`]: the per-session aggregate passed in and out of
//!   every turn
//! - [`Step`]: one week of a four-week plan
//! - [`CompletionRecord`]: when and how a step was completed
//! - [`ConversationTurn`] / [`ChatMessage`]: stored history and the messages
//!   sent to the language model
//! - [`Mode`]: the orchestrator's named state
//!
//! # Examples
//!
//! ```rust
//! use mentor_core::models::{ConversationState, Mode, Step};
//!
//! let mut state = ConversationState::new();
//! assert_eq!(state.mode, Mode::GoalSetting);
//!
//! state.goal = "Run a 10k".to_string();
//! state.plan = vec![Step::titled("Week 1: Base mileage")];
//! state.mode = Mode::Execution;
//! assert_eq!(state.current_step().map(|s| s.title.as_str()), Some("Week 1: Base mileage"));
//! ```

pub mod completion;
pub mod mode;
pub mod state;
pub mod step;
pub mod turn;

#[cfg(test)]
mod tests;

pub use completion::CompletionRecord;
pub use mode::Mode;
pub use state::ConversationState;
pub use step::{Step, PLAN_LENGTH};
pub use turn::{ChatMessage, ConversationTurn, MessageRole, Role};
