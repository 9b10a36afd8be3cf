//! Core library for the Mentor goal-coaching assistant.
//!
//! Mentor walks a user from a stated goal to a four-week plan and then
//! through the plan one step at a time, offering help when they are stuck and
//! a summary when they finish. This crate holds everything except the front
//! ends: the session model, intent classification, plan parsing, the
//! conversation orchestrator and the language-model port.
//!
//! # Architecture
//!
//! - **Models** ([`models`]): [`ConversationState`] and its parts, plain
//!   serializable data passed in and out of every turn
//! - **Orchestrator** ([`orchestrator`]): routes each message to a handler by
//!   mode and [`intent`], at most one model call per turn
//! - **Port** ([`port`]): the [`LanguageModel`] trait the orchestrator talks to
//! - **Display** ([`display`]): Markdown formatting for the terminal and MCP
//!
//! # Quick Start
//!
//! ```rust
//! use mentor_core::{models::Mode, port::OfflineModel, ConversationState, OrchestratorBuilder};
//!
//! # async fn example() -> mentor_core::Result<()> {
//! let orchestrator = OrchestratorBuilder::new().with_model(OfflineModel).build()?;
//!
//! // Offline, every turn takes its fallback path.
//! let turn = orchestrator.process(ConversationState::new(), "Learn Spanish").await;
//! let turn = orchestrator.process(turn.state, "Let's plan").await;
//! assert_eq!(turn.state.mode, Mode::Execution);
//! assert_eq!(turn.state.plan.len(), 4);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod display;
pub mod error;
pub mod intent;
pub mod models;
pub mod orchestrator;
pub mod plan_parser;
pub mod port;

// Re-export commonly used types
pub use display::{LocalDateTime, Progress};
pub use error::{FailureKind, MentorError, Result};
pub use intent::{classify, Intent, Vocabulary};
pub use models::{ChatMessage, CompletionRecord, ConversationState, ConversationTurn, Mode, Step};
pub use orchestrator::{
    prompts::{GREETING, NEW_GOAL_PROMPT},
    Orchestrator, OrchestratorBuilder, Turn,
};
pub use plan_parser::{parse_plan, ParsedPlan, PlanSource};
pub use port::{LanguageModel, OfflineModel, ScriptedModel};
