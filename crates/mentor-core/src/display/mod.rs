//! Display formatting for sessions.
//!
//! Domain models implement [`std::fmt::Display`] directly ([`models`]);
//! wrapper types format a whole session for a specific context. All output is
//! Markdown so the CLI can render it with its terminal skin and the MCP server
//! can return it verbatim.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │   Formatted     │
//! │ (Step, Mode...) │───▶│ (Progress, ...) │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`progress`]: the session dashboard
//! - [`datetime`]: local-time formatting for timestamps
//! - [`models`]: Display implementations for domain models

pub mod datetime;
pub mod models;
pub mod progress;

pub use datetime::LocalDateTime;
pub use progress::Progress;
