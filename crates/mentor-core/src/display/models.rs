//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the data structures stay free of
//! presentation logic. Output is Markdown for the terminal renderer.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{CompletionRecord, ConversationTurn, MessageRole, Mode, Role, Step};

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "You"),
            Role::Assistant => write!(f, "Mentor"),
        }
    }
}

impl fmt::Display for ConversationTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**{}:** {}", self.role, self.content)
    }
}

impl fmt::Display for CompletionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "completed {}", LocalDateTime(&self.completed_at))
    }
}

/// Step card: title heading, description, tips and key actions.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", self.title)?;
        writeln!(f)?;

        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }
        if !self.tips.is_empty() {
            writeln!(f, "- 💡 **Tips**: {}", self.tips)?;
        }
        if !self.key_actions.is_empty() {
            writeln!(f, "- 🎯 **Key actions**: {}", self.key_actions)?;
        }

        Ok(())
    }
}
