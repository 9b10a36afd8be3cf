//! Progress dashboard for a session.

use std::fmt;

use crate::models::{ConversationState, Mode};

/// Markdown dashboard: goal, mode, step checklist and the active step card.
///
/// Passed steps show ✅ with their completion time (or "skipped"), the active
/// step 🔄 and the rest ⏳.
///
/// # Examples
///
/// ```rust
/// use mentor_core::{display::Progress, models::{ConversationState, Mode, Step}};
///
/// let state = ConversationState {
///     goal: "Run a 10k".to_string(),
///     plan: vec![Step::titled("Week 1"), Step::titled("Week 2"), Step::titled("Week 3"), Step::titled("Week 4")],
///     current_step_index: 1,
///     mode: Mode::Execution,
///     ..ConversationState::new()
/// };
///
/// let output = Progress(&state).to_string();
/// assert!(output.contains("🔄 **Week 2**"));
/// assert!(output.contains("(25%)"));
/// ```
pub struct Progress<'a>(pub &'a ConversationState);

impl Progress<'_> {
    /// Completion percentage, rounded.
    pub fn percent(&self) -> u32 {
        (self.0.progress() * 100.0).round() as u32
    }
}

impl fmt::Display for Progress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;

        if state.goal.is_empty() {
            writeln!(f, "# 🎯 No goal yet")?;
        } else {
            writeln!(f, "# 🎯 {}", state.goal)?;
        }
        writeln!(f)?;
        writeln!(f, "- Mode: {}", state.mode.with_icon())?;

        if state.plan.is_empty() {
            writeln!(f)?;
            writeln!(f, "No plan yet.")?;
            return Ok(());
        }

        let passed = state.current_step_index.min(state.plan.len());
        writeln!(
            f,
            "- Progress: {passed}/{} steps ({}%)",
            state.plan.len(),
            self.percent()
        )?;
        if state.stuck_count > 0 {
            writeln!(f, "- Times asked for help: {}", state.stuck_count)?;
        }

        writeln!(f)?;
        writeln!(f, "## Plan")?;
        writeln!(f)?;
        for (index, step) in state.plan.iter().enumerate() {
            if index < state.current_step_index {
                match state.completions.get(&index) {
                    Some(record) => writeln!(f, "- ✅ {} ({record})", step.title)?,
                    None => writeln!(f, "- ✅ {} (skipped)", step.title)?,
                }
            } else if index == state.current_step_index {
                writeln!(f, "- 🔄 **{}**", step.title)?;
            } else {
                writeln!(f, "- ⏳ {}", step.title)?;
            }
        }

        if matches!(state.mode, Mode::Execution | Mode::Help) {
            if let Some(step) = state.current_step() {
                writeln!(f)?;
                writeln!(f, "## Current Step")?;
                writeln!(f)?;
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}
