//! Keyword-based intent classification of user messages.
//!
//! Classification is case-insensitive substring matching evaluated in a fixed
//! precedence order. It is a cheap heuristic: "I'm not done yet" still reads
//! as [`Intent::StepDone`].

use serde::{Deserialize, Serialize};

/// Control intent extracted from a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Abandon the current goal and start a fresh session
    NewGoal,
    /// The current step is finished
    StepDone,
    /// The user is stuck on the current step
    NeedsHelp,
    /// Move past the current step without completing it
    Skip,
    /// "yes", read as the step being done
    Affirm,
    /// "no", read as the step not being done
    Deny,
    /// Anything else; free-form discussion
    Other,
}

/// Which set of command words the classifier recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vocabulary {
    /// Chat front ends: new goal, done, help
    #[default]
    Conversational,
    /// Console front end: additionally yes, no and skip
    Console,
}

const NEW_GOAL_PHRASES: &[&str] = &["new goal", "start over", "different goal"];
const STEP_DONE_WORDS: &[&str] = &["done", "complete", "finished", "next"];
const NEEDS_HELP_WORDS: &[&str] = &["help", "stuck", "difficult", "hard", "don't know"];
const SKIP_WORDS: &[&str] = &["skip"];
const AFFIRM_WORDS: &[&str] = &["yes"];
const DENY_WORDS: &[&str] = &["no"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Classifies a user message.
///
/// # Examples
///
/// ```rust
/// use mentor_core::intent::{classify, Intent, Vocabulary};
///
/// assert_eq!(
///     classify("I want to start over with a new goal", Vocabulary::Conversational),
///     Intent::NewGoal
/// );
/// assert_eq!(classify("Done, finally!", Vocabulary::Conversational), Intent::StepDone);
/// assert_eq!(classify("skip", Vocabulary::Conversational), Intent::Other);
/// assert_eq!(classify("skip", Vocabulary::Console), Intent::Skip);
/// ```
pub fn classify(input: &str, vocabulary: Vocabulary) -> Intent {
    let text = input.to_lowercase();

    if contains_any(&text, NEW_GOAL_PHRASES) {
        return Intent::NewGoal;
    }
    if contains_any(&text, STEP_DONE_WORDS) {
        return Intent::StepDone;
    }
    if contains_any(&text, NEEDS_HELP_WORDS) {
        return Intent::NeedsHelp;
    }

    if vocabulary == Vocabulary::Console {
        if contains_any(&text, SKIP_WORDS) {
            return Intent::Skip;
        }
        if contains_any(&text, AFFIRM_WORDS) {
            return Intent::Affirm;
        }
        if contains_any(&text, DENY_WORDS) {
            return Intent::Deny;
        }
    }

    Intent::Other
}
