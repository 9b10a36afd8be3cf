//! Prompt templates and canned replies.

use crate::models::{ConversationState, Step};

/// First message of a fresh session.
pub const GREETING: &str =
    "Hi! I'm your Goal Mentor. What goal would you like to work on together?";

/// Reply to a reset, and the only history entry of the reset state.
pub const NEW_GOAL_PROMPT: &str = "What new goal would you like to work on?";

/// Reply when the user sends an empty message before setting a goal.
pub const ASK_FOR_GOAL: &str = "What goal would you like to work on? Tell me in a sentence or two.";

pub const DEFAULT_ENCOURAGEMENT: &str = "Great goal! Let's make it happen.";

pub const END_OF_PLAN: &str = "You've reached the end of your plan!";

pub fn goal_analysis(goal: &str, user_message: &str) -> String {
    format!(
        "The user wants to achieve: \"{goal}\"\n\
         \n\
         Analyze this goal and respond naturally:\n\
         1. Is this goal specific and actionable enough?\n\
         2. If not, ask 1-2 friendly questions to help refine it\n\
         3. If it's good, acknowledge it and show enthusiasm\n\
         \n\
         Recent user message: \"{user_message}\"\n\
         \n\
         Be conversational and encouraging, not robotic."
    )
}

pub fn goal_analysis_offline(goal: &str) -> String {
    format!("I'm having trouble connecting right now. Let's work with your goal: {goal}")
}

pub fn planning(goal: &str) -> String {
    format!(
        r#"Create a 4-week plan for: "{goal}"

Return ONLY a JSON object with this exact structure:
{{
    "steps": [
        {{
            "title": "Week 1: [Short descriptive title]",
            "description": "[What to focus on this week]",
            "tips": "[2-3 practical tips for success]",
            "key_actions": "[Specific things to do]"
        }},
        // ... 3 more weeks
    ],
    "encouragement": "[Personal encouraging message about their goal]"
}}

Make it practical, achievable, and motivating. Each week should build on the previous one."#
    )
}

pub fn plan_ready(encouragement: &str, first: Option<&Step>) -> String {
    let mut message =
        format!("{encouragement}\n\nI've created your 4-week plan! Ready to start with Week 1?");
    if let Some(step) = first {
        message.push_str("\n\n");
        message.push_str(&step_card(step));
    }
    message
}

pub fn plan_fallback(first: Option<&Step>) -> String {
    let mut message = String::from("I've created a solid 4-week plan for you! Let's start with Week 1.");
    if let Some(step) = first {
        message.push_str("\n\n");
        message.push_str(&step_card(step));
    }
    message
}

/// Markdown card with the details of one step. Empty fields are left out.
pub fn step_card(step: &Step) -> String {
    let mut card = format!("**{}**", step.title);
    if !step.description.is_empty() {
        card.push_str(&format!("\n\n{}", step.description));
    }
    if !step.tips.is_empty() {
        card.push_str(&format!("\n\n💡 **Tips:** {}", step.tips));
    }
    if !step.key_actions.is_empty() {
        card.push_str(&format!("\n\n🎯 **Key Actions:** {}", step.key_actions));
    }
    card
}

pub fn all_steps_done(goal: &str) -> String {
    format!(
        "🎉 Congratulations! You've completed all 4 weeks of your goal plan for '{goal}'! \
         That's amazing dedication."
    )
}

pub fn step_done(completed: &Step, next: &Step) -> String {
    format!(
        "✅ Awesome! You've completed {}!\n\nReady for {}?\n\n{}",
        completed.title, next.title, next.description
    )
}

/// `week` is 1-based.
pub fn step_skipped(week: usize, next: &Step) -> String {
    format!(
        "Okay, let's move to the next step (Week {week}): {}",
        next.title
    )
}

pub fn execution(step: &Step, user_message: &str) -> String {
    format!(
        "The user is working on: {}\n\
         Description: {}\n\
         Tips: {}\n\
         \n\
         User said: \"{user_message}\"\n\
         \n\
         Respond conversationally. Be encouraging and provide relevant advice for their current step.",
        step.title, step.description, step.tips
    )
}

pub fn execution_fallback(step: &Step) -> String {
    format!(
        "I understand you're working on {}. {} What specific part would you like to focus on?",
        step.title, step.tips
    )
}

/// How much detail a help reply should carry after `stuck_count` requests.
pub fn help_level(stuck_count: u32) -> &'static str {
    match stuck_count {
        0 | 1 => "gentle encouragement and tips",
        2 => "more specific, actionable advice",
        _ => "very detailed, step-by-step breakdown",
    }
}

pub fn help(step: &Step, user_message: &str, stuck_count: u32) -> String {
    format!(
        "The user is stuck on: {}\n\
         Description: {}\n\
         They said: \"{user_message}\"\n\
         Times they've asked for help: {stuck_count}\n\
         \n\
         Provide {}. Be understanding and practical.\n\
         \n\
         If they've been stuck multiple times, consider suggesting they might want to break \
         this down into smaller parts or try a different approach.",
        step.title,
        step.description,
        help_level(stuck_count)
    )
}

pub fn help_fallback(step: &Step) -> String {
    format!(
        "I can see you're having trouble with {}. That's totally normal!\n\
         \n\
         Here are some ways to approach it:\n\
         1. Break it into smaller 15-minute tasks\n\
         2. Focus on just one small part today\n\
         3. Ask yourself: what's the smallest step I could take right now?\n\
         \n\
         {}\n\
         \n\
         What feels most manageable to you?",
        step.title, step.tips
    )
}

/// Summary of a finished plan: ✅ for completed steps, 📝 for skipped ones.
pub fn completion_summary(state: &ConversationState) -> String {
    let mut summary = format!(
        "🎉 CONGRATULATIONS! 🎉\n\
         \n\
         You've successfully completed your 4-week journey toward \"{}\"!\n\
         \n\
         Here's what you accomplished:\n",
        state.goal
    );

    for (index, step) in state.plan.iter().enumerate() {
        let marker = if state.is_completed(index) { "✅" } else { "📝" };
        summary.push_str(&format!("{marker} {}\n", step.title));
    }

    summary.push_str(
        "\nThat's incredible dedication! You should be proud of yourself.\n\
         \n\
         What's next? Ready to set a new goal, or do you want to keep building on this one?",
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_level_tiers() {
        assert_eq!(help_level(1), "gentle encouragement and tips");
        assert_eq!(help_level(2), "more specific, actionable advice");
        assert_eq!(help_level(3), "very detailed, step-by-step breakdown");
        assert_eq!(help_level(7), "very detailed, step-by-step breakdown");
    }

    #[test]
    fn test_step_card_skips_empty_fields() {
        let card = step_card(&Step::titled("Week 1: Start"));
        assert_eq!(card, "**Week 1: Start**");

        let full = step_card(&Step::new("T", "D", "tip", "act"));
        assert!(full.contains("💡 **Tips:** tip"));
        assert!(full.contains("🎯 **Key Actions:** act"));
    }

    #[test]
    fn test_planning_prompt_asks_for_json() {
        let prompt = planning("learn piano");
        assert!(prompt.starts_with("Create a 4-week plan for: \"learn piano\""));
        assert!(prompt.contains("\"encouragement\""));
    }

    #[test]
    fn test_completion_summary_markers() {
        let mut state = ConversationState {
            goal: "write a novel".to_string(),
            plan: vec![Step::titled("A"), Step::titled("B")],
            current_step_index: 2,
            ..ConversationState::new()
        };
        state.record_completion(0, "done");

        let summary = completion_summary(&state);
        assert!(summary.contains("toward \"write a novel\""));
        assert!(summary.contains("✅ A\n"));
        assert!(summary.contains("📝 B\n"));
    }
}
