//! Turns raw model output into a four-step plan.
//!
//! Two formats are accepted:
//!
//! - **Structured**: a JSON object with a `steps` array of four objects
//!   (`title`, `description`, `tips`, `key_actions`) and an optional
//!   `encouragement` string, optionally wrapped in a Markdown code fence.
//!   A step field may also be a list of strings; the items are joined.
//! - **Numbered list**: lines of the form `1. Do something`; each line becomes
//!   a step title.
//!
//! Anything else, including a plan of the wrong length, is replaced by the
//! deterministic [`fallback_plan`]. [`parse_plan`] therefore always yields
//! exactly [`PLAN_LENGTH`] steps.

use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;

use crate::{
    error::{MentorError, Result},
    models::{Step, PLAN_LENGTH},
};

/// Where a parsed plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    Structured,
    NumberedList,
    Fallback,
}

/// Result of plan parsing: always exactly [`PLAN_LENGTH`] steps.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPlan {
    pub steps: Vec<Step>,
    /// Personal encouragement supplied by the model, structured format only
    pub encouragement: Option<String>,
    pub source: PlanSource,
}

#[derive(Deserialize)]
struct RawPlan {
    steps: Vec<RawStep>,
    #[serde(default)]
    encouragement: Option<String>,
}

#[derive(Deserialize)]
struct RawStep {
    #[serde(default)]
    title: RawText,
    #[serde(default)]
    description: RawText,
    #[serde(default)]
    tips: RawText,
    #[serde(default)]
    key_actions: RawText,
}

/// A step field given either as one string or as a list of strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    One(String),
    Many(Vec<String>),
}

impl Default for RawText {
    fn default() -> Self {
        RawText::One(String::new())
    }
}

impl From<RawText> for String {
    fn from(text: RawText) -> Self {
        match text {
            RawText::One(text) => text,
            RawText::Many(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

impl From<RawStep> for Step {
    fn from(raw: RawStep) -> Self {
        Step::new(raw.title, raw.description, raw.tips, raw.key_actions)
    }
}

fn numbered_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.\s+(\S.*)$").expect("numbered-line pattern is valid"))
}

/// Removes a surrounding Markdown code fence (```` ``` ```` or
/// ```` ```json ````) if present.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest.trim_start_matches("json"),
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn parse_structured(text: &str) -> Result<ParsedPlan> {
    let raw: RawPlan = serde_json::from_str(text)
        .map_err(|e| MentorError::malformed_plan(format!("invalid plan JSON: {e}")))?;

    if raw.steps.len() != PLAN_LENGTH {
        return Err(MentorError::malformed_plan(format!(
            "expected {PLAN_LENGTH} steps, found {}",
            raw.steps.len()
        )));
    }

    let encouragement = raw
        .encouragement
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    Ok(ParsedPlan {
        steps: raw.steps.into_iter().map(Step::from).collect(),
        encouragement,
        source: PlanSource::Structured,
    })
}

fn parse_numbered(text: &str) -> Result<ParsedPlan> {
    let steps: Vec<Step> = text
        .lines()
        .filter_map(|line| numbered_line().captures(line.trim()))
        .filter_map(|caps| caps.get(1))
        .map(|m| Step::titled(m.as_str().trim()))
        .collect();

    if steps.len() != PLAN_LENGTH {
        return Err(MentorError::malformed_plan(format!(
            "expected {PLAN_LENGTH} numbered lines, found {}",
            steps.len()
        )));
    }

    Ok(ParsedPlan {
        steps,
        encouragement: None,
        source: PlanSource::NumberedList,
    })
}

/// Parses raw model text without falling back.
///
/// # Errors
///
/// Returns `MentorError::MalformedPlanText` when the text is neither a
/// structured plan nor a numbered list of exactly [`PLAN_LENGTH`] steps.
pub fn try_parse(raw: &str) -> Result<ParsedPlan> {
    let text = strip_code_fence(raw);
    if text.is_empty() {
        return Err(MentorError::malformed_plan("empty model output"));
    }

    if text.starts_with('{') {
        parse_structured(text)
    } else {
        parse_numbered(text)
    }
}

/// Parses raw model text, substituting the fallback plan for `goal` when the
/// text is unusable. Never fails.
pub fn parse_plan(raw: &str, goal: &str) -> ParsedPlan {
    match try_parse(raw) {
        Ok(plan) => {
            debug!("Parsed {:?} plan with {} steps", plan.source, plan.steps.len());
            plan
        }
        Err(e) => {
            warn!("Using fallback plan: {e}");
            fallback(goal)
        }
    }
}

/// The fallback plan wrapped as a [`ParsedPlan`].
pub fn fallback(goal: &str) -> ParsedPlan {
    ParsedPlan {
        steps: fallback_plan(goal),
        encouragement: None,
        source: PlanSource::Fallback,
    }
}

/// Four generic weekly steps built from the goal text alone.
pub fn fallback_plan(goal: &str) -> Vec<Step> {
    vec![
        Step::new(
            "Week 1: Foundation Building",
            format!("Set up the basics for achieving {goal}"),
            "Start small, be consistent, track your progress",
            "Research, plan, and take the first small step",
        ),
        Step::new(
            "Week 2: Skill Development",
            format!("Focus on building key skills needed for {goal}"),
            "Practice daily, seek feedback, don't fear mistakes",
            "Dedicate time each day to skill-building activities",
        ),
        Step::new(
            "Week 3: Implementation",
            format!("Apply what you've learned toward {goal}"),
            "Take action, measure results, adjust as needed",
            "Execute your plan and track concrete progress",
        ),
        Step::new(
            "Week 4: Optimization",
            format!("Refine your approach and plan next steps for {goal}"),
            "Reflect on what worked, optimize your methods",
            "Fine-tune your approach and set up for continued success",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOAL: &str = "learn to cook";

    fn structured_json(count: usize) -> String {
        let steps: Vec<String> = (1..=count)
            .map(|i| {
                format!(
                    r#"{{"title":"Week {i}: Topic","description":"Desc {i}","tips":"Tip {i}","key_actions":"Act {i}"}}"#
                )
            })
            .collect();
        format!(
            r#"{{"steps":[{}],"encouragement":"You can do it!"}}"#,
            steps.join(",")
        )
    }

    #[test]
    fn test_structured_plan() {
        let plan = parse_plan(&structured_json(4), GOAL);
        assert_eq!(plan.source, PlanSource::Structured);
        assert_eq!(plan.steps.len(), 4);
        assert_eq!(plan.steps[2].title, "Week 3: Topic");
        assert_eq!(plan.steps[3].key_actions, "Act 4");
        assert_eq!(plan.encouragement.as_deref(), Some("You can do it!"));
    }

    #[test]
    fn test_structured_plan_inside_json_fence() {
        let raw = format!("```json\n{}\n```", structured_json(4));
        let plan = parse_plan(&raw, GOAL);
        assert_eq!(plan.source, PlanSource::Structured);
    }

    #[test]
    fn test_structured_plan_inside_bare_fence() {
        let raw = format!("  ```\n{}\n```  ", structured_json(4));
        assert_eq!(try_parse(&raw).unwrap().source, PlanSource::Structured);
    }

    #[test]
    fn test_structured_missing_fields_default_to_empty() {
        let raw = r#"{"steps":[{"title":"A"},{"title":"B"},{"title":"C"},{"title":"D"}]}"#;
        let plan = try_parse(raw).unwrap();
        assert_eq!(plan.steps[1], Step::titled("B"));
        assert_eq!(plan.encouragement, None);
    }

    #[test]
    fn test_structured_list_fields_are_joined() {
        let raw = r#"{"steps":[
            {"title":"A","tips":["Start small"," ","Track it"],"key_actions":["Walk 10 min"]},
            {"title":"B"},{"title":"C"},{"title":"D","description":[]}
        ]}"#;
        let plan = try_parse(raw).unwrap();

        assert_eq!(plan.source, PlanSource::Structured);
        assert_eq!(plan.steps[0].tips, "Start small; Track it");
        assert_eq!(plan.steps[0].key_actions, "Walk 10 min");
        assert_eq!(plan.steps[3].description, "");
    }

    #[test]
    fn test_structured_non_text_field_falls_back() {
        let raw = r#"{"steps":[{"title":1},{"title":"B"},{"title":"C"},{"title":"D"}]}"#;
        assert!(try_parse(raw).is_err());
    }

    #[test]
    fn test_structured_wrong_count_falls_back() {
        for count in [3, 5] {
            let err = try_parse(&structured_json(count)).unwrap_err();
            assert!(matches!(err, MentorError::MalformedPlanText { .. }));

            let plan = parse_plan(&structured_json(count), GOAL);
            assert_eq!(plan.source, PlanSource::Fallback);
            assert_eq!(plan.steps.len(), 4);
        }
    }

    #[test]
    fn test_structured_missing_steps_key_falls_back() {
        let plan = parse_plan(r#"{"weeks": []}"#, GOAL);
        assert_eq!(plan.source, PlanSource::Fallback);
    }

    #[test]
    fn test_numbered_list() {
        let raw = "Here is your plan:\n1. Buy basic equipment\n2. Learn knife skills\n  3. Cook five recipes\n4. Host a dinner\nGood luck!";
        let plan = parse_plan(raw, GOAL);
        assert_eq!(plan.source, PlanSource::NumberedList);
        let titles: Vec<&str> = plan.steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Buy basic equipment", "Learn knife skills", "Cook five recipes", "Host a dinner"]
        );
        assert!(plan.steps[0].description.is_empty());
    }

    #[test]
    fn test_numbered_list_wrong_count_falls_back() {
        let plan = parse_plan("1. One\n2. Two\n3. Three", GOAL);
        assert_eq!(plan.source, PlanSource::Fallback);
        assert_eq!(plan.steps.len(), 4);
    }

    #[test]
    fn test_garbage_always_yields_four_fallback_steps() {
        for raw in ["", "   ", "not a plan", "{broken json", "```json\n```", "1.no space\n2.x"] {
            let plan = parse_plan(raw, GOAL);
            assert_eq!(plan.source, PlanSource::Fallback, "raw: {raw:?}");
            assert_eq!(plan.steps.len(), PLAN_LENGTH);
        }
    }

    #[test]
    fn test_fallback_substitutes_goal() {
        let steps = fallback_plan(GOAL);
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].title, "Week 1: Foundation Building");
        assert_eq!(steps[1].title, "Week 2: Skill Development");
        assert_eq!(steps[2].title, "Week 3: Implementation");
        assert_eq!(steps[3].title, "Week 4: Optimization");
        assert!(steps.iter().all(|s| s.description.contains(GOAL)));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```json{}```"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```\n1. a\n```"), "1. a");
    }
}
