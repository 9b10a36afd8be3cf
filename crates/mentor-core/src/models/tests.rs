#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;

    use crate::{
        error::MentorError,
        models::{CompletionRecord, ConversationState, ConversationTurn, Mode, Role, Step},
    };

    fn create_test_plan() -> Vec<Step> {
        (1..=4)
            .map(|week| {
                Step::new(
                    format!("Week {week}: Focus"),
                    format!("Description {week}"),
                    format!("Tips {week}"),
                    format!("Actions {week}"),
                )
            })
            .collect()
    }

    fn create_execution_state(index: usize) -> ConversationState {
        ConversationState {
            goal: "Learn to play guitar".to_string(),
            goal_refined: true,
            plan: create_test_plan(),
            current_step_index: index,
            mode: Mode::Execution,
            ..ConversationState::new()
        }
    }

    #[test]
    fn test_mode_name_matches_snapshot_name() {
        for mode in [
            Mode::GoalSetting,
            Mode::Planning,
            Mode::Execution,
            Mode::Help,
            Mode::Completed,
        ] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
        }
    }

    #[test]
    fn test_mode_serializes_snake_case() {
        let json = serde_json::to_string(&Mode::GoalSetting).unwrap();
        assert_eq!(json, "\"goal_setting\"");
    }

    #[test]
    fn test_new_state_is_goal_setting_and_empty() {
        let state = ConversationState::new();
        assert_eq!(state.mode, Mode::GoalSetting);
        assert!(state.goal.is_empty());
        assert!(!state.goal_refined);
        assert!(state.plan.is_empty());
        assert_eq!(state.current_step_index, 0);
        assert_eq!(state.stuck_count, 0);
        assert!(state.history.is_empty());
        assert!(state.completions.is_empty());
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_current_step_follows_index() {
        let state = create_execution_state(2);
        assert_eq!(state.current_step().unwrap().title, "Week 3: Focus");

        let finished = create_execution_state(4);
        assert!(finished.current_step().is_none());
        assert!(finished.is_plan_finished());
    }

    #[test]
    fn test_progress_is_fraction_of_plan() {
        assert_eq!(ConversationState::new().progress(), 0.0);
        assert_eq!(create_execution_state(1).progress(), 0.25);
        assert_eq!(create_execution_state(4).progress(), 1.0);
    }

    #[test]
    fn test_record_completion_never_overwrites() {
        let mut state = create_execution_state(0);
        assert!(state.record_completion(0, "done with week one"));
        let first = state.completions[&0].clone();

        assert!(!state.record_completion(0, "done again"));
        assert_eq!(state.completions[&0], first);
        assert_eq!(state.completions[&0].user_feedback, "done with week one");
        assert!(state.is_completed(0));
        assert!(!state.is_completed(1));
    }

    #[test]
    fn test_push_exchange_skips_empty_user_input() {
        let mut state = ConversationState::new();
        state.push_exchange("   ", "Hello there");
        state.push_exchange("I want to learn Rust", "Great goal!");

        let roles: Vec<Role> = state.history.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(state.history[1], ConversationTurn::user("I want to learn Rust"));
    }

    #[test]
    fn test_invariants_reject_refined_empty_goal() {
        let state = ConversationState {
            goal_refined: true,
            ..ConversationState::new()
        };
        assert!(matches!(
            state.check_invariants(),
            Err(MentorError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_invariants_reject_finished_plan_outside_completed() {
        let state = create_execution_state(4);
        assert!(state.check_invariants().is_err());

        let completed = ConversationState {
            mode: Mode::Completed,
            ..create_execution_state(4)
        };
        assert!(completed.check_invariants().is_ok());
    }

    #[test]
    fn test_invariants_reject_planning_with_plan() {
        let state = ConversationState {
            mode: Mode::Planning,
            ..create_execution_state(0)
        };
        assert!(state.check_invariants().is_err());
    }

    #[test]
    fn test_invariants_reject_index_beyond_plan() {
        let state = create_execution_state(5);
        let err = state.check_invariants().unwrap_err();
        assert!(err.to_string().contains("step index 5 beyond plan of 4"));
    }

    #[test]
    fn test_snapshot_json_restores_completions() {
        let mut state = create_execution_state(1);
        state.completions.insert(
            0,
            CompletionRecord {
                completed_at: Timestamp::from_second(1640995200).unwrap(),
                user_feedback: "finished".to_string(),
            },
        );
        state.push_exchange("done", "Awesome!");

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"mode\":\"execution\""));
        let restored: ConversationState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_snapshot_missing_fields_default() {
        let restored: ConversationState = serde_json::from_str(r#"{"goal":"Read more"}"#).unwrap();
        assert_eq!(restored.goal, "Read more");
        assert_eq!(restored.mode, Mode::GoalSetting);
    }
}
