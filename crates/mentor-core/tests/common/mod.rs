use std::sync::Arc;

use mentor_core::{
    port::{ScriptedModel, ScriptedReply},
    Orchestrator, OrchestratorBuilder, Vocabulary,
};

/// Helper function to create an orchestrator over a scripted model the test
/// can inspect afterwards
pub fn create_test_orchestrator(
    replies: Vec<ScriptedReply>,
    vocabulary: Vocabulary,
) -> (Arc<ScriptedModel>, Orchestrator) {
    let model = Arc::new(ScriptedModel::new(replies));
    let orchestrator = OrchestratorBuilder::new()
        .with_shared_model(model.clone())
        .with_vocabulary(vocabulary)
        .build()
        .expect("Failed to build orchestrator");
    (model, orchestrator)
}

/// A structured plan reply, optionally wrapped in a JSON code fence
pub fn structured_plan_reply(fenced: bool) -> String {
    let json = r#"{
  "steps": [
    {"title": "Week 1: Vocabulary", "description": "Learn 200 common words", "tips": "Use flashcards", "key_actions": "20 words a day"},
    {"title": "Week 2: Grammar", "description": "Present tense", "tips": "Write short sentences", "key_actions": "One page a day"},
    {"title": "Week 3: Listening", "description": "Podcasts for learners", "tips": "Slow speed first", "key_actions": "15 minutes daily"},
    {"title": "Week 4: Speaking", "description": "First conversation", "tips": "Mistakes are fine", "key_actions": "Book a tutor session"}
  ],
  "encouragement": "Spanish opens a lot of doors!"
}"#;
    if fenced {
        format!("```json\n{json}\n```")
    } else {
        json.to_string()
    }
}
