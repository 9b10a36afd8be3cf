use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create an offline, plain-text Command against `db_path`
fn mentor_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mentor").expect("Failed to find mentor binary");
    cmd.env_remove("MENTOR_API_KEY")
        .env_remove("GROQ_API_KEY")
        .env_remove("MENTOR_TIMEOUT_SECS")
        .args(["--offline", "--no-color", "--database-file"])
        .arg(db_path);
    cmd
}

#[test]
fn test_cli_say_replies_offline() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mentor_cmd(&db_path)
        .args(["say", "Learn", "conversational", "Spanish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mentor:"))
        .stdout(predicate::str::contains(
            "Let's work with your goal: Learn conversational Spanish",
        ));
}

#[test]
fn test_cli_session_continues_across_invocations() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mentor_cmd(&db_path)
        .args(["say", "Run a 10k race"])
        .assert()
        .success();
    mentor_cmd(&db_path)
        .args(["say", "Let's make the plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4-week plan"))
        .stdout(predicate::str::contains("**Week 1"));

    mentor_cmd(&db_path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("# 🎯 Run a 10k race"))
        .stdout(predicate::str::contains("0/4 steps (0%)"))
        .stdout(predicate::str::contains("- 🔄 **Week 1"));
}

#[test]
fn test_cli_done_advances_progress() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    for message in ["Learn to draw", "plan it", "done"] {
        mentor_cmd(&db_path).args(["say", message]).assert().success();
    }

    mentor_cmd(&db_path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("1/4 steps (25%)"))
        .stdout(predicate::str::contains("- ✅ Week 1"));
}

#[test]
fn test_cli_status_of_fresh_session() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mentor_cmd(&db_path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No goal yet"))
        .stdout(predicate::str::contains("No plan yet."));
}

#[test]
fn test_cli_reset_clears_goal() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mentor_cmd(&db_path)
        .args(["say", "Bake sourdough bread"])
        .assert()
        .success();

    mentor_cmd(&db_path)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "What new goal would you like to work on?",
        ));

    mentor_cmd(&db_path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No goal yet"));
}

#[test]
fn test_cli_sessions_listing() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mentor_cmd(&db_path)
        .arg("sessions")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions found."));

    mentor_cmd(&db_path)
        .args(["--session", "garden", "say", "Grow tomatoes"])
        .assert()
        .success();

    mentor_cmd(&db_path)
        .arg("sessions")
        .assert()
        .success()
        .stdout(predicate::str::contains("## garden"))
        .stdout(predicate::str::contains("- **Goal**: Grow tomatoes"));
}

#[test]
fn test_cli_sessions_are_isolated() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mentor_cmd(&db_path)
        .args(["-s", "one", "say", "Learn chess"])
        .assert()
        .success();

    mentor_cmd(&db_path)
        .args(["-s", "two", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No goal yet"));
}

#[test]
fn test_cli_say_requires_message() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mentor_cmd(&db_path).arg("say").assert().failure();
}

/// Command without `--offline` and without any API key in the environment
fn keyless_cmd(temp_dir: &TempDir, db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mentor").expect("Failed to find mentor binary");
    cmd.current_dir(temp_dir.path())
        .env_remove("MENTOR_API_KEY")
        .env_remove("GROQ_API_KEY")
        .args(["--no-color", "--database-file"])
        .arg(db_path);
    cmd
}

#[test]
fn test_cli_missing_api_key_is_an_error_when_talking() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    keyless_cmd(&temp_dir, &db_path)
        .args(["say", "Learn chess"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key found"));
}

#[test]
fn test_cli_store_commands_need_no_api_key() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mentor_cmd(&db_path)
        .args(["say", "Learn chess"])
        .assert()
        .success();

    keyless_cmd(&temp_dir, &db_path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("# 🎯 Learn chess"));

    keyless_cmd(&temp_dir, &db_path)
        .arg("sessions")
        .assert()
        .success()
        .stdout(predicate::str::contains("## default"));

    keyless_cmd(&temp_dir, &db_path)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "What new goal would you like to work on?",
        ));
}
