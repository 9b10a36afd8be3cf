//! SQLite persistence for session snapshots.
//!
//! Every session is one row holding the latest `ConversationState` as JSON.
//! The store opens a connection per operation inside
//! `tokio::task::spawn_blocking`, so callers stay async and the store itself
//! is just a path.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use jiff::Timestamp;
use mentor_core::{ConversationState, LocalDateTime, Mode};
use rusqlite::Connection;
use tokio::task;

pub mod error;
mod migrations;
mod queries;

pub use error::{DatabaseResultExt, Result, StoreError};

/// Database connection handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens a connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// One line of the session listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub id: String,
    pub goal: String,
    pub mode: Mode,
    pub steps_passed: usize,
    pub total_steps: usize,
    pub updated_at: Timestamp,
}

impl SessionSummary {
    pub fn new(id: String, state: &ConversationState, updated_at: Timestamp) -> Self {
        Self {
            id,
            goal: state.goal.clone(),
            mode: state.mode,
            steps_passed: state.current_step_index.min(state.plan.len()),
            total_steps: state.plan.len(),
            updated_at,
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_steps > 0 {
            format!(" ({}/{})", self.steps_passed, self.total_steps)
        } else {
            String::new()
        };

        writeln!(f, "## {}{progress}", self.id)?;
        writeln!(f)?;
        if !self.goal.is_empty() {
            writeln!(f, "- **Goal**: {}", self.goal)?;
        }
        writeln!(f, "- **Mode**: {}", self.mode.with_icon())?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)?;

        Ok(())
    }
}

/// Session listing with empty-collection handling.
pub struct SessionSummaries(pub Vec<SessionSummary>);

impl SessionSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for SessionSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No sessions found.");
        }
        for summary in &self.0 {
            write!(f, "{summary}")?;
        }
        Ok(())
    }
}

/// Async front for session snapshots.
#[derive(Debug, Clone)]
pub struct SessionStore {
    db_path: PathBuf,
}

impl SessionStore {
    /// Opens the store, creating the database file and schema if needed.
    ///
    /// Without a path, uses `$XDG_DATA_HOME/mentor/sessions.db`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FileSystem` if the parent directory cannot be
    /// created and `StoreError::Database` if initialization fails
    pub async fn open(path: Option<PathBuf>) -> Result<Self> {
        let db_path = match path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = Self { db_path };
        store.run(|_| Ok(())).await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    pub async fn load(&self, id: &str) -> Result<Option<ConversationState>> {
        let id = id.to_string();
        self.run(move |db| db.get_session(&id)).await
    }

    /// The stored state, or a fresh one for an unknown session.
    pub async fn load_or_new(&self, id: &str) -> Result<ConversationState> {
        Ok(self.load(id).await?.unwrap_or_default())
    }

    pub async fn save(&self, id: &str, state: &ConversationState) -> Result<()> {
        let id = id.to_string();
        let state = state.clone();
        self.run(move |db| db.save_session(&id, &state)).await
    }

    pub async fn list(&self) -> Result<SessionSummaries> {
        self.run(|db| db.list_sessions()).await.map(SessionSummaries)
    }

    async fn run<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            operation(&db)
        })
        .await
        .map_err(|e| StoreError::Join(e.to_string()))?
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("mentor")
            .place_data_file("sessions.db")
            .map_err(|e| StoreError::XdgDirectory(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mentor_core::{plan_parser::fallback_plan, ConversationTurn};
    use tempfile::TempDir;

    use super::*;

    /// Helper function to create a store in a temporary directory
    async fn create_test_store() -> (TempDir, SessionStore) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("nested").join("sessions.db");
        let store = SessionStore::open(Some(db_path))
            .await
            .expect("Failed to open store");
        (temp_dir, store)
    }

    fn execution_state(goal: &str, index: usize) -> ConversationState {
        let mut state = ConversationState {
            goal: goal.to_string(),
            goal_refined: true,
            plan: fallback_plan(goal),
            current_step_index: index,
            mode: Mode::Execution,
            ..ConversationState::new()
        };
        state.history.push(ConversationTurn::user(goal));
        state
    }

    #[tokio::test]
    async fn test_open_creates_parent_directories() {
        let (_temp_dir, store) = create_test_store().await;
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_unknown_session_is_fresh() {
        let (_temp_dir, store) = create_test_store().await;
        assert!(store.load("nope").await.unwrap().is_none());
        assert_eq!(store.load_or_new("nope").await.unwrap(), ConversationState::new());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let (_temp_dir, store) = create_test_store().await;
        let mut state = execution_state("Learn to knit", 1);
        state.record_completion(0, "done");

        store.save("knitting", &state).await.unwrap();
        let loaded = store.load("knitting").await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_save_overwrites_snapshot() {
        let (_temp_dir, store) = create_test_store().await;
        store.save("s", &execution_state("Run", 0)).await.unwrap();
        store.save("s", &execution_state("Run", 2)).await.unwrap();

        let loaded = store.load("s").await.unwrap().unwrap();
        assert_eq!(loaded.current_step_index, 2);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_sessions_summaries() {
        let (_temp_dir, store) = create_test_store().await;
        assert!(store.list().await.unwrap().is_empty());

        store.save("a", &ConversationState::new()).await.unwrap();
        store.save("b", &execution_state("Read more", 3)).await.unwrap();

        let sessions = store.list().await.unwrap();
        assert_eq!(sessions.len(), 2);
        let b = sessions.0.iter().find(|s| s.id == "b").unwrap();
        assert_eq!(b.goal, "Read more");
        assert_eq!(b.steps_passed, 3);
        assert_eq!(b.total_steps, 4);

        let output = sessions.to_string();
        assert!(output.contains("## b (3/4)"));
        assert!(output.contains("- **Goal**: Read more"));
        assert!(output.contains("## a\n"));
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_reported() {
        let (_temp_dir, store) = create_test_store().await;
        let db = Database::new(store.path()).unwrap();
        db.connection
            .execute(
                "INSERT INTO sessions (id, state, created_at, updated_at) VALUES ('bad', 'not json', ?1, ?1)",
                [Timestamp::now().to_string()],
            )
            .unwrap();

        let err = store.load("bad").await.unwrap_err();
        assert!(matches!(err, StoreError::CorruptSnapshot { .. }));
        assert!(store.list().await.unwrap().is_empty());
    }
}
