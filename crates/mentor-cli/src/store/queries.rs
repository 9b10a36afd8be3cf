//! Session snapshot queries.

use jiff::Timestamp;
use log::warn;
use mentor_core::ConversationState;
use rusqlite::{params, types::Type, OptionalExtension};

use super::{
    error::{DatabaseResultExt, Result, StoreError},
    SessionSummary,
};

const SELECT_SESSION_SQL: &str = "SELECT state FROM sessions WHERE id = ?1";
const UPSERT_SESSION_SQL: &str = "INSERT INTO sessions (id, state, created_at, updated_at) VALUES (?1, ?2, ?3, ?3) \
     ON CONFLICT(id) DO UPDATE SET state = excluded.state, updated_at = excluded.updated_at";
const LIST_SESSIONS_SQL: &str = "SELECT id, state, updated_at FROM sessions";

impl super::Database {
    /// Loads the latest snapshot of a session.
    pub fn get_session(&self, id: &str) -> Result<Option<ConversationState>> {
        let raw: Option<String> = self
            .connection
            .query_row(SELECT_SESSION_SQL, params![id], |row| row.get(0))
            .optional()
            .db_context("Failed to load session")?;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|source| StoreError::CorruptSnapshot {
                id: id.to_string(),
                source,
            })
        })
        .transpose()
    }

    /// Inserts or replaces the snapshot of a session.
    pub fn save_session(&self, id: &str, state: &ConversationState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        let now = Timestamp::now().to_string();

        self.connection
            .execute(UPSERT_SESSION_SQL, params![id, json, now])
            .db_context("Failed to save session")?;
        Ok(())
    }

    /// Summaries of every readable session, most recently updated first.
    ///
    /// Snapshots that no longer decode are skipped with a warning.
    pub fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let mut stmt = self
            .connection
            .prepare(LIST_SESSIONS_SQL)
            .db_context("Failed to prepare session listing")?;

        let rows = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                let state: String = row.get(1)?;
                let updated_at: String = row.get(2)?;
                let updated_at = updated_at.parse::<Timestamp>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
                })?;
                Ok((id, state, updated_at))
            })
            .db_context("Failed to list sessions")?;

        let mut summaries = Vec::new();
        for row in rows {
            let (id, json, updated_at) = row.db_context("Failed to read session row")?;
            match serde_json::from_str::<ConversationState>(&json) {
                Ok(state) => summaries.push(SessionSummary::new(id, &state, updated_at)),
                Err(e) => warn!("Skipping session '{id}' with unreadable snapshot: {e}"),
            }
        }

        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        Ok(summaries)
    }
}
