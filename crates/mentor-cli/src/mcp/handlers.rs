//! MCP tool handlers implementation

use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;
use mentor_core::{Orchestrator, Progress};
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::errors::to_mcp_error;
use crate::store::SessionStore;

/// Identifies a conversation.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SessionId {
    /// Session identifier, any string. Unknown ids start a fresh session.
    pub session_id: String,
}

/// One user message for a session.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SendMessage {
    /// Session identifier, any string. Unknown ids start a fresh session.
    pub session_id: String,
    /// What the user said
    pub message: String,
}

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Orchestrator and store behind one lock, so turns of the same session never
/// interleave.
pub struct Sessions {
    orchestrator: Orchestrator,
    store: SessionStore,
}

impl Sessions {
    pub fn new(orchestrator: Orchestrator, store: SessionStore) -> Self {
        Self {
            orchestrator,
            store,
        }
    }

    pub async fn send_message(&self, session_id: &str, message: &str) -> Result<String> {
        let state = self
            .store
            .load_or_new(session_id)
            .await
            .context("Failed to load session")?;
        let turn = self.orchestrator.process(state, message).await;
        self.store
            .save(session_id, &turn.state)
            .await
            .context("Failed to save session")?;
        Ok(turn.response)
    }

    pub async fn show_progress(&self, session_id: &str) -> Result<String> {
        let state = self
            .store
            .load_or_new(session_id)
            .await
            .context("Failed to load session")?;
        Ok(Progress(&state).to_string())
    }

    pub async fn reset_session(&self, session_id: &str) -> Result<String> {
        let turn = Orchestrator::reset();
        self.store
            .save(session_id, &turn.state)
            .await
            .context("Failed to save session")?;
        Ok(turn.response)
    }

    pub async fn list_sessions(&self) -> Result<String> {
        let sessions = self.store.list().await.context("Failed to list sessions")?;
        Ok(sessions.to_string())
    }
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    sessions: Arc<Mutex<Sessions>>,
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

impl McpHandlers {
    pub fn new(sessions: Arc<Mutex<Sessions>>) -> Self {
        Self { sessions }
    }

    pub async fn send_message(&self, Parameters(params): Parameters<SendMessage>) -> McpResult {
        debug!("send_message: {:?}", params);

        self.sessions
            .lock()
            .await
            .send_message(&params.session_id, &params.message)
            .await
            .map(text_result)
            .map_err(|e| to_mcp_error("Failed to process message", &e))
    }

    pub async fn show_progress(&self, Parameters(params): Parameters<SessionId>) -> McpResult {
        debug!("show_progress: {:?}", params);

        self.sessions
            .lock()
            .await
            .show_progress(&params.session_id)
            .await
            .map(text_result)
            .map_err(|e| to_mcp_error("Failed to show progress", &e))
    }

    pub async fn reset_session(&self, Parameters(params): Parameters<SessionId>) -> McpResult {
        debug!("reset_session: {:?}", params);

        self.sessions
            .lock()
            .await
            .reset_session(&params.session_id)
            .await
            .map(text_result)
            .map_err(|e| to_mcp_error("Failed to reset session", &e))
    }

    pub async fn list_sessions(&self) -> McpResult {
        debug!("list_sessions");

        self.sessions
            .lock()
            .await
            .list_sessions()
            .await
            .map(text_result)
            .map_err(|e| to_mcp_error("Failed to list sessions", &e))
    }
}
