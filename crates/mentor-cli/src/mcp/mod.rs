//! MCP server implementation for Mentor
//!
//! Exposes mentor sessions as tools so an AI assistant can relay a user's
//! messages and show their progress. Sessions are shared with the terminal
//! front end through the same store.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use mentor_core::Orchestrator;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

use crate::store::SessionStore;

pub mod errors;
pub mod handlers;

pub use handlers::{McpResult, SendMessage, SessionId, Sessions};

/// MCP server for Mentor
#[derive(Clone)]
pub struct MentorMcpServer {
    sessions: Arc<Mutex<Sessions>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MentorMcpServer {
    pub fn new(orchestrator: Orchestrator, store: SessionStore) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(Sessions::new(orchestrator, store))),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "send_message",
        description = "Send the user's message to their goal mentor and return the mentor's reply. Pass the user's words unchanged: the mentor recognizes 'new goal', 'done' and 'stuck/help' itself. Unknown session ids start a fresh session that begins with the user stating a goal."
    )]
    async fn send_message(&self, params: Parameters<SendMessage>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.sessions.clone());
        handlers.send_message(params).await
    }

    #[tool(
        name = "show_progress",
        description = "Show a session's progress dashboard: the goal, the current mode, each plan step marked done, current or upcoming, and the details of the current step."
    )]
    async fn show_progress(&self, params: Parameters<SessionId>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.sessions.clone());
        handlers.show_progress(params).await
    }

    #[tool(
        name = "reset_session",
        description = "Discard a session's goal, plan and progress and ask the user for a new goal. This cannot be undone."
    )]
    async fn reset_session(&self, params: Parameters<SessionId>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.sessions.clone());
        handlers.reset_session(params).await
    }

    #[tool(
        name = "list_sessions",
        description = "List stored sessions, most recently updated first, with each session's goal, mode and step count."
    )]
    async fn list_sessions(&self) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.sessions.clone());
        handlers.list_sessions().await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for MentorMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mentor".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(r#"Mentor is a goal-coaching assistant. It turns a goal into a 4-week plan and then walks the user through it one week at a time.

## Conversation Flow
1. The user states a goal. The mentor may ask a refining question first.
2. The mentor drafts a 4-week plan and presents Week 1.
3. The user works through the weeks, saying when a week is done or asking for help when stuck.
4. After Week 4 the mentor summarizes what was accomplished.

## Using the Tools
- Relay every user message with `send_message` and show the reply as is
- Keep one `session_id` per user or per goal
- Use `show_progress` when the user asks where they are
- Use `reset_session` only when the user explicitly wants to start over
- `list_sessions` shows what is stored

The mentor works without a reachable language model too; replies are then simpler but the session still advances."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: MentorMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Mentor MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
