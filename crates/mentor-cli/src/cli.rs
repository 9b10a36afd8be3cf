//! Command handlers for the terminal front end.
//!
//! Every command loads the session snapshot, does its work, and saves any
//! changed state before returning.

use anyhow::{Context, Result};
use log::{debug, info};
use mentor_core::{ConversationState, Orchestrator, Progress, GREETING};
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{renderer::TerminalRenderer, store::SessionStore};

/// What a line typed at the console asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Send this text to the mentor
    Message(String),
    /// Show the progress dashboard
    Status,
    /// Leave the console
    Quit,
    /// Nothing to do
    Empty,
}

impl ConsoleInput {
    /// Expands quick actions; anything else is a message.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => Self::Empty,
            "/quit" | "/exit" | "exit" | "quit" => Self::Quit,
            "/status" => Self::Status,
            "/help" => Self::Message("I'm stuck and need help".to_string()),
            "/done" => Self::Message("I completed this step!".to_string()),
            "/new" => Self::Message("new goal".to_string()),
            _ => Self::Message(line.to_string()),
        }
    }
}

/// Adds a sent line to the editor's history. Returns whether it was added.
fn remember(editor: &mut DefaultEditor, line: &str) -> bool {
    match editor.add_history_entry(line.trim()) {
        Ok(added) => added,
        Err(e) => {
            debug!("Failed to record input history: {e}");
            false
        }
    }
}

const CONSOLE_HINT: &str =
    "Quick actions: /help (I'm stuck), /done (step finished), /new (new goal), /status, /quit";

/// Terminal front end bound to one session.
///
/// Only `chat` and `say` talk to the mentor and take an orchestrator; the
/// other commands work on the store alone.
pub struct Cli {
    store: SessionStore,
    renderer: TerminalRenderer,
    session: String,
}

impl Cli {
    pub fn new(store: SessionStore, renderer: TerminalRenderer, session: String) -> Self {
        Self {
            store,
            renderer,
            session,
        }
    }

    /// Interactive console. Each turn is saved as soon as it is answered.
    pub async fn chat(&self, orchestrator: &Orchestrator) -> Result<()> {
        let mut state = self.load().await?;
        let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;

        self.renderer.notice(CONSOLE_HINT);
        if state.history.is_empty() {
            self.renderer.reply(GREETING);
        } else {
            self.renderer.render(&Progress(&state).to_string());
        }

        loop {
            let line = match editor.readline(&self.renderer.prompt()) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e).context("Failed to read input"),
            };

            match ConsoleInput::parse(&line) {
                ConsoleInput::Empty => continue,
                ConsoleInput::Quit => break,
                ConsoleInput::Status => {
                    self.renderer.render(&Progress(&state).to_string());
                }
                ConsoleInput::Message(message) => {
                    remember(&mut editor, &line);
                    state = self.exchange(orchestrator, state, &message).await?;
                }
            }
        }

        self.renderer.notice("Progress saved. See you next time!");
        Ok(())
    }

    /// One turn: send `message`, print the reply.
    pub async fn say(&self, orchestrator: &Orchestrator, message: &str) -> Result<()> {
        let state = self.load().await?;
        self.exchange(orchestrator, state, message).await?;
        Ok(())
    }

    pub async fn status(&self) -> Result<()> {
        let state = self.load().await?;
        self.renderer.render(&Progress(&state).to_string());
        Ok(())
    }

    pub async fn reset(&self) -> Result<()> {
        let turn = Orchestrator::reset();
        self.save(&turn.state).await?;
        info!("Session '{}' reset", self.session);
        self.renderer.reply(&turn.response);
        Ok(())
    }

    pub async fn sessions(&self) -> Result<()> {
        let sessions = self.store.list().await.context("Failed to list sessions")?;
        debug!("Listing {} sessions", sessions.len());
        self.renderer.render(&sessions.to_string());
        Ok(())
    }

    async fn exchange(
        &self,
        orchestrator: &Orchestrator,
        state: ConversationState,
        message: &str,
    ) -> Result<ConversationState> {
        debug!("Session '{}' <- {message:?}", self.session);
        let turn = orchestrator.process(state, message).await;
        self.save(&turn.state).await?;
        self.renderer.reply(&turn.response);
        Ok(turn.state)
    }

    async fn load(&self) -> Result<ConversationState> {
        self.store
            .load_or_new(&self.session)
            .await
            .with_context(|| format!("Failed to load session '{}'", self.session))
    }

    async fn save(&self, state: &ConversationState) -> Result<()> {
        self.store
            .save(&self.session, state)
            .await
            .with_context(|| format!("Failed to save session '{}'", self.session))
    }
}
