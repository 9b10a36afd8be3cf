use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Goal mentor: from a stated goal to a four-week plan, one step at a time
///
/// Mentor keeps one conversation per session id. Each turn is saved, so a
/// session can be continued later from the console, through one-shot `say`
/// commands, or from an AI assistant via the MCP server.
#[derive(Parser, Debug)]
#[command(version, about, name = "mentor")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/mentor/sessions.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Session to use
    #[arg(long, short, global = true, default_value = "default")]
    pub session: String,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Run without a language model; every turn uses its built-in fallback
    #[arg(long, global = true)]
    pub offline: bool,

    /// Also treat yes, no and skip as step-tracking commands
    #[arg(long, global = true)]
    pub console_vocabulary: bool,

    /// Model name sent to the chat-completions endpoint
    #[arg(long, global = true, env = "MENTOR_MODEL", default_value = "llama3-70b-8192")]
    pub model: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(
        long,
        global = true,
        env = "MENTOR_BASE_URL",
        default_value = "https://api.groq.com/openai/v1"
    )]
    pub base_url: String,

    /// Seconds to wait for a model reply before falling back
    #[arg(long, global = true, env = "MENTOR_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Sampling temperature
    #[arg(long, global = true, default_value_t = 0.7)]
    pub temperature: f32,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without one, `chat` starts.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Talk to the mentor interactively
    #[command(alias = "c")]
    Chat,
    /// Send one message and print the reply
    Say {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Show the progress dashboard for the session
    #[command(alias = "st")]
    Status,
    /// Forget the session's goal and plan
    Reset,
    /// List stored sessions
    #[command(alias = "ls")]
    Sessions,
    /// Start the MCP server
    Serve,
}
