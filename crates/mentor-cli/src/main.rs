//! Mentor CLI Application
//!
//! Terminal and MCP front ends for the goal mentor.

mod args;
mod cli;
mod config;
mod llm;
mod mcp;
mod renderer;
mod store;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, MentorMcpServer};
use renderer::TerminalRenderer;
use store::SessionStore;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = Args::parse();
    let command = args.command.take().unwrap_or(Chat);

    let store = SessionStore::open(args.database_file.clone())
        .await
        .context("Failed to open session store")?;

    info!("Mentor started, sessions at {}", store.path().display());

    if let Serve = command {
        info!("Starting Mentor MCP server");
        let orchestrator = config::build_orchestrator(&args)?;
        return run_stdio_server(MentorMcpServer::new(orchestrator, store))
            .await
            .context("MCP server failed");
    }

    let cli = Cli::new(
        store,
        TerminalRenderer::new(!args.no_color),
        args.session.clone(),
    );

    // Only commands that talk to the mentor need a model backend.
    match command {
        Status => cli.status().await,
        Reset => cli.reset().await,
        Sessions => cli.sessions().await,
        Say { message } => {
            let orchestrator = config::build_orchestrator(&args)?;
            cli.say(&orchestrator, &message.join(" ")).await
        }
        Chat | Serve => {
            let orchestrator = config::build_orchestrator(&args)?;
            cli.chat(&orchestrator).await
        }
    }
}
