//! Resolves command-line flags and environment into an orchestrator.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use mentor_core::{OfflineModel, Orchestrator, OrchestratorBuilder, Vocabulary};

use crate::{args::Args, llm::ChatCompletionsModel};

/// Environment variables checked for an API key, in order.
pub const API_KEY_VARS: &[&str] = &["MENTOR_API_KEY", "GROQ_API_KEY"];

/// Settings for the HTTP model backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
}

impl ModelConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            base_url: args.base_url.clone(),
            model: args.model.clone(),
            timeout: Duration::from_secs(args.timeout_secs),
            temperature: args.temperature,
        }
    }
}

/// First non-blank value among [`API_KEY_VARS`].
fn find_api_key<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Builds the orchestrator described by `args`.
///
/// Loads `.env` first. Offline mode needs no key; otherwise a missing key is
/// an error.
pub fn build_orchestrator(args: &Args) -> Result<Orchestrator> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    let config = ModelConfig::from_args(args);
    let vocabulary = if args.console_vocabulary {
        Vocabulary::Console
    } else {
        Vocabulary::Conversational
    };
    let builder = OrchestratorBuilder::new()
        .with_timeout(config.timeout)
        .with_vocabulary(vocabulary);

    let builder = if args.offline {
        info!("Running offline");
        builder.with_model(OfflineModel)
    } else {
        let Some(api_key) = find_api_key(|name| std::env::var(name).ok()) else {
            bail!(
                "No API key found. Set {} (or use --offline)",
                API_KEY_VARS.join(" or ")
            );
        };
        info!("Using model {} at {}", config.model, config.base_url);
        builder.with_model(
            ChatCompletionsModel::from_config(&config, api_key)
                .context("Failed to create HTTP client")?,
        )
    };

    builder.build().context("Failed to initialize orchestrator")
}
