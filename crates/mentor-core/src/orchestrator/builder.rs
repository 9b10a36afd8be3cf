//! Builder for creating and configuring Orchestrator instances.

use std::{sync::Arc, time::Duration};

use super::Orchestrator;
use crate::{
    error::{MentorError, Result},
    intent::Vocabulary,
    port::LanguageModel,
};

/// Default bound on a single model call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating and configuring Orchestrator instances.
#[derive(Clone)]
pub struct OrchestratorBuilder {
    model: Option<Arc<dyn LanguageModel>>,
    timeout: Duration,
    vocabulary: Vocabulary,
}

impl OrchestratorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            model: None,
            timeout: DEFAULT_TIMEOUT,
            vocabulary: Vocabulary::default(),
        }
    }

    /// Sets the language-model backend.
    pub fn with_model<M: LanguageModel + 'static>(self, model: M) -> Self {
        self.with_shared_model(Arc::new(model))
    }

    /// Sets a backend that is shared with other owners, e.g. a test that
    /// inspects the requests afterwards.
    pub fn with_shared_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Sets the bound on each model call. Defaults to 30 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets which command words the classifier recognizes.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Builds the configured orchestrator.
    ///
    /// # Errors
    ///
    /// Returns `MentorError::Configuration` if no model was set or the
    /// timeout is zero
    pub fn build(self) -> Result<Orchestrator> {
        let model = self.model.ok_or_else(|| MentorError::Configuration {
            message: "no language model configured".to_string(),
        })?;

        if self.timeout.is_zero() {
            return Err(MentorError::Configuration {
                message: "model timeout must be greater than zero".to_string(),
            });
        }

        Ok(Orchestrator::new(model, self.timeout, self.vocabulary))
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
