//! Summarization model provider.
//!
//! Loading a model is slow, so a [`ModelProvider`] loads once and hands out
//! the same shared instance on every later [`acquire`](ModelProvider::acquire).

mod config;
#[cfg(feature = "hub")]
mod t5;

use std::sync::{Arc, OnceLock};

use crate::error::Result;
use crate::summarize::SummaryModel;

pub use config::{
    DeviceChoice, ModelConfig, DEFAULT_MAX_INPUT_TOKENS, DEFAULT_MODEL_ID, DEFAULT_REVISION,
    DEFAULT_TASK_PREFIX,
};
#[cfg(feature = "hub")]
pub use t5::{HubLoader, T5Summarizer};

/// Something that can build a summarization model.
pub trait ModelLoader: Send + Sync {
    /// Build the model. Called at most once per successful provider.
    fn load(&self) -> Result<Arc<dyn SummaryModel>>;

    /// Short label for log output.
    fn describe(&self) -> String {
        "custom loader".to_string()
    }
}

/// Adapts a closure into a [`ModelLoader`].
pub struct FnLoader<F>(pub F);

impl<F> ModelLoader for FnLoader<F>
where
    F: Fn() -> Result<Arc<dyn SummaryModel>> + Send + Sync,
{
    fn load(&self) -> Result<Arc<dyn SummaryModel>> {
        (self.0)()
    }
}

/// Lazily loads a model and caches it for the provider's lifetime.
pub struct ModelProvider {
    loader: Box<dyn ModelLoader>,
    model: OnceLock<Arc<dyn SummaryModel>>,
}

impl ModelProvider {
    /// Create a provider around any loader.
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            model: OnceLock::new(),
        }
    }

    /// Create a provider from a loading closure.
    pub fn from_fn<F>(load: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn SummaryModel>> + Send + Sync + 'static,
    {
        Self::new(FnLoader(load))
    }

    /// Create a provider that loads from the Hugging Face Hub.
    #[cfg(feature = "hub")]
    pub fn from_hub(config: ModelConfig) -> Self {
        Self::new(HubLoader::new(config))
    }

    /// Get the model, loading it on first use.
    ///
    /// A failed load is returned to the caller and not cached; the next call
    /// tries again.
    pub fn acquire(&self) -> Result<Arc<dyn SummaryModel>> {
        if let Some(model) = self.model.get() {
            return Ok(Arc::clone(model));
        }

        log::info!("loading summarization model {}", self.loader.describe());
        let loaded = self.loader.load()?;
        Ok(Arc::clone(self.model.get_or_init(|| loaded)))
    }

    /// Check if the model has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }
}

impl std::fmt::Debug for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelProvider")
            .field("loader", &self.loader.describe())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
