//! Summarization model configuration.

/// Default Hugging Face repository for the summarization model.
pub const DEFAULT_MODEL_ID: &str = "google-t5/t5-small";

/// Default repository revision.
pub const DEFAULT_REVISION: &str = "main";

/// Default model input budget in tokens.
pub const DEFAULT_MAX_INPUT_TOKENS: usize = 1024;

/// Text prepended to every input so T5 runs its summarization task.
pub const DEFAULT_TASK_PREFIX: &str = "summarize: ";

/// Where the model runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceChoice {
    #[default]
    Cpu,
    /// CUDA device by ordinal; falls back to CPU when unavailable
    Cuda(usize),
}

/// Which model to load and how to drive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Hub repository id
    pub model_id: String,
    /// Branch, tag or commit
    pub revision: String,
    /// Input budget in tokens
    pub max_input_tokens: usize,
    /// Prefix added to each generation input
    pub task_prefix: String,
    /// Target device
    pub device: DeviceChoice,
    /// Seed for sampling; unused by greedy decoding
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            revision: DEFAULT_REVISION.to_string(),
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
            task_prefix: DEFAULT_TASK_PREFIX.to_string(),
            device: DeviceChoice::Cpu,
            seed: 299_792_458,
        }
    }
}

impl ModelConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hub repository id.
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Set the repository revision.
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// Set the input budget.
    pub fn with_max_input_tokens(mut self, tokens: usize) -> Self {
        self.max_input_tokens = tokens;
        self
    }

    /// Set the task prefix.
    pub fn with_task_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.task_prefix = prefix.into();
        self
    }

    /// Set the device.
    pub fn with_device(mut self, device: DeviceChoice) -> Self {
        self.device = device;
        self
    }
}
