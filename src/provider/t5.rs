//! T5 summarization model loaded from the Hugging Face Hub via candle.

use std::sync::{Arc, Mutex};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::t5::{Config, T5ForConditionalGeneration};
use hf_hub::{api::sync::Api, Repo, RepoType};
use tokenizers::Tokenizer;

use crate::error::{Error, Result};
use crate::summarize::{GenerationParams, SummaryModel};

use super::config::{DeviceChoice, ModelConfig};
use super::ModelLoader;

/// Downloads (or reuses the cached) model files and builds a [`T5Summarizer`].
#[derive(Debug, Clone, Default)]
pub struct HubLoader {
    config: ModelConfig,
}

impl HubLoader {
    /// Create a loader for the given model.
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Get the model config.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

impl ModelLoader for HubLoader {
    fn load(&self) -> Result<Arc<dyn SummaryModel>> {
        Ok(Arc::new(T5Summarizer::load(&self.config)?))
    }

    fn describe(&self) -> String {
        format!("{}@{}", self.config.model_id, self.config.revision)
    }
}

/// A T5 encoder-decoder with its tokenizer.
pub struct T5Summarizer {
    model: Mutex<T5ForConditionalGeneration>,
    tokenizer: Tokenizer,
    model_config: Config,
    device: Device,
    max_input_tokens: usize,
    task_prefix: String,
    seed: u64,
}

impl T5Summarizer {
    /// Fetch config, tokenizer and weights and build the model.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let device = select_device(config.device);

        let api = Api::new().map_err(|e| load_error("create hub client", e))?;
        let repo = api.repo(Repo::with_revision(
            config.model_id.clone(),
            RepoType::Model,
            config.revision.clone(),
        ));

        let config_path = repo
            .get("config.json")
            .map_err(|e| load_error("download config", e))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| load_error("download tokenizer", e))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| load_error("download weights", e))?;

        let config_str = std::fs::read_to_string(&config_path)?;
        let model_config: Config =
            serde_json::from_str(&config_str).map_err(|e| load_error("parse config", e))?;

        let mut tokenizer =
            Tokenizer::from_file(&tokenizer_path).map_err(|e| load_error("load tokenizer", e))?;
        // Counting tokens needs the full, unpadded encoding
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(None)
            .map_err(|e| load_error("configure tokenizer", e))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| load_error("load weights", e))?
        };
        let model = T5ForConditionalGeneration::load(vb, &model_config)
            .map_err(|e| load_error("build model", e))?;

        log::info!("model loaded: {}@{}", config.model_id, config.revision);

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            model_config,
            device,
            max_input_tokens: config.max_input_tokens,
            task_prefix: config.task_prefix.clone(),
            seed: config.seed,
        })
    }

    fn eos_token_id(&self) -> u32 {
        self.model_config.eos_token_id as u32
    }

    fn decoder_start_token_id(&self) -> u32 {
        self.model_config
            .decoder_start_token_id
            .unwrap_or(self.model_config.pad_token_id) as u32
    }

    /// Tokenize the prefixed input, cutting it to the budget.
    fn prepare_input(&self, text: &str) -> Result<Vec<u32>> {
        let mut ids = self.encode(&format!("{}{}", self.task_prefix, text))?;
        if ids.len() > self.max_input_tokens {
            log::debug!(
                "truncating generation input from {} to {} tokens",
                ids.len(),
                self.max_input_tokens
            );
            ids.truncate(self.max_input_tokens);
            if let Some(last) = ids.last_mut() {
                *last = self.eos_token_id();
            }
        }
        Ok(ids)
    }

    fn suppress_eos(&self, logits: &Tensor) -> Result<Tensor> {
        let mut values = logits.to_vec1::<f32>().map_err(generation_error)?;
        if let Some(v) = values.get_mut(self.eos_token_id() as usize) {
            *v = f32::NEG_INFINITY;
        }
        Tensor::new(values.as_slice(), &self.device).map_err(generation_error)
    }
}

impl SummaryModel for T5Summarizer {
    fn max_input_tokens(&self) -> usize {
        self.max_input_tokens
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::Tokenizer(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, tokens: &[u32]) -> Result<String> {
        self.tokenizer
            .decode(tokens, true)
            .map_err(|e| Error::Tokenizer(e.to_string()))
    }

    fn generate(&self, text: &str, params: &GenerationParams) -> Result<String> {
        let input = self.prepare_input(text)?;
        let temperature = params.do_sample.then_some(1.0);
        let mut sampler = LogitsProcessor::new(self.seed, temperature, None);

        let mut model = self
            .model
            .lock()
            .map_err(|_| Error::Generation("model lock poisoned".to_string()))?;
        model.clear_kv_cache();

        let input_ids = Tensor::new(input.as_slice(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(generation_error)?;
        let encoder_output = model.encode(&input_ids).map_err(generation_error)?;

        let eos = self.eos_token_id();
        let mut output = vec![self.decoder_start_token_id()];
        for step in 0..params.max_length {
            let decoder_ids = if step == 0 || !self.model_config.use_cache {
                Tensor::new(output.as_slice(), &self.device)
            } else {
                Tensor::new(&output[output.len() - 1..], &self.device)
            }
            .and_then(|t| t.unsqueeze(0))
            .map_err(generation_error)?;

            let logits = model
                .decode(&decoder_ids, &encoder_output)
                .and_then(|l| l.squeeze(0))
                .and_then(|l| l.to_dtype(DType::F32))
                .map_err(generation_error)?;
            let logits = if step < params.min_length {
                self.suppress_eos(&logits)?
            } else {
                logits
            };

            let next = sampler.sample(&logits).map_err(generation_error)?;
            if next == eos {
                break;
            }
            output.push(next);
        }
        model.clear_kv_cache();
        drop(model);

        log::debug!("generated {} tokens", output.len() - 1);
        self.decode(&output[1..])
    }
}

fn select_device(choice: DeviceChoice) -> Device {
    match choice {
        DeviceChoice::Cpu => Device::Cpu,
        DeviceChoice::Cuda(ordinal) => match Device::new_cuda(ordinal) {
            Ok(device) => {
                log::info!("using CUDA device {}", ordinal);
                device
            }
            Err(e) => {
                log::warn!("CUDA device {} unavailable ({}), falling back to CPU", ordinal, e);
                Device::Cpu
            }
        },
    }
}

fn load_error(step: &str, e: impl std::fmt::Display) -> Error {
    Error::ModelLoad(format!("failed to {}: {}", step, e))
}

fn generation_error(e: candle_core::Error) -> Error {
    Error::Generation(e.to_string())
}
