// src/model/mod.rs

use crate::error::{AgentError, AgentResult};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub mod http;
pub use http::{HttpModel, HttpModelLoader};

const ADAPTER_CONFIG: &str = "adapter_config.json";
const MODEL_CONFIG: &str = "config.json";
const TOKENIZER_FILES: [&str; 3] = ["tokenizer.json", "tokenizer_config.json", "tokenizer.model"];

/// A causal language model that can continue a prompt.
pub trait LanguageModel {
    /// Returns the full decoded sequence: the prompt followed by the continuation.
    fn generate(&self, prompt: &str, max_new_tokens: u32) -> AgentResult<String>;
}

/// Loads a model from a local directory.
pub trait ModelLoader {
    type Model: LanguageModel;

    fn load(&self, path: &Path) -> AgentResult<Self::Model>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Weights {
    /// A PEFT adapter layered over a base model.
    Adapter { base_model: Option<String> },
    /// A standalone (or already merged) model.
    Merged,
}

/// What was found in a fine-tuned model directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelManifest {
    pub path: PathBuf,
    pub weights: Weights,
    pub tokenizer: PathBuf,
}

impl ModelManifest {
    /// Inspect `dir` for model weights config and a tokenizer.
    pub fn read(dir: &Path) -> AgentResult<Self> {
        if !dir.is_dir() {
            return Err(AgentError::model_load(dir, "model directory does not exist"));
        }

        let adapter = dir.join(ADAPTER_CONFIG);
        let weights = if adapter.is_file() {
            let raw = fs::read_to_string(&adapter)
                .map_err(|e| AgentError::model_load(dir, format!("cannot read {ADAPTER_CONFIG}: {e}")))?;
            let json: Value = serde_json::from_str(&raw)
                .map_err(|e| AgentError::model_load(dir, format!("invalid {ADAPTER_CONFIG}: {e}")))?;
            Weights::Adapter {
                base_model: json
                    .get("base_model_name_or_path")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            }
        } else if dir.join(MODEL_CONFIG).is_file() {
            Weights::Merged
        } else {
            return Err(AgentError::model_load(
                dir,
                format!("neither {ADAPTER_CONFIG} nor {MODEL_CONFIG} found"),
            ));
        };

        let tokenizer = TOKENIZER_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
            .ok_or_else(|| AgentError::model_load(dir, "no tokenizer files found"))?;

        Ok(Self {
            path: dir.to_path_buf(),
            weights,
            tokenizer,
        })
    }

    pub fn summary(&self) -> String {
        match &self.weights {
            Weights::Adapter {
                base_model: Some(base),
            } => format!("adapter over {base}"),
            Weights::Adapter { base_model: None } => "adapter".into(),
            Weights::Merged => "merged model".into(),
        }
    }
}
