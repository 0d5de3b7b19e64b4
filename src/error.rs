// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can stop an agent run.
#[derive(Debug, Error)]
pub enum AgentError {
    /// No CUDA-capable device was found.
    #[error("CUDA is not available")]
    GpuUnavailable,

    /// The fine-tuned model or its tokenizer could not be loaded.
    #[error("{reason} (model path: {})", path.display())]
    ModelLoad { path: PathBuf, reason: String },

    /// The inference backend failed to produce text.
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AgentError {
    pub fn model_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        AgentError::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for agent operations
pub type AgentResult<T> = Result<T, AgentError>;
