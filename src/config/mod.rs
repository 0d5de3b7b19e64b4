// src/config/mod.rs

use crate::error::AgentResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Locations searched when no `--config` path is given.
pub const CONFIG_SEARCH_PATHS: [&str; 2] = ["plan-agent.toml", ".plan-agent/config.toml"];

/// Runtime settings for one agent invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Directory holding the fine-tuned model and tokenizer.
    pub model_path: PathBuf,
    /// Append-only JSON-lines trace.
    pub log_file: PathBuf,
    /// Local inference server generate endpoint.
    pub endpoint: String,
    /// Name the server knows the model by. Defaults to the model directory name.
    pub model_name: Option<String>,
    pub max_new_tokens: u32,
    pub require_gpu: bool,
    pub request_timeout_secs: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./tinyllama_finetuned"),
            log_file: PathBuf::from("logs/trace.jsonl"),
            endpoint: "http://localhost:11434/api/generate".into(),
            model_name: None,
            max_new_tokens: 200,
            require_gpu: true,
            request_timeout_secs: None,
        }
    }
}

impl AgentConfig {
    /// Parse a TOML config file. Keys that are absent keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> AgentResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load an explicit config file, or the first readable file from
    /// [`CONFIG_SEARCH_PATHS`], or the defaults.
    ///
    /// An explicit path that fails to load is an error; a searched path that
    /// fails to load is skipped with a warning.
    pub fn load_with_fallback(explicit: Option<&Path>) -> AgentResult<Self> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            tracing::info!("Loaded configuration from {}", path.display());
            return Ok(config);
        }

        for path in CONFIG_SEARCH_PATHS {
            if !Path::new(path).exists() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path);
                    return Ok(config);
                }
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", path, e);
                }
            }
        }

        tracing::debug!("Using default configuration");
        Ok(Self::default())
    }

    /// The identifier sent to the inference server.
    pub fn resolved_model_name(&self) -> String {
        if let Some(name) = &self.model_name {
            return name.clone();
        }
        self.model_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.model_path.display().to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
