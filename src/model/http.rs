// src/model/http.rs

use crate::config::AgentConfig;
use crate::error::{AgentError, AgentResult};
use crate::model::{LanguageModel, ModelLoader, ModelManifest};
use reqwest::blocking::Client;
use serde_json::{Value, json};
use std::path::Path;
use std::time::Duration;

/// A fine-tuned model served by a local inference server (Ollama-style `/api/generate`).
pub struct HttpModel {
    client: Client,
    endpoint: String,
    name: String,
}

impl LanguageModel for HttpModel {
    fn generate(&self, prompt: &str, max_new_tokens: u32) -> AgentResult<String> {
        // raw: the prompt already carries the instruction template.
        let payload = json!({
            "model": self.name,
            "prompt": prompt,
            "stream": false,
            "raw": true,
            "options": { "num_predict": max_new_tokens }
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .map_err(|err| AgentError::Generation(format!("Request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let reason = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|json| json.get("error").and_then(|v| v.as_str()).map(str::to_string))
                .unwrap_or_else(|| body.trim().to_string());
            return Err(AgentError::Generation(format!("Server returned {status}: {reason}")));
        }

        let json = response
            .json::<Value>()
            .map_err(|err| AgentError::Generation(format!("Failed to parse JSON: {err}")))?;

        match json.get("response").and_then(|v| v.as_str()) {
            Some(text) => Ok(format!("{prompt}{text}")),
            None => Err(AgentError::Generation(
                "LLM response missing 'response' field".into(),
            )),
        }
    }
}

/// Validates the model directory and binds it to the inference endpoint.
#[derive(Debug, Clone)]
pub struct HttpModelLoader {
    pub endpoint: String,
    pub model_name: String,
    pub timeout: Option<Duration>,
}

impl HttpModelLoader {
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            model_name: config.resolved_model_name(),
            timeout: config.request_timeout(),
        }
    }
}

impl ModelLoader for HttpModelLoader {
    type Model = HttpModel;

    fn load(&self, path: &Path) -> AgentResult<HttpModel> {
        let manifest = ModelManifest::read(path)?;
        tracing::info!(
            model = %self.model_name,
            weights = %manifest.summary(),
            tokenizer = %manifest.tokenizer.display(),
            "model directory validated"
        );

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| AgentError::model_load(path, format!("cannot build HTTP client: {e}")))?;

        Ok(HttpModel {
            client,
            endpoint: self.endpoint.clone(),
            name: self.model_name.clone(),
        })
    }
}
