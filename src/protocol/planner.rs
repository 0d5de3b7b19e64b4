// src/protocol/planner.rs

use crate::model::LanguageModel;
use crate::protocol::{Plan, format_prompt};

/// Trait for generating a Plan from a natural-language instruction.
pub trait Planner {
    fn generate_plan(&self, instruction: &str) -> Plan;
}

/// Prompts a fine-tuned language model once and parses its answer.
pub struct ModelPlanner<M: LanguageModel> {
    model: M,
    max_new_tokens: u32,
}

impl<M: LanguageModel> ModelPlanner<M> {
    pub fn new(model: M, max_new_tokens: u32) -> Self {
        Self {
            model,
            max_new_tokens,
        }
    }
}

impl<M: LanguageModel> Planner for ModelPlanner<M> {
    fn generate_plan(&self, instruction: &str) -> Plan {
        let prompt = format_prompt(instruction);

        match self.model.generate(&prompt, self.max_new_tokens) {
            Ok(response) => {
                tracing::debug!(chars = response.len(), "model response received");
                Plan::from_generation(&response)
            }
            Err(e) => {
                tracing::warn!("plan generation failed: {e}");
                Plan::sentinel()
            }
        }
    }
}
