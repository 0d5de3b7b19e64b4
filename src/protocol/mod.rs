// src/protocol/mod.rs

pub mod planner;
pub use planner::{ModelPlanner, Planner};

use crate::tools::ToolResult;

/// Marker that separates the prompt from the model's answer.
pub const RESPONSE_MARKER: &str = "### Response:\n";

/// Single step returned when no plan can be extracted.
pub const NO_PLAN_SENTINEL: &str = "Could not generate a plan.";

/// Wrap an instruction in the template the model was fine-tuned on.
pub fn format_prompt(instruction: &str) -> String {
    format!(
        "### Instruction:\nGenerate a step-by-step plan for the following task: {instruction}\n\n{RESPONSE_MARKER}"
    )
}

/// Split text into trimmed, non-blank lines, keeping their order.
pub fn split_steps(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ordered steps produced by the model for one instruction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<String>,
}

impl Plan {
    /// Extract the plan from a full decoded sequence (prompt included).
    pub fn from_generation(response: &str) -> Self {
        match response.find(RESPONSE_MARKER) {
            Some(start) => Plan {
                steps: split_steps(response[start + RESPONSE_MARKER.len()..].trim()),
            },
            None => Plan::sentinel(),
        }
    }

    pub fn sentinel() -> Self {
        Plan {
            steps: vec![NO_PLAN_SENTINEL.into()],
        }
    }

    pub fn first_step(&self) -> Option<&str> {
        self.steps.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// What one agent run produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub plan: Plan,
    /// Present only when the first step was dry-run.
    pub dry_run: Option<ToolResult>,
}
