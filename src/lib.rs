//! Instruction-to-plan CLI agent.
//!
//! A fine-tuned causal language model turns one natural-language
//! instruction into a step-by-step plan. Every step of the run is appended
//! to a JSON-lines trace, and if the first plan step looks like a shell
//! command it is handed to `echo` instead of being executed.

pub mod agent;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod model;
pub mod protocol;
pub mod tools;
pub mod trace;
pub mod validation;

pub use error::{AgentError, AgentResult};
