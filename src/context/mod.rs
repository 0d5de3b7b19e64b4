// src/context/mod.rs

use crate::error::AgentResult;
use crate::tools::{DryRunTool, Tool};
use crate::trace::{Details, Trace};
use std::collections::HashMap;

/// Runtime context for an agent: the trace sink and the registered tools.
pub struct Context<T: Trace> {
    pub dry_run: bool,
    pub tools: HashMap<String, Box<dyn Tool + Send + Sync>>,
    pub trace: T,
}

impl<T: Trace> Context<T> {
    pub fn new(trace: T) -> Self {
        Self {
            dry_run: false,
            tools: HashMap::new(),
            trace,
        }
    }

    /// Context with the dry-run executor registered and dry-run mode on.
    pub fn dry_run(trace: T) -> Self {
        Self::new(trace).register_tool(DryRunTool).enable_dry_run()
    }

    pub fn register_tool<U: Tool + Send + Sync + 'static>(mut self, tool: U) -> Self {
        self.tools.insert(tool.name().into(), Box::new(tool));
        self
    }

    pub fn enable_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    pub fn get_tool(&self, name: &str) -> Option<&(dyn Tool + Send + Sync)> {
        self.tools.get(name).map(|boxed| boxed.as_ref())
    }

    pub fn log(&mut self, step: &str, details: impl Into<Details>) -> AgentResult<()> {
        self.trace.log_step(step, details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::InMemoryTrace;

    #[test]
    fn dry_run_context_registers_executor() {
        let context = Context::dry_run(InMemoryTrace::new());
        assert!(context.dry_run);
        assert!(context.get_tool("dry_run").is_some());
        assert!(context.get_tool("run_command").is_none());
    }

    #[test]
    fn log_forwards_to_trace() {
        let mut context = Context::new(InMemoryTrace::new());
        context.log("Plan generated", vec!["ls".to_string()]).unwrap();
        assert_eq!(context.trace.entries[0].details, Details::Lines(vec!["ls".into()]));
    }
}
