// src/tools/dry_run.rs

use crate::tools::{Tool, ToolResult};
use std::process::Command;

/// Hands a command to `echo` instead of running it.
///
/// The command is passed as a single argument, never through a shell, so
/// pipes, redirections and substitutions in it stay inert text.
pub struct DryRunTool;

impl Tool for DryRunTool {
    fn name(&self) -> &str {
        "dry_run"
    }

    fn description(&self) -> &str {
        "Echoes a shell command instead of executing it."
    }

    fn execute(&self, input: &str) -> ToolResult {
        match Command::new("echo").arg(input).output() {
            Ok(out) if out.status.success() => {
                ToolResult::success(String::from_utf8_lossy(&out.stdout).trim_end_matches('\n'))
            }
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                ToolResult::failure(&format!("echo exited with {}: {}", out.status, stderr.trim()))
            }
            Err(e) => ToolResult::failure(&format!("Failed to run echo: {e}")),
        }
    }
}
