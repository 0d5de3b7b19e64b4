// src/validation/mod.rs

pub mod shell;
pub use shell::{SHELL_COMMAND_PATTERNS, is_shell_command, matching_pattern};
