// src/validation/shell.rs

use regex::Regex;
use std::sync::LazyLock;

/// Start-of-step patterns that mark a plan step as a shell command, tried in order.
///
/// The first rule accepts any step that starts with a word character, so it
/// also matches ordinary prose. The later rules only matter for steps the
/// first one misses (for example `!pip install ...`).
pub const SHELL_COMMAND_PATTERNS: [&str; 10] = [
    r"^(sudo\s+)?\w+",
    r"^!",
    r"^pip\s+",
    r"^apt-get\s+",
    r"^git\s+",
    r"^ls",
    r"^cd",
    r"^mkdir",
    r"^rm",
    r"^echo",
];

static COMPILED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SHELL_COMMAND_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("shell command pattern must compile"))
        .collect()
});

/// The first pattern matching the start of `step`, if any.
pub fn matching_pattern(step: &str) -> Option<&'static str> {
    COMPILED
        .iter()
        .zip(SHELL_COMMAND_PATTERNS)
        .find(|(re, _)| re.is_match(step))
        .map(|(_, pattern)| pattern)
}

/// Heuristic: does this plan step look like a shell command?
pub fn is_shell_command(step: &str) -> bool {
    matching_pattern(step).is_some()
}
