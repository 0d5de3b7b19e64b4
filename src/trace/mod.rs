// src/trace/mod.rs

use crate::error::AgentResult;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Payload of a trace entry: a single message or a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Details {
    Text(String),
    Lines(Vec<String>),
}

impl From<&str> for Details {
    fn from(text: &str) -> Self {
        Details::Text(text.to_string())
    }
}

impl From<String> for Details {
    fn from(text: String) -> Self {
        Details::Text(text)
    }
}

impl From<Vec<String>> for Details {
    fn from(lines: Vec<String>) -> Self {
        Details::Lines(lines)
    }
}

impl From<&[String]> for Details {
    fn from(lines: &[String]) -> Self {
        Details::Lines(lines.to_vec())
    }
}

/// One line of the trace log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub timestamp: String,
    pub step: String,
    pub details: Details,
}

impl TraceEntry {
    /// Stamp a new entry with the current local time.
    pub fn now(step: &str, details: Details) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            step: step.to_string(),
            details,
        }
    }
}

/// A sink that records each step of an agent run.
pub trait Trace {
    fn log_step(&mut self, step: &str, details: Details) -> AgentResult<()>;
    fn read_all(&self) -> AgentResult<Vec<TraceEntry>>;
}

/// Append-only JSON-lines file. The file is reopened for every entry.
#[derive(Debug, Clone)]
pub struct JsonlTrace {
    path: PathBuf,
}

impl JsonlTrace {
    /// Create the log directory if needed. The file itself appears on first write.
    pub fn create<P: AsRef<Path>>(path: P) -> AgentResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }
}

impl Trace for JsonlTrace {
    fn log_step(&mut self, step: &str, details: Details) -> AgentResult<()> {
        let entry = TraceEntry::now(step, details);
        let mut line = serde_json::to_vec(&entry)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;
        tracing::debug!(step, path = %self.path.display(), "trace entry appended");
        Ok(())
    }

    fn read_all(&self) -> AgentResult<Vec<TraceEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(fs::File::open(&self.path)?);
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(&line)?);
        }
        Ok(entries)
    }
}

/// Vector-backed trace, for embedding and tests.
#[derive(Default, Debug)]
pub struct InMemoryTrace {
    pub entries: Vec<TraceEntry>,
}

impl InMemoryTrace {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Step names in the order they were logged.
    pub fn steps(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.step.as_str()).collect()
    }
}

impl Trace for InMemoryTrace {
    fn log_step(&mut self, step: &str, details: Details) -> AgentResult<()> {
        self.entries.push(TraceEntry::now(step, details));
        Ok(())
    }

    fn read_all(&self) -> AgentResult<Vec<TraceEntry>> {
        Ok(self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn creates_missing_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("trace.jsonl");

        let trace = JsonlTrace::create(&path).unwrap();
        assert!(dir.path().join("logs").is_dir());
        assert!(!path.exists());
        assert!(trace.read_all().unwrap().is_empty());
    }

    #[test]
    fn each_call_appends_one_json_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/trace.jsonl");
        let mut trace = JsonlTrace::create(&path).unwrap();

        trace.log_step("Instruction received", "list files".into()).unwrap();
        trace
            .log_step(
                "Plan generated",
                vec!["ls -la".to_string(), "cat README.md".to_string()].into(),
            )
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.ends_with('\n'));
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["step"], "Instruction received");
        assert_eq!(first["details"], "list files");
        assert!(first["timestamp"].is_string());

        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["details"][0], "ls -la");
        assert_eq!(second["details"][1], "cat README.md");
    }

    #[test]
    fn appends_to_existing_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.jsonl");
        fs::write(&path, "{\"timestamp\":\"t\",\"step\":\"earlier\",\"details\":\"x\"}\n").unwrap();

        let mut trace = JsonlTrace::create(&path).unwrap();
        trace.log_step("later", "y".into()).unwrap();

        let entries = trace.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].step, "earlier");
        assert_eq!(entries[1].details, Details::Text("y".into()));
    }

    #[test]
    fn timestamp_is_iso8601() {
        let entry = TraceEntry::now("step", "x".into());
        assert!(chrono::NaiveDateTime::parse_from_str(&entry.timestamp, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }

    #[test]
    fn in_memory_trace_keeps_order() {
        let mut trace = InMemoryTrace::new();
        trace.log_step("a", "1".into()).unwrap();
        trace.log_step("b", "2".into()).unwrap();
        assert_eq!(trace.steps(), vec!["a", "b"]);
    }
}
