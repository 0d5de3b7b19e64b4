//! Exit status and trace output of the `plan-agent` binary.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;

fn trace_lines(root: &Path) -> Vec<Value> {
    let raw = fs::read_to_string(root.join("logs/trace.jsonl")).unwrap();
    raw.lines().map(|l| serde_json::from_str(l).unwrap()).collect()
}

fn plan_agent(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("plan-agent").expect("bin");
    cmd.current_dir(root).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_gpu_exits_with_status_one_before_loading() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    plan_agent(root)
        .env("CUDA_VISIBLE_DEVICES", "-1")
        .arg("list files")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CUDA is not available."))
        .stdout(predicate::str::contains("Loading model").not());

    let entries = trace_lines(root);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["step"], "Instruction received");
    assert_eq!(entries[0]["details"], "list files");
    assert_eq!(entries[1]["step"], "CUDA not available");
}

#[test]
fn missing_model_directory_exits_with_status_one() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    plan_agent(root)
        .args(["--allow-cpu", "list files"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Loading model from ./tinyllama_finetuned..."))
        .stdout(predicate::str::contains("Error loading model or tokenizer:"))
        .stderr(predicate::function(|err: &str| err.matches("ERROR").count() == 1));

    let entries = trace_lines(root);
    let last = entries.last().unwrap();
    assert_eq!(last["step"], "Model loading failed");
    assert!(last["details"].as_str().unwrap().starts_with("Error: "));
}

#[test]
fn missing_instruction_is_a_usage_error() {
    let tmp = tempfile::tempdir().unwrap();
    plan_agent(tmp.path()).assert().code(2);
    assert!(!tmp.path().join("logs").exists());
}
