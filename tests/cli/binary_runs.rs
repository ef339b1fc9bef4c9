//! Runs of the built binary
//!
//! Every run passes an explicit configuration file so a config file in the
//! user's config directory cannot change the outcome.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run_drainpipe(config: &NamedTempFile, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_drainpipe"))
        .arg("--config-file")
        .arg(config.path())
        .args(["--no-color", "--interval-ms", "2", "--sink-delay-ms", "1"])
        .args(extra)
        .output()
        .unwrap()
}

fn received(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_default_run_prints_transformed_messages_in_order() {
    let config = config_file("");
    let output = run_drainpipe(&config, &[]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let lines = received(&output);
    assert!(lines.len() >= 6, "stdout: {:?}", lines);
    for (n, line) in lines.iter().take(6).enumerate() {
        assert_eq!(line, &format!("Received Message: \"Transformed {}\"", n));
    }
    for line in &lines[6..] {
        assert!(
            line == "Received Message: \"Might be printed\""
                || line == "Received Message: \"Probably won't be printed \"",
            "unexpected line: {}",
            line
        );
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("main done"), "stderr: {}", stderr);
    assert!(stderr.contains("consumer done"), "stderr: {}", stderr);
}

#[test]
fn test_config_file_values_are_used() {
    let config = config_file("sentinel = \"2\"\nprefix = \"Out \"\nlate-messages = []\n");
    let output = run_drainpipe(&config, &[]);

    assert!(output.status.success());
    assert_eq!(
        received(&output),
        vec![
            "Received Message: \"Out 0\"",
            "Received Message: \"Out 1\"",
            "Received Message: \"Out 2\"",
        ]
    );
}

#[test]
fn test_command_line_overrides_config_file() {
    let config = config_file("sentinel = \"2\"\nlate-messages = []\n");
    let output = run_drainpipe(&config, &["--sentinel", "0"]);

    assert!(output.status.success());
    assert_eq!(received(&output), vec!["Received Message: \"Transformed 0\""]);
}

#[test]
fn test_json_log_format() {
    let config = config_file("late-messages = []\n");
    let output = run_drainpipe(&config, &["--log-format", "json", "--sentinel", "1"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().next().unwrap();
    let value: serde_json::Value = serde_json::from_str(first).unwrap();
    assert!(value.get("level").is_some());
    assert!(value.get("message").is_some());
}

#[test]
fn test_missing_config_file_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let output = Command::new(env!("CARGO_BIN_EXE_drainpipe"))
        .arg("--config-file")
        .arg(&missing)
        .arg("--no-color")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FATAL"), "stderr: {}", stderr);
    assert!(stderr.contains("does not exist"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_config_value_exits_with_error() {
    let config = config_file("interval-ms = \"fast\"\n");
    let output = run_drainpipe(&config, &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("interval-ms"), "stderr: {}", stderr);
}

#[test]
fn test_empty_sentinel_exits_with_error() {
    let config = config_file("");
    let output = run_drainpipe(&config, &["--sentinel", ""]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sentinel must not be empty"), "stderr: {}", stderr);
}

#[test]
fn test_version_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_drainpipe"))
        .arg("--version")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("drainpipe"));
}
