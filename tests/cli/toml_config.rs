//! TOML configuration file tests

use crate::common::{run_blockqueue, stderr_of};
use tempfile::TempDir;

#[test]
fn test_config_file_supplies_values() {
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("from_config.log");
    let config_path = dir.path().join("blockqueue.toml");
    std::fs::write(
        &config_path,
        format!(
            "producers = 2\nlines = 10\ncapacity = 64\non-full = \"retry\"\noutput = {:?}\n",
            output_path.to_str().unwrap()
        ),
    )
    .unwrap();

    let output = run_blockqueue(&["--no-color", "--config-file", config_path.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let content = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(content.lines().count(), 20);
}

#[test]
fn test_cli_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("override.log");
    let config_path = dir.path().join("blockqueue.toml");
    std::fs::write(&config_path, "producers = 5\nlines = 10\non-full = \"retry\"\n").unwrap();

    let output = run_blockqueue(&[
        "--no-color",
        "--config-file",
        config_path.to_str().unwrap(),
        "--producers",
        "1",
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let content = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(content.lines().count(), 10);
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");

    let output = run_blockqueue(&["--config-file", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("does not exist"));
}

#[test]
fn test_malformed_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("bad.toml");
    std::fs::write(&config_path, "capacity = [not valid").unwrap();

    let output = run_blockqueue(&["--config-file", config_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Error parsing configuration file"));
}
