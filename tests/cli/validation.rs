//! Argument validation and error handling tests

use crate::common::{run_blockqueue, stderr_of};
use tempfile::TempDir;

#[test]
fn test_zero_capacity_is_rejected() {
    let output = run_blockqueue(&["--capacity", "0", "--lines", "1"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("must be greater than 0"));
}

#[test]
fn test_negative_capacity_in_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("negative.toml");
    std::fs::write(&config_path, "capacity = -10\n").unwrap();

    let output = run_blockqueue(&["--config-file", config_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("capacity"));
}

#[test]
fn test_unknown_policy_is_rejected_by_clap() {
    let output = run_blockqueue(&["--on-full", "block"]);
    assert!(!output.status.success());
}

#[test]
fn test_unwritable_output_fails() {
    let dir = TempDir::new().unwrap();
    let bad_path = dir.path().join("no_such_dir").join("out.log");

    let output = run_blockqueue(&["--lines", "1", "--no-color", "--output", bad_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("FATAL"));
}
