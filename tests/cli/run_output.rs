//! End-to-end runs writing lines through the queue into a file

use crate::common::{run_blockqueue, stderr_of};
use tempfile::TempDir;

#[test]
fn test_retry_run_writes_all_lines() {
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("lines.log");

    let output = run_blockqueue(&[
        "--producers",
        "3",
        "--lines",
        "100",
        "--capacity",
        "4",
        "--on-full",
        "retry",
        "--pop-timeout-ms",
        "5",
        "--no-color",
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let content = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(content.lines().count(), 300);
    assert!(content.contains("producer-0 line-0"));
    assert!(content.contains("producer-2 line-99"));

    let stderr = stderr_of(&output);
    assert!(stderr.contains("=== Queue Summary ==="));
    assert!(stderr.contains("written:   300"));
}

#[test]
fn test_drop_run_reports_dropped_lines() {
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("lines.log");

    let output = run_blockqueue(&[
        "--producers",
        "4",
        "--lines",
        "200",
        "--capacity",
        "1",
        "--on-full",
        "drop",
        "--no-color",
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let written = std::fs::read_to_string(&output_path).unwrap().lines().count();
    assert!(written <= 800);
    assert!(stderr_of(&output).contains("dropped:"));
}

#[test]
fn test_output_to_stdout() {
    let output = run_blockqueue(&["--producers", "1", "--lines", "3", "--no-color", "--output", "-"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["producer-0 line-0", "producer-0 line-1", "producer-0 line-2"]
    );
}
