//! Common test utilities for running the blockqueue binary

use std::process::{Command, Output};

/// Run the binary with `args`, isolated from any user configuration file
pub fn run_blockqueue(args: &[&str]) -> Output {
    let isolated_config = tempfile::TempDir::new().expect("temp config dir");
    Command::new(env!("CARGO_BIN_EXE_blockqueue"))
        .args(args)
        .env("XDG_CONFIG_HOME", isolated_config.path())
        .env("HOME", isolated_config.path())
        .output()
        .expect("failed to run blockqueue binary")
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
