//! Tests for configuration file loading and run configuration resolution

use crate::app::cli::args::Args;
use crate::app::cli::config::{ConfigError, FileConfig, FullPolicy, RunConfig};
use crate::core::error_handling::ContextualError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

fn file_config(contents: &str) -> FileConfig {
    FileConfig::from_toml_str(contents, Path::new("test.toml")).unwrap()
}

#[test]
fn test_defaults() {
    let config = RunConfig::resolve(&Args::default(), &FileConfig::default(), false).unwrap();
    assert_eq!(config, RunConfig::default());
    assert_eq!(config.capacity, 1000);
    assert_eq!(config.on_full, FullPolicy::Drop);
    assert_eq!(config.output, None);
}

#[test]
fn test_file_values_apply() {
    let file = file_config(
        r#"
        capacity = 16
        producers = 2
        lines = 50
        pop-timeout-ms = 20
        flush-timeout-ms = 1000
        on-full = "retry"
        output = "lines.log"
        color = true
        log-level = "debug"
        log-format = "json"
        log-file = "queue.log"
        "#,
    );

    let config = RunConfig::resolve(&Args::default(), &file, false).unwrap();
    assert_eq!(config.capacity, 16);
    assert_eq!(config.producers, 2);
    assert_eq!(config.lines_per_producer, 50);
    assert_eq!(config.pop_timeout, Duration::from_millis(20));
    assert_eq!(config.flush_timeout, Duration::from_secs(1));
    assert_eq!(config.on_full, FullPolicy::Retry);
    assert_eq!(config.output, Some(PathBuf::from("lines.log")));
    assert!(config.color);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.log_format, "json");
    assert_eq!(config.log_file.as_deref(), Some("queue.log"));
}

#[test]
fn test_cli_overrides_file() {
    let file = file_config("capacity = 16\non-full = \"retry\"\ncolor = true\n");
    let args = Args {
        capacity: Some(4),
        on_full: Some("drop".to_string()),
        no_color: true,
        ..Args::default()
    };

    let config = RunConfig::resolve(&args, &file, true).unwrap();
    assert_eq!(config.capacity, 4);
    assert_eq!(config.on_full, FullPolicy::Drop);
    assert!(!config.color);
}

#[test]
fn test_color_falls_back_to_terminal_detection() {
    let config = RunConfig::resolve(&Args::default(), &FileConfig::default(), true).unwrap();
    assert!(config.color);
}

#[test]
fn test_non_positive_capacity_is_invalid() {
    for contents in ["capacity = 0", "capacity = -5"] {
        let result = RunConfig::resolve(&Args::default(), &file_config(contents), false);
        match result {
            Err(err @ ConfigError::Invalid { .. }) => {
                assert!(err.is_user_actionable());
                assert!(err.user_message().unwrap().contains("capacity"));
            }
            other => panic!("expected invalid capacity, got {:?}", other),
        }
    }

    let args = Args {
        capacity: Some(0),
        ..Args::default()
    };
    assert!(RunConfig::resolve(&args, &FileConfig::default(), false).is_err());
}

#[test]
fn test_huge_cli_counts_are_kept() {
    let args = Args {
        capacity: Some(usize::MAX),
        producers: Some(usize::MAX),
        ..Args::default()
    };
    let config = RunConfig::resolve(&args, &FileConfig::default(), false).unwrap();
    assert_eq!(config.capacity, usize::MAX);
    assert_eq!(config.producers, usize::MAX);

    let args = Args {
        producers: Some(0),
        ..Args::default()
    };
    match RunConfig::resolve(&args, &FileConfig::default(), false) {
        Err(err) => assert_eq!(
            err.to_string(),
            "Value for 'producers' must be greater than 0 (got 0)"
        ),
        Ok(config) => panic!("expected invalid producers, got {:?}", config),
    }
}

#[test]
fn test_negative_timeout_is_invalid() {
    let result = RunConfig::resolve(&Args::default(), &file_config("pop-timeout-ms = -1"), false);
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
fn test_invalid_log_values_from_file() {
    let result = RunConfig::resolve(&Args::default(), &file_config("log-level = \"loud\""), false);
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));

    let result = RunConfig::resolve(&Args::default(), &file_config("log-format = \"xml\""), false);
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));

    let result = RunConfig::resolve(&Args::default(), &file_config("on-full = \"block\""), false);
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
fn test_magic_values_disable_outputs() {
    let file = file_config("output = \"-\"\nlog-file = \"none\"\n");
    let config = RunConfig::resolve(&Args::default(), &file, false).unwrap();
    assert_eq!(config.output, None);
    assert_eq!(config.log_file, None);
}

#[test]
fn test_unknown_keys_are_rejected() {
    let result = FileConfig::from_toml_str("capacty = 3", Path::new("typo.toml"));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_discover_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blockqueue.toml");
    std::fs::write(&path, "capacity = 7\n").unwrap();

    let file = FileConfig::discover(Some(path.as_path())).unwrap();
    assert_eq!(file.capacity, Some(7));
}

#[test]
fn test_discover_missing_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    let result = FileConfig::discover(Some(path.as_path()));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn test_full_policy_parsing() {
    assert_eq!("drop".parse::<FullPolicy>().unwrap(), FullPolicy::Drop);
    assert_eq!("RETRY".parse::<FullPolicy>().unwrap(), FullPolicy::Retry);
    assert!("block".parse::<FullPolicy>().is_err());
}
