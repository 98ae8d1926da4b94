//! Command line arguments for the blockqueue demo
//!
//! Every option is optional so that values from the TOML configuration file
//! and built-in defaults can fill the gaps (see [`super::config`]).

use crate::core::logging::{LOG_FORMATS, LOG_LEVELS};
use clap::Parser;
use std::path::PathBuf;

/// Global arguments structure with all command-line options
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "blockqueue")]
#[command(about = "Push lines from producer threads through a bounded blocking queue into a writer")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Maximum number of lines buffered between producers and the writer
    #[arg(short = 'c', long = "capacity", value_name = "N")]
    pub capacity: Option<usize>,

    /// Number of producer threads
    #[arg(short = 'p', long = "producers", value_name = "N")]
    pub producers: Option<usize>,

    /// Lines emitted by each producer
    #[arg(short = 'n', long = "lines", value_name = "N")]
    pub lines: Option<usize>,

    /// How long the writer waits for a line before flushing
    #[arg(long = "pop-timeout-ms", value_name = "MS")]
    pub pop_timeout_ms: Option<u64>,

    /// How long to wait for the final flush to be confirmed
    #[arg(long = "flush-timeout-ms", value_name = "MS")]
    pub flush_timeout_ms: Option<u64>,

    /// What producers do when the queue is full
    #[arg(long = "on-full", value_name = "POLICY", value_parser = ["drop", "retry"])]
    pub on_full: Option<String>,

    /// Output file for the written lines ('-' for stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", conflicts_with = "color")]
    pub no_color: bool,

    /// Log level
    #[arg(long = "log-level", value_name = "LEVEL", value_parser = LOG_LEVELS)]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_parser = LOG_FORMATS)]
    pub log_format: Option<String>,
}

impl Args {
    /// Color choice from the flags: `Some` when forced either way
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }
}
