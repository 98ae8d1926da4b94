//! TOML configuration file parsing and run configuration resolution
//!
//! Values are layered: command line flags override the configuration file,
//! which overrides the built-in defaults. The file is looked up at
//! `<config dir>/Blockqueue/blockqueue.toml` unless one is given explicitly.
//!
//! ```toml
//! capacity = 256
//! producers = 8
//! lines = 10000
//! pop-timeout-ms = 50
//! on-full = "retry"
//! output = "/var/log/demo.log"
//! log-level = "debug"
//! ```

use super::args::Args;
use crate::core::error_handling::ContextualError;
use crate::core::logging::{LOG_FORMATS, LOG_LEVELS};
use crate::queue::DEFAULT_CAPACITY;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {path}")]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    Invalid { key: String, message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::Invalid { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// What a producer does with a line the queue rejected as full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullPolicy {
    /// Count the line as dropped and move on
    #[default]
    Drop,
    /// Yield and push again until accepted
    Retry,
}

impl FromStr for FullPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "drop" => Ok(FullPolicy::Drop),
            "retry" => Ok(FullPolicy::Retry),
            other => Err(invalid(
                "on-full",
                format!("'{}' is not a valid full-queue policy (drop, retry)", other),
            )),
        }
    }
}

/// Raw contents of a configuration file
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub capacity: Option<i64>,
    pub producers: Option<i64>,
    pub lines: Option<i64>,
    pub pop_timeout_ms: Option<i64>,
    pub flush_timeout_ms: Option<i64>,
    pub on_full: Option<String>,
    pub output: Option<PathBuf>,
    pub color: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<String>,
}

impl FileConfig {
    pub fn from_toml_str(contents: &str, path: &Path) -> ConfigResult<Self> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Load the explicit file, or the default one if it exists
    ///
    /// An explicit path must exist; a missing default file yields an empty config.
    pub fn discover(explicit: Option<&Path>) -> ConfigResult<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound {
                        path: path.to_path_buf(),
                    });
                }
                Self::load(path)
            }
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    log::debug!("Using default configuration file {}", path.display());
                    Self::load(&path)
                }
                _ => Ok(Self::default()),
            },
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Blockqueue").join("blockqueue.toml"))
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub capacity: usize,
    pub producers: usize,
    pub lines_per_producer: usize,
    pub pop_timeout: Duration,
    pub flush_timeout: Duration,
    pub on_full: FullPolicy,
    /// `None` writes to stdout
    pub output: Option<PathBuf>,
    pub color: bool,
    pub log_level: String,
    pub log_format: String,
    pub log_file: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            producers: 4,
            lines_per_producer: 1000,
            pop_timeout: Duration::from_millis(100),
            flush_timeout: Duration::from_secs(5),
            on_full: FullPolicy::Drop,
            output: None,
            color: false,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            log_file: None,
        }
    }
}

impl RunConfig {
    /// Layer `args` over `file` over the defaults and validate the result
    ///
    /// `is_terminal` decides colour when neither source forces it.
    pub fn resolve(args: &Args, file: &FileConfig, is_terminal: bool) -> ConfigResult<Self> {
        let defaults = Self::default();

        let capacity = match args.capacity {
            Some(value) => positive_count("capacity", value)?,
            None => optional_positive("capacity", file.capacity)?.unwrap_or(defaults.capacity),
        };
        let producers = match args.producers {
            Some(value) => positive_count("producers", value)?,
            None => optional_positive("producers", file.producers)?.unwrap_or(defaults.producers),
        };
        let lines_per_producer = match args.lines {
            Some(value) => value,
            None => optional_non_negative("lines", file.lines)?.unwrap_or(defaults.lines_per_producer),
        };
        let pop_timeout = match args.pop_timeout_ms {
            Some(ms) => Duration::from_millis(ms),
            None => optional_non_negative("pop-timeout-ms", file.pop_timeout_ms)?
                .map(|ms| Duration::from_millis(ms as u64))
                .unwrap_or(defaults.pop_timeout),
        };
        let flush_timeout = match args.flush_timeout_ms {
            Some(ms) => Duration::from_millis(ms),
            None => optional_non_negative("flush-timeout-ms", file.flush_timeout_ms)?
                .map(|ms| Duration::from_millis(ms as u64))
                .unwrap_or(defaults.flush_timeout),
        };
        let on_full = match args.on_full.as_deref().or(file.on_full.as_deref()) {
            Some(value) => value.parse::<FullPolicy>()?,
            None => defaults.on_full,
        };

        let output = args
            .output
            .clone()
            .or_else(|| file.output.clone())
            .filter(|path| path.as_os_str() != "-");

        let color = args
            .color_override()
            .or(file.color)
            .unwrap_or(is_terminal);

        let log_level = args
            .log_level
            .clone()
            .or_else(|| file.log_level.clone())
            .unwrap_or(defaults.log_level);
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(invalid(
                "log-level",
                format!("'{}' is not a valid log level ({})", log_level, LOG_LEVELS.join(", ")),
            ));
        }

        let log_format = args
            .log_format
            .clone()
            .or_else(|| file.log_format.clone())
            .unwrap_or(defaults.log_format);
        if !LOG_FORMATS.contains(&log_format.as_str()) {
            return Err(invalid(
                "log-format",
                format!("'{}' is not a valid log format ({})", log_format, LOG_FORMATS.join(", ")),
            ));
        }

        // Magic values "none" and "-" disable file logging
        let log_file = args
            .log_file
            .clone()
            .or_else(|| file.log_file.clone())
            .filter(|f| !f.eq_ignore_ascii_case("none") && f != "-");

        Ok(Self {
            capacity,
            producers,
            lines_per_producer,
            pop_timeout,
            flush_timeout,
            on_full,
            output,
            color,
            log_level,
            log_format,
            log_file,
        })
    }
}

fn invalid(key: &str, message: String) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        message,
    }
}

/// Validate a value that must be greater than zero
fn positive(key: &str, value: i64) -> ConfigResult<usize> {
    if value <= 0 {
        return Err(invalid(
            key,
            format!("Value for '{}' must be greater than 0 (got {})", key, value),
        ));
    }
    usize::try_from(value).map_err(|_| invalid(key, format!("Value for '{}' is too large", key)))
}

/// Validate a command line count, which is already unsigned
fn positive_count(key: &str, value: usize) -> ConfigResult<usize> {
    if value == 0 {
        return Err(invalid(
            key,
            format!("Value for '{}' must be greater than 0 (got 0)", key),
        ));
    }
    Ok(value)
}

fn optional_positive(key: &str, value: Option<i64>) -> ConfigResult<Option<usize>> {
    value.map(|v| positive(key, v)).transpose()
}

fn optional_non_negative(key: &str, value: Option<i64>) -> ConfigResult<Option<usize>> {
    value
        .map(|v| {
            usize::try_from(v).map_err(|_| {
                invalid(key, format!("Value for '{}' must not be negative (got {})", key, v))
            })
        })
        .transpose()
}
