//! CLI module containing argument parsing and configuration loading

pub mod args;
pub mod config;

pub use args::Args;
pub use config::{ConfigError, FileConfig, FullPolicy, RunConfig};

#[cfg(test)]
mod tests;
