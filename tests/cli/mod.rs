//! CLI Integration Test Modules

pub mod run_output;
pub mod toml_config;
pub mod validation;
