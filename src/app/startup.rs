//! Application startup: arguments, configuration, logging, run

use super::cli::{Args, ConfigError, FileConfig, RunConfig};
use super::run::{run, RunSummary};
use crate::core::error_handling::{fatal_message, log_error_with_context};
use crate::core::logging::init_logging;
use clap::Parser;
use colored::*;
use std::io::IsTerminal;

/// Run the application and return the process exit code
pub fn startup() -> i32 {
    let args = Args::parse();

    // Logging is configured from the resolved config, so report these directly
    let file_config = match FileConfig::discover(args.config_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", config_error_line(&e, "Failed to load configuration"));
            return 1;
        }
    };
    let config = match RunConfig::resolve(&args, &file_config, std::io::stderr().is_terminal()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", config_error_line(&e, "Invalid configuration"));
            return 2;
        }
    };

    colored::control::set_override(config.color);
    if let Err(e) = init_logging(
        Some(config.log_level.as_str()),
        Some(config.log_format.as_str()),
        config.log_file.as_deref(),
        config.color,
    ) {
        eprintln!("Error: failed to initialise logging: {}", e);
        return 1;
    }

    log::debug!("Resolved configuration: {:#?}", config);

    match run(&config) {
        Ok(summary) => {
            print_summary(&summary);
            0
        }
        Err(e) => {
            log_error_with_context(&e, "Producer/consumer run failed");
            1
        }
    }
}

/// Line shown for a configuration failure before logging is up
///
/// Actionable errors print their own message; anything else is prefixed
/// with `operation` and keeps the full error text.
fn config_error_line(error: &ConfigError, operation: &str) -> String {
    let context = format!("{}: {}", operation, error);
    format!("Error: {}", fatal_message(error, &context))
}

fn print_summary(summary: &RunSummary) {
    let stats = &summary.stats;
    eprintln!("{}", "=== Queue Summary ===".bold());
    eprintln!("attempted: {}", summary.attempted);
    eprintln!("accepted:  {}", stats.accepted.to_string().green());
    eprintln!("rejected:  {}", stats.rejected.to_string().yellow());
    eprintln!("dropped:   {}", summary.dropped.to_string().yellow());
    eprintln!("written:   {}", stats.written.to_string().green());
    if stats.failed > 0 {
        eprintln!("failed:    {}", stats.failed.to_string().red().bold());
    }
    eprintln!("elapsed:   {:?}", summary.elapsed);
}
