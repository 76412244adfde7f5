//! Logger setup for the terminal client.
//!
//! The default destination is a file: the terminal belongs to the prompt.

use std::fs::File;
use std::path::Path;

use clap::ValueEnum;
use log::LevelFilter;
use serde::Deserialize;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Overrides the log level (`error` .. `trace`).
pub const LEVEL_ENV: &str = "STUDIO_LOG";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogDestination {
    /// Write to the log file only.
    #[default]
    File,
    /// Write to stderr only.
    Terminal,
    /// Write to both.
    Both,
}

pub fn initialize(destination: LogDestination, log_path: &Path) {
    let level = std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|raw| studio_logging::parse_level(&raw))
        .unwrap_or(LevelFilter::Info);
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        if let Some(file_logger) = create_file_logger(level, config, log_path) {
            loggers.push(file_logger);
        }
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!(
                "Warning: could not create log file at {}: {}",
                log_path.display(),
                err
            );
            None
        }
    }
}
