//! Host logger setup.
//!
//! Only records under the `docintel` target are kept; the HTTP stack logs
//! under its own targets and is filtered out.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use crate::AppError;

pub const DEFAULT_LOG_FILE: &str = "./docintel.log";

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Truncate and write the given file.
    File(PathBuf),
    Terminal,
    /// Terminal plus the given file.
    Both(PathBuf),
}

impl Default for LogDestination {
    fn default() -> Self {
        LogDestination::File(PathBuf::from(DEFAULT_LOG_FILE))
    }
}

/// Installs the global logger. Fails if the log file cannot be created or a
/// logger is already installed.
pub fn initialize(destination: LogDestination, level: LevelFilter) -> Result<(), AppError> {
    let config = controller_config();
    let loggers: Vec<Box<dyn SharedLogger>> = match &destination {
        LogDestination::File(path) => vec![file_logger(path, level, config)?],
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::Both(path) => vec![
            terminal_logger(level, config.clone()),
            file_logger(path, level, config)?,
        ],
    };
    CombinedLogger::init(loggers).map_err(AppError::Logger)
}

fn controller_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_allow_str(docintel_logging::TARGET)
        .build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Result<Box<dyn SharedLogger>, AppError> {
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.display().to_string(),
        source,
    })?;
    let logger: Box<dyn SharedLogger> = WriteLogger::new(level, config, file);
    Ok(logger)
}
