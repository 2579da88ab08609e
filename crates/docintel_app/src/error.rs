use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to start effect runner: {0}")]
    Runtime(std::io::Error),
    #[error("failed to read page handles from {path}: {source}")]
    ReadHandles {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid page handle configuration: {0}")]
    Handles(String),
    #[error("failed to create log file {path}: {source}")]
    LogFile {
        path: String,
        source: std::io::Error,
    },
    #[error("a logger is already installed")]
    Logger(#[from] log::SetLoggerError),
}
