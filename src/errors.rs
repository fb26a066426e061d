use std::path::PathBuf;
use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// An external command exited with a non-zero status
    #[error("Failed to {step} (exit status {status})")]
    CommandFailed { step: &'static str, status: i32 },

    /// An external command could not be launched at all
    #[error("Failed to {step}: could not launch '{program}': {source}")]
    CommandLaunch {
        step: &'static str,
        program: String,
        source: std::io::Error,
    },

    /// Python virtual environment for the external processor is missing
    #[error(
        "Python virtual environment not found at {}. Create it with 'python3 -m venv {}' and install the processor requirements into it",
        path.display(),
        path.display()
    )]
    MissingEnvironment { path: PathBuf },

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV processing
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Blockchain explorer lookups
    #[error("Explorer error: {0}")]
    Explorer(#[from] ExplorerError),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Blockchain explorer error types
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// HTTP request to the explorer failed
    #[error("Request failed for txid {txid}: {source}")]
    RequestFailed {
        txid: String,
        source: reqwest::Error,
    },

    /// Explorer returned a response that could not be deserialised
    #[error("Invalid response for txid {txid}: {reason}")]
    InvalidResponse { txid: String, reason: String },
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
