//! Error types for wt-output.

use thiserror::Error;

/// Errors that can occur when storing or loading readings.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("bad stored timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("writer already finished")]
    Finished,

    #[error("caller stopped waiting before the write started")]
    Abandoned,

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
