//! Error types for the ChemViz CLI
//!
//! Messages are user-facing: each one says what went wrong and, where it
//! helps, what to try next.

use chemviz_core::{CoreError, ErrorKind};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file could not be read
    #[error("File not found: '{}'. Verify the file path exists and you have read permissions.", .0.display())]
    FileNotFound(PathBuf),

    /// Dataset id is not a valid identifier
    #[error("Invalid dataset id '{0}'. Run 'chemviz history' to list available ids.")]
    InvalidId(String),

    /// Upload was rejected by validation or parsing
    #[error("Upload rejected: {0}")]
    Rejected(CoreError),

    /// Requested dataset does not exist
    #[error("{0}")]
    NotFound(CoreError),

    /// Storage or rendering fault
    #[error("Storage error: {0}. Check that the data directory is readable and writable.")]
    Storage(CoreError),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// JSON output failed
    #[error("Failed to format JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        match error.kind() {
            ErrorKind::Validation | ErrorKind::Parse | ErrorKind::EmptyDataset => {
                CliError::Rejected(error)
            },
            ErrorKind::NotFound => CliError::NotFound(error),
            ErrorKind::Render | ErrorKind::Internal => CliError::Storage(error),
        }
    }
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidId(_) | CliError::Rejected(_) => 2,
            CliError::NotFound(_) => 3,
            _ => 1,
        }
    }
}
