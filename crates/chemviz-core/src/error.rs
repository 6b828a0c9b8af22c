//! Error types for the aggregation, storage, and reporting pipeline

use chemviz_common::CommonError;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Category of a [`CoreError`], used by boundary layers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request is structurally unacceptable (missing file, columns, or fields)
    Validation,
    /// Uploaded bytes are not well-formed tabular data
    Parse,
    /// Upload parsed but contained no data rows
    EmptyDataset,
    /// Identifier unknown, pruned, or store empty
    NotFound,
    /// Report serialization fault
    Render,
    /// Storage, database, or IO fault
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Parse => "PARSE_ERROR",
            ErrorKind::EmptyDataset => "EMPTY_DATASET",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Render => "RENDER_ERROR",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

/// Errors raised by the ChemViz core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("No file uploaded.")]
    NoFile,

    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("{0}")]
    Validation(String),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { row: usize, column: &'static str },

    #[error("Invalid number '{value}' in column '{column}' at row {row}")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("CSV contains a header but no data rows")]
    EmptyDataset,

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to render report: {0}")]
    Render(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored dataset is corrupt: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Common(#[from] CommonError),
}

impl CoreError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Not-found error for an exact identifier lookup
    pub fn dataset_not_found(id: &Uuid) -> Self {
        Self::NotFound(format!("Dataset '{}' not found", id))
    }

    /// Not-found error for "latest" queries against an empty store
    pub fn no_datasets() -> Self {
        Self::NotFound("No datasets uploaded yet.".to_string())
    }

    /// Create a render error
    pub fn render(message: impl std::fmt::Display) -> Self {
        Self::Render(message.to_string())
    }

    /// Create a corrupt-record error
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt(message.into())
    }

    /// Classify this error for boundary translation
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NoFile | CoreError::MissingColumns(_) | CoreError::Validation(_) => {
                ErrorKind::Validation
            },
            CoreError::Csv(_) | CoreError::MissingValue { .. } | CoreError::InvalidNumber { .. } => {
                ErrorKind::Parse
            },
            CoreError::EmptyDataset => ErrorKind::EmptyDataset,
            CoreError::NotFound(_) => ErrorKind::NotFound,
            CoreError::Render(_) => ErrorKind::Render,
            CoreError::Database(_)
            | CoreError::Migration(_)
            | CoreError::Io(_)
            | CoreError::Corrupt(_)
            | CoreError::Common(_) => ErrorKind::Internal,
        }
    }

    /// Whether the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Validation | ErrorKind::Parse | ErrorKind::EmptyDataset | ErrorKind::NotFound
        )
    }
}
