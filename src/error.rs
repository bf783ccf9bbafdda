//! Error types for the netview state-view engine.

use crate::types::TableId;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to fetch {table}: {reason}")]
    FetchFailed { table: TableId, reason: String },

    #[error("Unknown database: {0}")]
    UnknownDatabase(String),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Status code handed to the transport layer for a failed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    NotFound,
    InvalidArgument,
    Internal,
}

/// Query-level errors surfaced to the transport layer
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Unknown view path: {0}")]
    UnknownView(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to encode view: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ViewError {
    /// Status the transport reports for this error.
    ///
    /// Store failures surface as `NotFound`: the query could not be answered
    /// from the tables it addresses.
    pub fn status(&self) -> StatusCode {
        match self {
            ViewError::UnknownView(_) | ViewError::Store(_) => StatusCode::NotFound,
            ViewError::ConfigError(_) => StatusCode::InvalidArgument,
            ViewError::Encoding(_) => StatusCode::Internal,
        }
    }
}

impl From<config::ConfigError> for ViewError {
    fn from(err: config::ConfigError) -> Self {
        ViewError::ConfigError(err.to_string())
    }
}
