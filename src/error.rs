//! Error types for tick.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cannot use data directory '{}': {reason}", path.display())]
    DataDir { path: PathBuf, reason: String },

    #[error("Task '{0}' not found")]
    TaskNotFound(String),

    #[error("'{query}' matches {count} tasks; use a longer id")]
    AmbiguousTask { query: String, count: usize },

    #[error("{0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, Error>;
