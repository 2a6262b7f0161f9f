//! CLI-specific error types
//!
//! Everything a command can fail with, aggregated so `main` prints one
//! line and exits non-zero.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::raw::RawError;
use crate::schema::SchemaError;
use crate::types::TypeError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("type error: {0}")]
    Type(#[from] TypeError),

    #[error("wire error: {0}")]
    Wire(#[from] RawError),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// I/O error carrying the path it happened on.
    pub fn io(path: &Path, source: io::Error) -> Self {
        CliError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// I/O error on a standard stream.
    pub fn stdio(source: io::Error) -> Self {
        CliError::Io {
            path: "<stdio>".to_string(),
            source,
        }
    }
}
