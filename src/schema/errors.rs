//! # Schema Compiler Errors

use thiserror::Error;

use crate::types::TypeError;

/// Result type for schema parsing
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while compiling schema source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Tokenizer or grammar violation, with the source line
    #[error("line {line}: {msg}")]
    Parse { line: u32, msg: String },

    /// Registration or literal-construction failure from the type layer
    #[error(transparent)]
    Type(#[from] TypeError),
}

impl SchemaError {
    /// Convenience constructor for grammar violations.
    pub fn parse(line: u32, msg: impl Into<String>) -> Self {
        SchemaError::Parse {
            line,
            msg: msg.into(),
        }
    }
}
