//! # Type Binding Errors

use thiserror::Error;

/// Result type for typed binding operations
pub type TypeResult<T> = Result<T, TypeError>;

/// Errors raised by the typed binding layer and the type registry.
///
/// Malformed wire input and misuse of a declared type both surface here;
/// every variant is terminal for the operation that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    // Registry errors
    #[error("type name already exists: {0}")]
    DuplicateTypeName(String),

    #[error("unknown type: {0}")]
    UnknownType(String),

    #[error("invalid declaration: {0}")]
    InvalidDeclaration(String),

    #[error("forward-declared type never defined: {0}")]
    UnresolvedForwardDeclaration(String),

    // Codec errors
    #[error("invalid node shape: {0}")]
    InvalidNodeShape(String),

    #[error("unknown tag {tag} for {ty}")]
    UnknownTag { ty: String, tag: i64 },

    #[error("integer magnitude {value:#x} exceeds {max:#x}")]
    MagnitudeOverflow { value: i64, max: u64 },

    // Struct construction errors
    #[error("field '{0}' has value after an earlier positional field was omitted")]
    PositionalGap(String),

    // Bitmap errors
    #[error("unknown bitmap variant: {0}")]
    UnknownVariant(String),

    #[error("bits {bits:#x} fall outside mask {mask:#x}")]
    BitsOutsideMask { bits: u32, mask: u32 },
}
