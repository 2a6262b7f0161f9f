//! # Wire Decode Errors

use thiserror::Error;

/// Result type for raw wire operations
pub type RawResult<T> = Result<T, RawError>;

/// Errors raised while decoding the chunked wire form.
///
/// All variants are terminal for the decode call that raised them; no
/// partial node is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RawError {
    /// Input exhausted mid-chunk or mid-join
    #[error("unexpected end of stream at byte {0}")]
    EndOfStream(usize),

    /// A JOIN continuation carried a different ARR bit than the chunk
    /// that opened the node
    #[error("join continuation changes node kind at byte {0}")]
    JoinTypeMismatch(usize),

    /// Input nested deeper than [`MAX_DEPTH`](super::MAX_DEPTH)
    #[error("nesting exceeds depth limit of {0}")]
    NestingTooDeep(usize),
}
