//! Scalar bindings
//!
//! Per FORMAT.md §5, the sign of an integer is structural: a non-negative
//! value is a data leaf of its minimal big-endian magnitude, a negative
//! value is a one-child array wrapping that leaf. Magnitudes are bounded
//! to 32 bits.

use crate::raw::RawNode;

use super::errors::{TypeError, TypeResult};

/// Largest magnitude any integer binding accepts.
pub const MAX_MAGNITUDE: u64 = u32::MAX as u64;

/// Minimal big-endian magnitude bytes; zero is the empty slice.
pub(crate) fn magnitude_bytes(m: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(4);
    for shift in [24u32, 16, 8, 0] {
        let byte = (m >> shift) as u8;
        if byte != 0 || !out.is_empty() {
            out.push(byte);
        }
    }
    out
}

/// Big-endian magnitude from a data leaf of at most `max_len` bytes.
pub(crate) fn magnitude_from(bytes: &[u8], max_len: usize) -> TypeResult<u64> {
    if bytes.len() > max_len {
        let shown: i64 = bytes.iter().take(8).fold(0, |acc, b| (acc << 8) | *b as i64);
        return Err(TypeError::MagnitudeOverflow {
            value: shown,
            max: (1u64 << (8 * max_len as u64)) - 1,
        });
    }
    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64))
}

/// Encode a signed integer.
pub fn int_to_node(v: i64) -> TypeResult<RawNode> {
    let magnitude = v.unsigned_abs();
    if magnitude > MAX_MAGNITUDE {
        return Err(TypeError::MagnitudeOverflow {
            value: v,
            max: MAX_MAGNITUDE,
        });
    }
    let leaf = RawNode::Data(magnitude_bytes(magnitude));
    if v >= 0 {
        Ok(leaf)
    } else {
        Ok(RawNode::Arr(vec![leaf]))
    }
}

/// Decode a signed integer.
pub fn int_from_node(node: &RawNode) -> TypeResult<i64> {
    match node {
        RawNode::Data(bytes) => Ok(magnitude_from(bytes, 4)? as i64),
        RawNode::Arr(children) => {
            if children.len() != 1 {
                return Err(TypeError::InvalidNodeShape(format!(
                    "negative Int wants exactly one child, got {}",
                    children.len()
                )));
            }
            match &children[0] {
                RawNode::Data(bytes) => Ok(-(magnitude_from(bytes, 4)? as i64)),
                RawNode::Arr(_) => Err(TypeError::InvalidNodeShape(
                    "negative Int child must be a data leaf".into(),
                )),
            }
        }
    }
}

/// Encode a fixed-width unsigned integer of `width` bytes.
///
/// Validates the value fits the declared width; the wire form is still
/// the minimal big-endian leaf.
pub fn uint_to_node(v: i64, width: u8) -> TypeResult<RawNode> {
    let max = (1u64 << (8 * width as u64)) - 1;
    if v < 0 || v as u64 > max {
        return Err(TypeError::MagnitudeOverflow { value: v, max });
    }
    Ok(RawNode::Data(magnitude_bytes(v as u64)))
}

/// Decode a fixed-width unsigned integer of `width` bytes.
pub fn uint_from_node(node: &RawNode, width: u8) -> TypeResult<i64> {
    match node {
        RawNode::Data(bytes) => Ok(magnitude_from(bytes, width as usize)? as i64),
        RawNode::Arr(_) => Err(TypeError::InvalidNodeShape(
            "fixed-width integer must be a data leaf".into(),
        )),
    }
}
