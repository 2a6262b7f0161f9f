//! Wire decoding
//!
//! Per FORMAT.md §4, the ARR bit of the first chunk fixes the node's kind
//! for its whole join sequence. Decoding consumes chunks while the JOIN
//! bit is set and returns on the first non-JOIN chunk; a complete value is
//! self-delimiting, so no outer length prefix exists.
//!
//! Truncated input is an explicit [`RawError::EndOfStream`], never a
//! silently short node. Nesting is bounded by [`MAX_DEPTH`](super::MAX_DEPTH)
//! so adversarial input cannot exhaust the call stack.

use super::errors::{RawError, RawResult};
use super::node::RawNode;
use super::{ARR, JOIN, LEN_MASK, MAX_DEPTH};

/// Cursor over an in-memory wire buffer.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn read_byte(&mut self) -> RawResult<u8> {
        let b = *self
            .buf
            .get(self.pos)
            .ok_or(RawError::EndOfStream(self.pos))?;
        self.pos += 1;
        Ok(b)
    }

    fn read_exact(&mut self, len: usize) -> RawResult<&'a [u8]> {
        if self.buf.len() - self.pos < len {
            return Err(RawError::EndOfStream(self.buf.len()));
        }
        let s = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(s)
    }

    /// Decode one node starting at the cursor.
    fn read_node(&mut self, depth: usize) -> RawResult<RawNode> {
        if depth > MAX_DEPTH {
            return Err(RawError::NestingTooDeep(MAX_DEPTH));
        }

        let first = self.read_byte()?;
        let kind = first & ARR;
        let mut node = if kind != 0 {
            RawNode::new_arr()
        } else {
            RawNode::new_data()
        };

        let mut meta = first;
        loop {
            if meta & ARR != kind {
                return Err(RawError::JoinTypeMismatch(self.pos - 1));
            }
            let count = (meta & LEN_MASK) as usize;

            match &mut node {
                RawNode::Arr(children) => {
                    for _ in 0..count {
                        children.push(self.read_node(depth + 1)?);
                    }
                }
                RawNode::Data(data) => {
                    data.extend_from_slice(self.read_exact(count)?);
                }
            }

            if meta & JOIN == 0 {
                return Ok(node);
            }
            meta = self.read_byte()?;
        }
    }
}

/// Decode one node from the front of `buf`.
///
/// Returns the node and the number of bytes consumed; trailing bytes are
/// left for the caller (the wire form is self-delimiting).
pub fn decode_prefix(buf: &[u8]) -> RawResult<(RawNode, usize)> {
    let mut r = Reader::new(buf);
    let node = r.read_node(0)?;
    Ok((node, r.pos))
}

impl RawNode {
    /// Decode one node from `buf`, ignoring any trailing bytes.
    pub fn from_wire(buf: &[u8]) -> RawResult<RawNode> {
        decode_prefix(buf).map(|(node, _)| node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_short_data() {
        let node = RawNode::from_wire(b"\x02hi").unwrap();
        assert_eq!(node, RawNode::data(b"hi".as_slice()));
    }

    #[test]
    fn test_read_empty_data() {
        let node = RawNode::from_wire(&[0x00]).unwrap();
        assert_eq!(node, RawNode::new_data());
    }

    #[test]
    fn test_read_empty_arr() {
        let node = RawNode::from_wire(&[ARR]).unwrap();
        assert_eq!(node, RawNode::new_arr());
    }

    #[test]
    fn test_consumed_excludes_trailing() {
        let (node, used) = decode_prefix(b"\x02hi\xFF\xFF").unwrap();
        assert_eq!(node, RawNode::data(b"hi".as_slice()));
        assert_eq!(used, 3);
    }

    #[test]
    fn test_truncated_data_fails() {
        let err = RawNode::from_wire(b"\x05hi").unwrap_err();
        assert!(matches!(err, RawError::EndOfStream(_)));
    }

    #[test]
    fn test_truncated_join_fails() {
        // JOIN chunk promises a continuation descriptor that never comes.
        let mut wire = vec![JOIN | 2];
        wire.extend_from_slice(b"hi");
        let err = RawNode::from_wire(&wire).unwrap_err();
        assert!(matches!(err, RawError::EndOfStream(_)));
    }

    #[test]
    fn test_join_type_mismatch_fails() {
        // Data chunk joined by an array chunk.
        let wire = vec![JOIN | 1, 0x41, ARR];
        let err = RawNode::from_wire(&wire).unwrap_err();
        assert!(matches!(err, RawError::JoinTypeMismatch(_)));
    }

    #[test]
    fn test_depth_limit() {
        // MAX_DEPTH + 2 nested single-child arrays.
        let mut wire = vec![ARR | 1; MAX_DEPTH + 2];
        wire.push(0x00);
        let err = RawNode::from_wire(&wire).unwrap_err();
        assert_eq!(err, RawError::NestingTooDeep(MAX_DEPTH));
    }

    #[test]
    fn test_joined_data_reassembles() {
        let mut wire = vec![JOIN | 2];
        wire.extend_from_slice(b"he");
        wire.push(3);
        wire.extend_from_slice(b"llo");
        let node = RawNode::from_wire(&wire).unwrap();
        assert_eq!(node, RawNode::data(b"hello".as_slice()));
    }
}
