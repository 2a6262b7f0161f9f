//! Raw wire codec for zoa
//!
//! Per FORMAT.md, a zoa value is a recursive binary tree of chunks. This
//! module knows nothing about schema types; it only moves [`RawNode`]
//! trees to and from their chunked wire form.
//!
//! # Design Principles
//!
//! - One descriptor byte per chunk (JOIN / ARR / COUNT)
//! - Join chunking is pure framing: a logical node has unbounded size
//! - Decoding never returns a partial node
//! - Decode depth is explicitly bounded

mod errors;
mod node;
mod reader;
mod writer;

pub use errors::{RawError, RawResult};
pub use node::RawNode;
pub use reader::decode_prefix;
pub use writer::{write_arr, write_data, write_node};

/// Low 6 bits of the descriptor: byte count or child count
pub const LEN_MASK: u8 = 0x3F;
/// Descriptor bit 7: more chunks belong to this logical node
pub const JOIN: u8 = 0x80;
/// Descriptor bit 6: chunk carries child nodes, not raw bytes
pub const ARR: u8 = 0x40;
/// Maximum units (bytes or children) per chunk
pub const MAX_SEG: usize = 63;
/// Maximum nesting depth accepted by the decoder
pub const MAX_DEPTH: usize = 128;

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(node: &RawNode) {
        let wire = node.to_wire();
        let back = RawNode::from_wire(&wire).unwrap();
        assert_eq!(&back, node);
    }

    #[test]
    fn test_roundtrip_nested() {
        roundtrip(&RawNode::new_arr());
        roundtrip(&RawNode::arr(vec![
            RawNode::data(b"hi".as_slice()),
            RawNode::data(b"bob".as_slice()),
        ]));
        roundtrip(&RawNode::arr(vec![RawNode::new_arr()]));
        roundtrip(&RawNode::arr(vec![
            RawNode::data(b"hi".as_slice()),
            RawNode::new_arr(),
        ]));
        roundtrip(&RawNode::arr(vec![
            RawNode::data(b"hi".as_slice()),
            RawNode::arr(vec![RawNode::data(b"bob".as_slice())]),
        ]));
    }

    #[test]
    fn test_roundtrip_long_arr() {
        let children: Vec<RawNode> = (0..150u8)
            .map(|i| RawNode::data(vec![i]))
            .collect();
        roundtrip(&RawNode::arr(children));
    }

    #[test]
    fn test_roundtrip_long_data() {
        let blob: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        roundtrip(&RawNode::data(blob));
    }
}
