//! Wire encoding
//!
//! Per FORMAT.md §3, every chunk starts with one descriptor byte:
//!
//! ```text
//! +------+------+-------------+
//! | JOIN | ARR  | COUNT (0-63)|
//! | bit7 | bit6 | bits 5..0   |
//! +------+------+-------------+
//! ```
//!
//! Long blobs and arrays are split into join chunks of at most 63 units;
//! the final chunk of a node never carries the JOIN bit.

use super::node::RawNode;
use super::{ARR, JOIN, MAX_SEG};

/// Encode a node into its self-delimiting wire form.
pub fn write_node(out: &mut Vec<u8>, node: &RawNode) {
    match node {
        RawNode::Data(d) => write_data(out, d),
        RawNode::Arr(a) => write_arr(out, a),
    }
}

/// Encode a byte blob.
///
/// An empty blob is the single descriptor `0x00`. A blob of length N is
/// `ceil(N/63) - 1` JOIN chunks of exactly 63 bytes followed by one
/// non-JOIN chunk of the 1..=63 remaining bytes.
pub fn write_data(out: &mut Vec<u8>, data: &[u8]) {
    if data.is_empty() {
        out.push(0x00); // no join bit, arr bit, or count
        return;
    }

    let mut i = 0;
    while data.len() - i > MAX_SEG {
        out.push(JOIN | MAX_SEG as u8);
        out.extend_from_slice(&data[i..i + MAX_SEG]);
        i += MAX_SEG;
    }
    out.push((data.len() - i) as u8); // not joined
    out.extend_from_slice(&data[i..]);
}

/// Encode an array of nodes.
///
/// An empty array is the single descriptor `0x40`. Otherwise children are
/// emitted in groups of at most 63, each group prefixed with its own
/// descriptor; every group but the last carries the JOIN bit.
pub fn write_arr(out: &mut Vec<u8>, arr: &[RawNode]) {
    if arr.is_empty() {
        out.push(ARR);
        return;
    }

    let mut i = 0;
    while i < arr.len() {
        let remaining = arr.len() - i;
        let count = remaining.min(MAX_SEG);
        let join = if remaining > MAX_SEG { JOIN } else { 0 };
        out.push(ARR | join | count as u8);
        for child in &arr[i..i + count] {
            write_node(out, child);
        }
        i += count;
    }
}

impl RawNode {
    /// Serialize this node to wire bytes.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_node(&mut out, self);
        out
    }
}
