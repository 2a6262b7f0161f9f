//! Self-tagging dynamic values
//!
//! Per FORMAT.md §7, a `Dyn` is used where the shape is only known at
//! decode time. The wire form is a two-element array `[Int(tag),
//! payload]`; homogeneous array tags combine the array marker with the
//! element's base tag, while the bare marker means every element carries
//! its own tag.

use crate::raw::RawNode;

use super::errors::{TypeError, TypeResult};
use super::scalars;

/// Base tag: signed integer payload
pub const TAG_INT: i64 = 0x01;
/// Base tag: byte-blob payload
pub const TAG_DATA: i64 = 0x02;
/// Array marker; bare it means a heterogeneous array of tagged values
pub const TAG_ARR: i64 = 0x10;
/// Homogeneous array of integers
pub const TAG_ARR_INT: i64 = TAG_ARR | TAG_INT;
/// Homogeneous array of byte blobs
pub const TAG_ARR_DATA: i64 = TAG_ARR | TAG_DATA;

/// A dynamically-tagged value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dyn {
    Int(i64),
    Data(Vec<u8>),
    ArrInt(Vec<i64>),
    ArrData(Vec<Vec<u8>>),
    ArrDyn(Vec<Dyn>),
}

impl Dyn {
    /// The wire tag for this value's shape.
    pub fn tag(&self) -> i64 {
        match self {
            Dyn::Int(_) => TAG_INT,
            Dyn::Data(_) => TAG_DATA,
            Dyn::ArrInt(_) => TAG_ARR_INT,
            Dyn::ArrData(_) => TAG_ARR_DATA,
            Dyn::ArrDyn(_) => TAG_ARR,
        }
    }

    /// Encode as the `[Int(tag), payload]` pair.
    pub fn encode(&self) -> TypeResult<RawNode> {
        let payload = match self {
            Dyn::Int(v) => scalars::int_to_node(*v)?,
            Dyn::Data(b) => RawNode::Data(b.clone()),
            Dyn::ArrInt(items) => RawNode::Arr(
                items
                    .iter()
                    .map(|v| scalars::int_to_node(*v))
                    .collect::<TypeResult<Vec<_>>>()?,
            ),
            Dyn::ArrData(items) => {
                RawNode::Arr(items.iter().map(|b| RawNode::Data(b.clone())).collect())
            }
            Dyn::ArrDyn(items) => RawNode::Arr(
                items
                    .iter()
                    .map(|item| item.encode())
                    .collect::<TypeResult<Vec<_>>>()?,
            ),
        };
        Ok(RawNode::Arr(vec![scalars::int_to_node(self.tag())?, payload]))
    }

    /// Decode from a `[Int(tag), payload]` pair, dispatching on the tag.
    pub fn decode(node: &RawNode) -> TypeResult<Dyn> {
        let children = node
            .as_arr()
            .ok_or_else(|| TypeError::InvalidNodeShape("Dyn wants [tag, payload]".into()))?;
        if children.len() != 2 {
            return Err(TypeError::InvalidNodeShape("Dyn wants [tag, payload]".into()));
        }
        let tag = scalars::int_from_node(&children[0])?;
        let payload = &children[1];
        match tag {
            TAG_INT => Ok(Dyn::Int(scalars::int_from_node(payload)?)),
            TAG_DATA => match payload {
                RawNode::Data(b) => Ok(Dyn::Data(b.clone())),
                RawNode::Arr(_) => {
                    Err(TypeError::InvalidNodeShape("Dyn data wants a leaf".into()))
                }
            },
            TAG_ARR_INT => {
                let items = payload_arr(payload)?
                    .iter()
                    .map(scalars::int_from_node)
                    .collect::<TypeResult<Vec<_>>>()?;
                Ok(Dyn::ArrInt(items))
            }
            TAG_ARR_DATA => {
                let items = payload_arr(payload)?
                    .iter()
                    .map(|child| match child {
                        RawNode::Data(b) => Ok(b.clone()),
                        RawNode::Arr(_) => Err(TypeError::InvalidNodeShape(
                            "Dyn data element wants a leaf".into(),
                        )),
                    })
                    .collect::<TypeResult<Vec<_>>>()?;
                Ok(Dyn::ArrData(items))
            }
            TAG_ARR => {
                let items = payload_arr(payload)?
                    .iter()
                    .map(Dyn::decode)
                    .collect::<TypeResult<Vec<_>>>()?;
                Ok(Dyn::ArrDyn(items))
            }
            _ => Err(TypeError::UnknownTag {
                ty: "Dyn".into(),
                tag,
            }),
        }
    }
}

fn payload_arr(node: &RawNode) -> TypeResult<&[RawNode]> {
    node.as_arr()
        .ok_or_else(|| TypeError::InvalidNodeShape("Dyn array payload wants an array node".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(v: &Dyn) {
        let node = v.encode().unwrap();
        assert_eq!(&Dyn::decode(&node).unwrap(), v);
    }

    #[test]
    fn test_scalar_roundtrips() {
        roundtrip(&Dyn::Int(0x42));
        roundtrip(&Dyn::Int(-7));
        roundtrip(&Dyn::Data(b"hello".to_vec()));
        roundtrip(&Dyn::Data(Vec::new()));
    }

    #[test]
    fn test_homogeneous_arrays() {
        roundtrip(&Dyn::ArrInt(vec![1, -2, 300]));
        roundtrip(&Dyn::ArrData(vec![b"a".to_vec(), Vec::new()]));
    }

    #[test]
    fn test_heterogeneous_array() {
        roundtrip(&Dyn::ArrDyn(vec![
            Dyn::Data(vec![0x48]),
            Dyn::ArrData(Vec::new()),
        ]));
    }

    #[test]
    fn test_nested_dyn() {
        roundtrip(&Dyn::ArrDyn(vec![
            Dyn::ArrDyn(vec![Dyn::Int(1)]),
            Dyn::ArrInt(vec![2, 3]),
        ]));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let wire = RawNode::arr(vec![
            scalars::int_to_node(0x7F).unwrap(),
            RawNode::new_data(),
        ]);
        assert!(matches!(
            Dyn::decode(&wire),
            Err(TypeError::UnknownTag { tag: 0x7F, .. })
        ));
    }

    #[test]
    fn test_tag_composition() {
        assert_eq!(Dyn::ArrInt(vec![]).tag(), TAG_ARR | TAG_INT);
        assert_eq!(Dyn::ArrData(vec![]).tag(), TAG_ARR | TAG_DATA);
        assert_eq!(Dyn::ArrDyn(vec![]).tag(), TAG_ARR);
    }
}
