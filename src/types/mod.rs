//! Typed binding layer for zoa
//!
//! Per SCHEMA.md §2, every type is a descriptor in a [`TypeEnv`] arena
//! and values are one dynamic [`Value`] enum; a single interpreter
//! ([`encode`]/[`decode`]) moves values to and from the raw wire tree.
//!
//! # Design Principles
//!
//! - Descriptors are data; no runtime-generated types
//! - References between types are arena indices, so forward declarations
//!   and mutual recursion are index aliasing, not ownership cycles
//! - Malformed wire input is a typed error, never a panic

mod bitmap;
mod codec;
mod decl;
mod dynamic;
mod env;
mod errors;
mod scalars;
mod value;

pub use codec::{decode, encode};
pub use decl::{
    BitmapDef, BmVar, EnumDef, FieldDef, StructDef, TypeDecl, TypeId, TypeKind, VariantDef,
};
pub use dynamic::{Dyn, TAG_ARR, TAG_ARR_DATA, TAG_ARR_INT, TAG_DATA, TAG_INT};
pub use env::{ConstDecl, TypeEnv};
pub use errors::{TypeError, TypeResult};
pub use scalars::{int_from_node, int_to_node, uint_from_node, uint_to_node, MAX_MAGNITUDE};
pub use value::{EnumValue, StructValue, Value, ValueMap};
