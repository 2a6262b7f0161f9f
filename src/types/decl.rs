//! Type descriptors
//!
//! Per SCHEMA.md §2, every schema-defined type is a descriptor in the
//! [`TypeEnv`](super::TypeEnv) arena, referenced by [`TypeId`] index.
//! Field and element references are indices, never owned subtrees, which
//! is what makes forward-declared and mutually-recursive types plain data
//! instead of a cyclic object graph.

use std::collections::HashMap;

use super::errors::{TypeError, TypeResult};
use super::value::Value;

/// Index of a type descriptor inside its [`TypeEnv`](super::TypeEnv) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named type descriptor.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    /// Qualified name (`mod.Name` when a module is set)
    pub name: String,
    /// Resolved body, or `Unresolved` for a pending forward declaration
    pub kind: TypeKind,
}

/// The body of a type descriptor.
///
/// One variant per binding family; the codec interprets these directly,
/// so no runtime-generated types exist anywhere.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// `declare`d but not yet defined
    Unresolved,
    /// Signed integer, 32-bit magnitude
    Int,
    /// Raw byte blob
    Bytes,
    /// Fixed-width unsigned integer of `width` bytes
    Fixed { width: u8 },
    /// Homogeneous ordered sequence
    Arr { elem: TypeId },
    /// Ordered key/value association
    Map { key: TypeId, val: TypeId },
    Struct(StructDef),
    Enum(EnumDef),
    Bitmap(BitmapDef),
}

/// Struct member descriptor.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeId,
    /// Wire tag for keyed fields; `None` means positional
    pub zid: Option<u32>,
    /// Declared default, usable when a literal omits the field
    pub default: Option<Value>,
}

impl FieldDef {
    /// A positional field with no default.
    pub fn positional(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            zid: None,
            default: None,
        }
    }

    /// A keyed field identified by `zid` on the wire.
    pub fn keyed(name: impl Into<String>, ty: TypeId, zid: u32) -> Self {
        Self {
            name: name.into(),
            ty,
            zid: Some(zid),
            default: None,
        }
    }

    /// Attach a declared default value.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// Struct descriptor: ordered fields plus the zid lookup table used by
/// decode (built once here, per declaration).
#[derive(Debug, Clone)]
pub struct StructDef {
    pub fields: Vec<FieldDef>,
    by_zid: HashMap<u32, usize>,
}

impl StructDef {
    /// Validate and build a struct descriptor.
    ///
    /// Field names and zids must be unique within the struct.
    pub fn new(fields: Vec<FieldDef>) -> TypeResult<Self> {
        let mut by_zid = HashMap::new();
        for (i, f) in fields.iter().enumerate() {
            if fields[..i].iter().any(|other| other.name == f.name) {
                return Err(TypeError::InvalidDeclaration(format!(
                    "duplicate field name '{}'",
                    f.name
                )));
            }
            if let Some(zid) = f.zid {
                if by_zid.insert(zid, i).is_some() {
                    return Err(TypeError::InvalidDeclaration(format!(
                        "duplicate zid {} on field '{}'",
                        zid, f.name
                    )));
                }
            }
        }
        Ok(Self { fields, by_zid })
    }

    /// Indices of positional fields, in declaration order.
    pub fn positional(&self) -> impl Iterator<Item = usize> + '_ {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.zid.is_none())
            .map(|(i, _)| i)
    }

    /// Field index for a wire zid.
    pub fn field_by_zid(&self, zid: u32) -> Option<usize> {
        self.by_zid.get(&zid).copied()
    }

    /// Field index by name.
    pub fn field_by_name(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Enum variant descriptor; the wire index is the declaration order.
#[derive(Debug, Clone)]
pub struct VariantDef {
    pub name: String,
    pub ty: TypeId,
}

/// Enum descriptor.
#[derive(Debug, Clone)]
pub struct EnumDef {
    pub variants: Vec<VariantDef>,
}

impl EnumDef {
    /// Validate and build an enum descriptor.
    pub fn new(variants: Vec<VariantDef>) -> TypeResult<Self> {
        for (i, v) in variants.iter().enumerate() {
            if variants[..i].iter().any(|other| other.name == v.name) {
                return Err(TypeError::InvalidDeclaration(format!(
                    "duplicate variant name '{}'",
                    v.name
                )));
            }
        }
        Ok(Self { variants })
    }

    /// Variant index by name.
    pub fn variant_by_name(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name == name)
    }
}

/// A bitmap variant's value/mask pair, e.g. `0b10` under mask `0b11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmVar {
    pub bits: u32,
    pub mask: u32,
}

/// Bitmap descriptor: a list of named (bits, mask) variants interpreted
/// against a single unsigned register.
#[derive(Debug, Clone)]
pub struct BitmapDef {
    pub variants: Vec<(String, BmVar)>,
}

impl BitmapDef {
    /// Validate and build a bitmap descriptor.
    ///
    /// Variant names must be unique and each variant's bits must fall
    /// inside its own mask.
    pub fn new(variants: Vec<(String, BmVar)>) -> TypeResult<Self> {
        for (i, (name, var)) in variants.iter().enumerate() {
            if variants[..i].iter().any(|(other, _)| other == name) {
                return Err(TypeError::InvalidDeclaration(format!(
                    "duplicate bitmap variant '{}'",
                    name
                )));
            }
            if var.bits & !var.mask != 0 {
                return Err(TypeError::InvalidDeclaration(format!(
                    "variant '{}' bits {:#x} fall outside mask {:#x}",
                    name, var.bits, var.mask
                )));
            }
        }
        Ok(Self { variants })
    }
}
