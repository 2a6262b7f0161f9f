//! Runtime values
//!
//! The codec is schema-driven, so values are one dynamic enum rather than
//! generated per-type structs. A [`Value`] is only meaningful next to the
//! [`TypeId`](super::TypeId) it is encoded or decoded with.

use std::fmt;

/// A native value convertible to and from the wire tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Signed integer (Int, U1, U2, U4 bindings)
    Int(i64),
    /// Raw byte blob
    Bytes(Vec<u8>),
    /// Homogeneous sequence
    Arr(Vec<Value>),
    /// Ordered key/value association
    Map(ValueMap),
    /// Struct instance, fields aligned with the declaration
    Struct(StructValue),
    /// Enum instance, exactly one variant populated
    Enum(EnumValue),
    /// Bitmap register
    Bitmap(u32),
}

impl Value {
    /// Byte-blob convenience constructor.
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(b.into())
    }

    /// Returns the integer if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the bytes if this is a `Bytes`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

/// Order-preserving key/value mapping with last-write-wins inserts.
///
/// The codec does not deduplicate keys on the wire; this host
/// representation does, keeping the first-insertion position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueMap {
    entries: Vec<(Value, Value)>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair; an existing equal key keeps its position and takes
    /// the new value.
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Value, Value)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Struct instance.
///
/// `fields[i]` corresponds to the i-th declared field; `None` means
/// omitted (legal only for a trailing positional suffix or keyed fields).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructValue {
    pub fields: Vec<Option<Value>>,
}

impl StructValue {
    /// An instance with every field unset, sized to the declaration.
    pub fn unset(field_count: usize) -> Self {
        Self {
            fields: vec![None; field_count],
        }
    }

    /// An instance from fully-positional values.
    pub fn positional(values: Vec<Value>) -> Self {
        Self {
            fields: values.into_iter().map(Some).collect(),
        }
    }
}

/// Enum instance: the populated variant's declaration index plus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub variant: usize,
    pub value: Box<Value>,
}

impl EnumValue {
    pub fn new(variant: usize, value: Value) -> Self {
        Self {
            variant,
            value: Box::new(value),
        }
    }
}

impl fmt::Display for Value {
    /// Literal-shaped rendering used by the CLI `decode` output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) if *v < 0 => write!(f, "{{{}}}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Bitmap(reg) => write!(f, "0x{:x}", reg),
            Value::Bytes(b) => {
                write!(f, "{{")?;
                for (i, byte) in b.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:02x}", byte)?;
                }
                write!(f, "}}")
            }
            Value::Arr(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "}}")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{} = {}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Struct(sv) => {
                write!(f, "{{")?;
                let mut first = true;
                for (i, field) in sv.fields.iter().enumerate() {
                    if let Some(v) = field {
                        if !first {
                            write!(f, " ")?;
                        }
                        write!(f, "{} = {}", i, v)?;
                        first = false;
                    }
                }
                write!(f, "}}")
            }
            Value::Enum(ev) => write!(f, "#{} {}", ev.variant, ev.value),
        }
    }
}
