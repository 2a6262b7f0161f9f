//! Typed encode/decode
//!
//! One interpreter over the descriptor arena, per SCHEMA.md §2: every
//! binding family is a match arm, dispatching on [`TypeKind`], so typed
//! codecs are data rather than generated code.
//!
//! Both directions fail loudly on structurally invalid input (wrong node
//! kind, bad length, unknown tag) and never yield partial values.

use crate::raw::RawNode;

use super::decl::{EnumDef, StructDef, TypeId, TypeKind};
use super::env::TypeEnv;
use super::errors::{TypeError, TypeResult};
use super::scalars;
use super::value::{EnumValue, StructValue, Value, ValueMap};

fn shape_err(ty: &str, want: &str) -> TypeError {
    TypeError::InvalidNodeShape(format!("{} wants {}", ty, want))
}

/// Encode `value` as the declared type `ty`.
pub fn encode(env: &TypeEnv, ty: TypeId, value: &Value) -> TypeResult<RawNode> {
    let decl = env.get(ty);
    match (&decl.kind, value) {
        (TypeKind::Unresolved, _) => Err(TypeError::UnresolvedForwardDeclaration(
            decl.name.clone(),
        )),
        (TypeKind::Int, Value::Int(v)) => scalars::int_to_node(*v),
        (TypeKind::Fixed { width }, Value::Int(v)) => scalars::uint_to_node(*v, *width),
        (TypeKind::Bytes, Value::Bytes(b)) => Ok(RawNode::Data(b.clone())),
        (TypeKind::Arr { elem }, Value::Arr(items)) => {
            let children = items
                .iter()
                .map(|item| encode(env, *elem, item))
                .collect::<TypeResult<Vec<_>>>()?;
            Ok(RawNode::Arr(children))
        }
        (TypeKind::Map { key, val }, Value::Map(map)) => {
            let mut children = Vec::with_capacity(map.len() * 2);
            for (k, v) in map.iter() {
                children.push(encode(env, *key, k)?);
                children.push(encode(env, *val, v)?);
            }
            Ok(RawNode::Arr(children))
        }
        (TypeKind::Struct(def), Value::Struct(sv)) => encode_struct(env, &decl.name, def, sv),
        (TypeKind::Enum(def), Value::Enum(ev)) => {
            if ev.variant >= def.variants.len() {
                return Err(TypeError::UnknownTag {
                    ty: decl.name.clone(),
                    tag: ev.variant as i64,
                });
            }
            let payload = encode(env, def.variants[ev.variant].ty, &ev.value)?;
            Ok(RawNode::Arr(vec![
                scalars::int_to_node(ev.variant as i64)?,
                payload,
            ]))
        }
        (TypeKind::Bitmap(_), Value::Bitmap(reg)) => {
            Ok(RawNode::Data(scalars::magnitude_bytes(*reg as u64)))
        }
        (_, _) => Err(shape_err(&decl.name, "a value of its own kind")),
    }
}

/// Decode `node` as the declared type `ty`.
pub fn decode(env: &TypeEnv, ty: TypeId, node: &RawNode) -> TypeResult<Value> {
    let decl = env.get(ty);
    match &decl.kind {
        TypeKind::Unresolved => Err(TypeError::UnresolvedForwardDeclaration(
            decl.name.clone(),
        )),
        TypeKind::Int => scalars::int_from_node(node).map(Value::Int),
        TypeKind::Fixed { width } => scalars::uint_from_node(node, *width).map(Value::Int),
        TypeKind::Bytes => match node {
            RawNode::Data(b) => Ok(Value::Bytes(b.clone())),
            RawNode::Arr(_) => Err(shape_err(&decl.name, "a data leaf")),
        },
        TypeKind::Arr { elem } => {
            let children = node
                .as_arr()
                .ok_or_else(|| shape_err(&decl.name, "an array node"))?;
            let items = children
                .iter()
                .map(|child| decode(env, *elem, child))
                .collect::<TypeResult<Vec<_>>>()?;
            Ok(Value::Arr(items))
        }
        TypeKind::Map { key, val } => {
            let children = node
                .as_arr()
                .ok_or_else(|| shape_err(&decl.name, "an array node"))?;
            if children.len() % 2 != 0 {
                return Err(shape_err(&decl.name, "an even number of children"));
            }
            let mut map = ValueMap::new();
            for pair in children.chunks(2) {
                let k = decode(env, *key, &pair[0])?;
                let v = decode(env, *val, &pair[1])?;
                map.insert(k, v);
            }
            Ok(Value::Map(map))
        }
        TypeKind::Struct(def) => decode_struct(env, &decl.name, def, node),
        TypeKind::Enum(def) => decode_enum(env, &decl.name, def, node),
        TypeKind::Bitmap(_) => match node {
            RawNode::Data(bytes) => Ok(Value::Bitmap(scalars::magnitude_from(bytes, 4)? as u32)),
            RawNode::Arr(_) => Err(shape_err(&decl.name, "a data leaf")),
        },
    }
}

/// Struct wire form: `[Int(P), p0..p(P-1), [Int(zid), v]...]` where P is
/// the contiguous populated positional prefix.
fn encode_struct(
    env: &TypeEnv,
    name: &str,
    def: &StructDef,
    sv: &StructValue,
) -> TypeResult<RawNode> {
    if sv.fields.len() != def.fields.len() {
        return Err(shape_err(name, "one slot per declared field"));
    }

    // count the populated positional prefix; a populated positional after
    // an omitted one is a construction error
    let mut pos_count: i64 = 0;
    let mut pos_done = false;
    for i in def.positional() {
        match &sv.fields[i] {
            Some(_) if pos_done => {
                return Err(TypeError::PositionalGap(def.fields[i].name.clone()))
            }
            Some(_) => pos_count += 1,
            None => pos_done = true,
        }
    }

    let mut children = vec![scalars::int_to_node(pos_count)?];
    for i in def.positional() {
        if let Some(v) = &sv.fields[i] {
            children.push(encode(env, def.fields[i].ty, v)?);
        }
    }
    for (i, f) in def.fields.iter().enumerate() {
        if let Some(zid) = f.zid {
            if let Some(v) = &sv.fields[i] {
                children.push(RawNode::Arr(vec![
                    scalars::int_to_node(zid as i64)?,
                    encode(env, f.ty, v)?,
                ]));
            }
        }
    }
    Ok(RawNode::Arr(children))
}

fn decode_struct(
    env: &TypeEnv,
    name: &str,
    def: &StructDef,
    node: &RawNode,
) -> TypeResult<Value> {
    let children = node
        .as_arr()
        .ok_or_else(|| shape_err(name, "an array node"))?;
    let Some((head, rest)) = children.split_first() else {
        return Err(shape_err(name, "a positional count"));
    };
    let pos_count = scalars::int_from_node(head)?;
    if pos_count < 0 {
        return Err(shape_err(name, "a non-negative positional count"));
    }
    let pos_count = pos_count as usize;

    let positional: Vec<usize> = def.positional().collect();
    if pos_count > positional.len() || pos_count > rest.len() {
        return Err(shape_err(name, "a positional count within the declaration"));
    }

    let mut sv = StructValue::unset(def.fields.len());
    for (k, child) in rest[..pos_count].iter().enumerate() {
        let idx = positional[k];
        sv.fields[idx] = Some(decode(env, def.fields[idx].ty, child)?);
    }

    for child in &rest[pos_count..] {
        let pair = child
            .as_arr()
            .ok_or_else(|| shape_err(name, "[zid, value] pairs after positionals"))?;
        if pair.len() != 2 {
            return Err(shape_err(name, "[zid, value] pairs after positionals"));
        }
        let zid = scalars::int_from_node(&pair[0])?;
        let idx = u32::try_from(zid)
            .ok()
            .and_then(|z| def.field_by_zid(z))
            .ok_or_else(|| TypeError::UnknownTag {
                ty: name.to_string(),
                tag: zid,
            })?;
        sv.fields[idx] = Some(decode(env, def.fields[idx].ty, &pair[1])?);
    }
    Ok(Value::Struct(sv))
}

/// Enum wire form: `[Int(variantIndex), payload]`.
fn decode_enum(env: &TypeEnv, name: &str, def: &EnumDef, node: &RawNode) -> TypeResult<Value> {
    let children = node
        .as_arr()
        .ok_or_else(|| shape_err(name, "an array node"))?;
    if children.len() != 2 {
        return Err(shape_err(name, "[variant, payload]"));
    }
    let tag = scalars::int_from_node(&children[0])?;
    let variant = usize::try_from(tag)
        .ok()
        .filter(|&v| v < def.variants.len())
        .ok_or_else(|| TypeError::UnknownTag {
            ty: name.to_string(),
            tag,
        })?;
    let payload = decode(env, def.variants[variant].ty, &children[1])?;
    Ok(Value::Enum(EnumValue::new(variant, payload)))
}
