//! C declaration emitter
//!
//! Renders resolved descriptors as C typedefs so zoa schemas can back
//! C programs. Works only from the [`TypeEnv`]: it never re-parses
//! schema source and never mutates the environment.

use crate::types::{BitmapDef, EnumDef, StructDef, TypeEnv, TypeError, TypeId, TypeKind, TypeResult};

/// Fixed preamble: byte/array carriers every generated header relies on.
pub const C_PRELUDE: &str = "\
#include <stdint.h>
#include <stddef.h>

typedef struct { uint8_t* dat; size_t len; } zoa_bytes;
typedef struct { void* dat; size_t len; } zoa_arr;
";

/// C identifier for a qualified type name (`m.Name` becomes `m_Name`).
fn c_ident(name: &str) -> String {
    name.replace('.', "_")
}

/// C carrier type for a field or variant reference.
fn c_type_name(env: &TypeEnv, id: TypeId) -> TypeResult<String> {
    Ok(match env.kind(id) {
        TypeKind::Unresolved => {
            return Err(TypeError::UnresolvedForwardDeclaration(
                env.name(id).to_string(),
            ))
        }
        TypeKind::Int => "int64_t".to_string(),
        TypeKind::Bytes => "zoa_bytes".to_string(),
        TypeKind::Fixed { width: 1 } => "uint8_t".to_string(),
        TypeKind::Fixed { width: 2 } => "uint16_t".to_string(),
        TypeKind::Fixed { .. } => "uint32_t".to_string(),
        TypeKind::Arr { .. } | TypeKind::Map { .. } => "zoa_arr".to_string(),
        TypeKind::Struct(_) | TypeKind::Enum(_) => c_ident(env.name(id)),
        TypeKind::Bitmap(_) => c_ident(env.name(id)),
    })
}

/// Render one struct as a C typedef.
pub fn c_struct(env: &TypeEnv, name: &str, def: &StructDef) -> TypeResult<String> {
    let mut out = String::from("typedef struct {\n");
    for f in &def.fields {
        out.push_str(&format!("  {} {};\n", c_type_name(env, f.ty)?, f.name));
    }
    out.push_str(&format!("}} {};\n", c_ident(name)));
    Ok(out)
}

/// Render one enum as a tag + union typedef.
pub fn c_enum(env: &TypeEnv, name: &str, def: &EnumDef) -> TypeResult<String> {
    let mut out = String::from("typedef struct {\n  int64_t tag;\n  union {\n");
    for v in &def.variants {
        out.push_str(&format!("    {} {};\n", c_type_name(env, v.ty)?, v.name));
    }
    out.push_str(&format!("  }} v;\n}} {};\n", c_ident(name)));
    Ok(out)
}

/// Render one bitmap as a register typedef plus bits/mask defines.
pub fn c_bitmap(name: &str, def: &BitmapDef) -> String {
    let ident = c_ident(name);
    let mut out = format!("typedef uint32_t {};\n", ident);
    for (vname, var) in &def.variants {
        out.push_str(&format!("#define {}_{} 0x{:x}u\n", ident, vname, var.bits));
        out.push_str(&format!(
            "#define {}_{}_MSK 0x{:x}u\n",
            ident, vname, var.mask
        ));
    }
    out
}

/// Render a complete header for every schema-defined type, in
/// registration order (so definitions precede their uses).
pub fn c_header(env: &TypeEnv) -> TypeResult<String> {
    let mut out = String::from(C_PRELUDE);
    for (_, decl) in env.iter() {
        let rendered = match &decl.kind {
            TypeKind::Struct(def) => c_struct(env, &decl.name, def)?,
            TypeKind::Enum(def) => c_enum(env, &decl.name, def)?,
            TypeKind::Bitmap(def) => c_bitmap(&decl.name, def),
            TypeKind::Unresolved => {
                return Err(TypeError::UnresolvedForwardDeclaration(decl.name.clone()))
            }
            _ => continue, // builtins and interned generics have fixed carriers
        };
        out.push('\n');
        out.push_str(&rendered);
    }
    Ok(out)
}
