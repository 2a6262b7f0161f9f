//! Serializable descriptor summaries
//!
//! External generators consume the resolved registry as JSON instead of
//! linking against this crate. The summary is a flat, deterministic
//! projection of the arena in registration order.

use serde::Serialize;

use crate::types::{TypeEnv, TypeKind};

/// One registered type, flattened for interchange.
#[derive(Debug, Serialize)]
pub struct TypeSummary {
    pub name: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub val: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<VariantSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits: Option<Vec<BmVarSummary>>,
}

#[derive(Debug, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zid: Option<u32>,
    pub has_default: bool,
}

#[derive(Debug, Serialize)]
pub struct VariantSummary {
    pub name: String,
    pub ty: String,
}

#[derive(Debug, Serialize)]
pub struct BmVarSummary {
    pub name: String,
    pub bits: u32,
    pub mask: u32,
}

/// One registered constant; the value is rendered in literal form.
#[derive(Debug, Serialize)]
pub struct ConstSummary {
    pub name: String,
    pub ty: String,
    pub value: String,
}

fn base(name: &str, kind: &'static str) -> TypeSummary {
    TypeSummary {
        name: name.to_string(),
        kind,
        width: None,
        elem: None,
        key: None,
        val: None,
        fields: None,
        variants: None,
        bits: None,
    }
}

/// Summarize every registered type in registration order.
pub fn summarize(env: &TypeEnv) -> Vec<TypeSummary> {
    env.iter()
        .map(|(_, decl)| {
            let name = decl.name.as_str();
            match &decl.kind {
                TypeKind::Unresolved => base(name, "unresolved"),
                TypeKind::Int => base(name, "int"),
                TypeKind::Bytes => base(name, "bytes"),
                TypeKind::Fixed { width } => {
                    let mut s = base(name, "fixed");
                    s.width = Some(*width);
                    s
                }
                TypeKind::Arr { elem } => {
                    let mut s = base(name, "arr");
                    s.elem = Some(env.name(*elem).to_string());
                    s
                }
                TypeKind::Map { key, val } => {
                    let mut s = base(name, "map");
                    s.key = Some(env.name(*key).to_string());
                    s.val = Some(env.name(*val).to_string());
                    s
                }
                TypeKind::Struct(def) => {
                    let mut s = base(name, "struct");
                    s.fields = Some(
                        def.fields
                            .iter()
                            .map(|f| FieldSummary {
                                name: f.name.clone(),
                                ty: env.name(f.ty).to_string(),
                                zid: f.zid,
                                has_default: f.default.is_some(),
                            })
                            .collect(),
                    );
                    s
                }
                TypeKind::Enum(def) => {
                    let mut s = base(name, "enum");
                    s.variants = Some(
                        def.variants
                            .iter()
                            .map(|v| VariantSummary {
                                name: v.name.clone(),
                                ty: env.name(v.ty).to_string(),
                            })
                            .collect(),
                    );
                    s
                }
                TypeKind::Bitmap(def) => {
                    let mut s = base(name, "bitmap");
                    s.bits = Some(
                        def.variants
                            .iter()
                            .map(|(n, var)| BmVarSummary {
                                name: n.clone(),
                                bits: var.bits,
                                mask: var.mask,
                            })
                            .collect(),
                    );
                    s
                }
            }
        })
        .collect()
}

/// Summarize every registered constant in registration order.
pub fn summarize_consts(env: &TypeEnv) -> Vec<ConstSummary> {
    env.consts()
        .map(|c| ConstSummary {
            name: c.name.clone(),
            ty: env.name(c.ty).to_string(),
            value: c.value.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse_schema;

    #[test]
    fn test_summary_covers_declarations() {
        let env = parse_schema(
            b"struct A [ a: Int; b: Bytes zid 2 ];\n\
              enum E [ x: Int ];\n\
              bitmap B [ on 0x1 0x1 ];\n\
              const seven: Int = 7;",
        )
        .unwrap();

        let summaries = summarize(&env);
        let a = summaries.iter().find(|s| s.name == "A").unwrap();
        assert_eq!(a.kind, "struct");
        let fields = a.fields.as_ref().unwrap();
        assert_eq!(fields[1].zid, Some(2));

        let consts = summarize_consts(&env);
        assert_eq!(consts[0].name, "seven");
        assert_eq!(consts[0].value, "7");
    }

    #[test]
    fn test_summary_serializes() {
        let env = parse_schema(b"struct A [ a: Int ];").unwrap();
        let json = serde_json::to_string(&summarize(&env)).unwrap();
        assert!(json.contains("\"kind\":\"struct\""));
        // omitted options stay out of the wire
        assert!(!json.contains("\"width\":null"));
    }
}
