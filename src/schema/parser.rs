//! Schema statement parser
//!
//! Recursive descent over the token stream, populating a [`TypeEnv`].
//! Per SCHEMA.md §4 the grammar is a flat list of `;`-terminated
//! statements:
//!
//! ```text
//! declare Name;
//! struct Name [ field; field ];     field = name: Type (zid N)? (= lit)?
//! enum Name [ name: Type; ... ];
//! bitmap Name [ name bits mask; ... ];
//! const name: Type = lit;
//! ```
//!
//! Forward references resolve through `declare`d slots; definitions
//! backfill those slots in place.

use crate::types::{
    BitmapDef, BmVar, EnumDef, FieldDef, StructDef, TypeEnv, TypeId, VariantDef,
};

use super::errors::{SchemaError, SchemaResult};
use super::tokenizer::Tokenizer;

const DELIMS: &[u8] = b"[]{};:=,|";

/// Parser over one schema source buffer.
pub struct Parser<'a> {
    pub(crate) tok: Tokenizer<'a>,
    module: Option<String>,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self {
            tok: Tokenizer::new(src),
            module: None,
        }
    }

    /// Parser that registers every definition under `module.` qualified
    /// names.
    pub fn with_module(src: &'a [u8], module: impl Into<String>) -> Self {
        Self {
            tok: Tokenizer::new(src),
            module: Some(module.into()),
        }
    }

    /// Parse every statement in the buffer into `env`.
    pub fn parse_into(&mut self, env: &mut TypeEnv) -> SchemaResult<()> {
        while let Some(word) = self.tok.next() {
            match word {
                b"declare" => self.parse_declare(env)?,
                b"struct" => self.parse_struct(env)?,
                b"enum" => self.parse_enum(env)?,
                b"bitmap" => self.parse_bitmap(env)?,
                b"const" => self.parse_const(env)?,
                other => {
                    return Err(self.err(format!(
                        "unknown statement '{}'",
                        String::from_utf8_lossy(other)
                    )))
                }
            }
        }
        Ok(())
    }

    pub(crate) fn err(&self, msg: impl Into<String>) -> SchemaError {
        SchemaError::parse(self.tok.line(), msg)
    }

    /// Next token, failing at end of input.
    pub(crate) fn token(&mut self) -> SchemaResult<&'a [u8]> {
        self.tok
            .next()
            .ok_or_else(|| SchemaError::parse(self.tok.line(), "unexpected end of input"))
    }

    /// Next token as an owned identifier (any non-delimiter token).
    pub(crate) fn ident(&mut self) -> SchemaResult<String> {
        let t = self.token()?;
        if t.len() == 1 && DELIMS.contains(&t[0]) {
            return Err(self.err(format!(
                "expected a name, got '{}'",
                String::from_utf8_lossy(t)
            )));
        }
        String::from_utf8(t.to_vec()).map_err(|_| self.err("name is not valid UTF-8"))
    }

    /// Consume the exact token `s` or fail.
    pub(crate) fn expect(&mut self, s: &str) -> SchemaResult<()> {
        let t = self.token()?;
        if t != s.as_bytes() {
            return Err(self.err(format!(
                "expected '{}', got '{}'",
                s,
                String::from_utf8_lossy(t)
            )));
        }
        Ok(())
    }

    pub(crate) fn peek_is(&mut self, s: &str) -> bool {
        self.tok.peek() == Some(s.as_bytes())
    }

    /// Consume the token `s` when it is next.
    pub(crate) fn eat(&mut self, s: &str) -> bool {
        if self.peek_is(s) {
            self.tok.next();
            true
        } else {
            false
        }
    }

    /// Unsigned integer token: decimal or `0x` hex.
    pub(crate) fn parse_uint(&self, t: &[u8]) -> SchemaResult<u64> {
        let s = std::str::from_utf8(t).map_err(|_| self.err("invalid integer"))?;
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse::<u64>(),
        };
        parsed.map_err(|_| self.err(format!("invalid integer '{}'", s)))
    }

    fn parse_u32(&self, t: &[u8]) -> SchemaResult<u32> {
        let v = self.parse_uint(t)?;
        u32::try_from(v).map_err(|_| self.err(format!("integer {:#x} does not fit 32 bits", v)))
    }

    fn qualify(&self, name: &str) -> String {
        match &self.module {
            Some(m) => format!("{}.{}", m, name),
            None => name.to_string(),
        }
    }

    /// Resolve a type name against the module-qualified then plain
    /// namespace.
    fn resolve_type(&self, env: &TypeEnv, name: &str) -> SchemaResult<TypeId> {
        if let Some(m) = &self.module {
            if let Some(id) = env.lookup(&format!("{}.{}", m, name)) {
                return Ok(id);
            }
        }
        env.lookup(name)
            .ok_or_else(|| self.err(format!("unknown type '{}'", name)))
    }

    /// TypeRef: a name, `Arr[T]`, or `Map[K, V]`.
    pub(crate) fn parse_type_ref(&mut self, env: &mut TypeEnv) -> SchemaResult<TypeId> {
        let t = self.ident()?;
        match t.as_str() {
            "Arr" => {
                self.expect("[")?;
                let elem = self.parse_type_ref(env)?;
                self.expect("]")?;
                Ok(env.arr(elem))
            }
            "Map" => {
                self.expect("[")?;
                let key = self.parse_type_ref(env)?;
                self.eat(",");
                let val = self.parse_type_ref(env)?;
                self.expect("]")?;
                Ok(env.map(key, val))
            }
            name => self.resolve_type(env, name),
        }
    }

    fn parse_declare(&mut self, env: &mut TypeEnv) -> SchemaResult<()> {
        let name = self.ident()?;
        self.expect(";")?;
        env.declare(&self.qualify(&name))?;
        Ok(())
    }

    fn parse_field(&mut self, env: &mut TypeEnv) -> SchemaResult<FieldDef> {
        let name = self.ident()?;
        self.expect(":")?;
        let ty = self.parse_type_ref(env)?;
        let mut zid = None;
        if self.eat("zid") {
            let t = self.token()?;
            zid = Some(self.parse_u32(t)?);
        }
        let mut default = None;
        if self.eat("=") {
            default = Some(self.parse_literal(env, ty)?);
        }
        Ok(FieldDef {
            name,
            ty,
            zid,
            default,
        })
    }

    fn parse_struct(&mut self, env: &mut TypeEnv) -> SchemaResult<()> {
        let name = self.ident()?;
        self.expect("[")?;
        let mut fields = Vec::new();
        loop {
            if self.peek_is("]") {
                break;
            }
            fields.push(self.parse_field(env)?);
            if !self.eat(";") {
                break;
            }
        }
        self.expect("]")?;
        self.eat(";");
        let def = StructDef::new(fields)?;
        env.define_struct(&self.qualify(&name), def)?;
        Ok(())
    }

    fn parse_enum(&mut self, env: &mut TypeEnv) -> SchemaResult<()> {
        let name = self.ident()?;
        self.expect("[")?;
        let mut variants = Vec::new();
        loop {
            if self.peek_is("]") {
                break;
            }
            let vname = self.ident()?;
            self.expect(":")?;
            let ty = self.parse_type_ref(env)?;
            variants.push(VariantDef { name: vname, ty });
            if !self.eat(";") {
                break;
            }
        }
        self.expect("]")?;
        self.eat(";");
        let def = EnumDef::new(variants)?;
        env.define_enum(&self.qualify(&name), def)?;
        Ok(())
    }

    fn parse_bitmap(&mut self, env: &mut TypeEnv) -> SchemaResult<()> {
        let name = self.ident()?;
        self.expect("[")?;
        let mut variants = Vec::new();
        loop {
            if self.peek_is("]") {
                break;
            }
            let vname = self.ident()?;
            let bits_tok = self.token()?;
            let bits = self.parse_u32(bits_tok)?;
            let mask_tok = self.token()?;
            let mask = self.parse_u32(mask_tok)?;
            variants.push((vname, BmVar { bits, mask }));
            if !self.eat(";") {
                break;
            }
        }
        self.expect("]")?;
        self.eat(";");
        let def = BitmapDef::new(variants)?;
        env.define_bitmap(&self.qualify(&name), def)?;
        Ok(())
    }

    fn parse_const(&mut self, env: &mut TypeEnv) -> SchemaResult<()> {
        let name = self.ident()?;
        self.expect(":")?;
        let ty = self.parse_type_ref(env)?;
        self.expect("=")?;
        let value = self.parse_literal(env, ty)?;
        self.expect(";")?;
        env.define_const(&self.qualify(&name), ty, value)?;
        Ok(())
    }
}

/// Parse a complete schema source into a fresh environment.
pub fn parse_schema(src: &[u8]) -> SchemaResult<TypeEnv> {
    let mut env = TypeEnv::new();
    Parser::new(src).parse_into(&mut env)?;
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TypeKind, Value};

    #[test]
    fn test_struct_statement() {
        let env = parse_schema(b"struct A [ a: Int; b: Bytes ];").unwrap();
        let id = env.lookup("A").unwrap();
        let TypeKind::Struct(def) = env.kind(id) else {
            panic!("not a struct")
        };
        assert_eq!(def.fields.len(), 2);
        assert_eq!(def.fields[0].name, "a");
        assert_eq!(env.name(def.fields[1].ty), "Bytes");
    }

    #[test]
    fn test_keyed_field_and_default() {
        let env = parse_schema(b"struct A [ a: Int = 7; b: Int zid 0x3 ];").unwrap();
        let id = env.lookup("A").unwrap();
        let TypeKind::Struct(def) = env.kind(id) else {
            panic!("not a struct")
        };
        assert_eq!(def.fields[0].default, Some(Value::Int(7)));
        assert_eq!(def.fields[1].zid, Some(3));
    }

    #[test]
    fn test_forward_declaration_resolves() {
        let env =
            parse_schema(b"declare E; struct A [ e: E ]; enum E [ a: Int ];").unwrap();
        let e = env.lookup("E").unwrap();
        assert!(matches!(env.kind(e), TypeKind::Enum(_)));
        let a = env.lookup("A").unwrap();
        let TypeKind::Struct(def) = env.kind(a) else {
            panic!("not a struct")
        };
        assert_eq!(def.fields[0].ty, e);
        assert!(env.unresolved().is_empty());
    }

    #[test]
    fn test_generic_type_refs() {
        let env = parse_schema(b"struct A [ xs: Arr[Int]; kv: Map[Int, Bytes] ];").unwrap();
        assert!(env.lookup("Arr[Int]").is_some());
        assert!(env.lookup("Map[Int, Bytes]").is_some());
    }

    #[test]
    fn test_module_qualification() {
        let mut env = TypeEnv::new();
        Parser::with_module(b"struct A [ a: Int ]; struct B [ a: A ];", "m")
            .parse_into(&mut env)
            .unwrap();
        let a = env.lookup("m.A").unwrap();
        let b = env.lookup("m.B").unwrap();
        let TypeKind::Struct(def) = env.kind(b) else {
            panic!("not a struct")
        };
        assert_eq!(def.fields[0].ty, a);
    }

    #[test]
    fn test_unknown_type_reports_line() {
        let err = parse_schema(b"struct A [\n  a: Nope\n];").unwrap_err();
        assert_eq!(err, SchemaError::parse(2, "unknown type 'Nope'"));
    }

    #[test]
    fn test_missing_terminator_rejected() {
        assert!(parse_schema(b"declare E").is_err());
        assert!(parse_schema(b"const a: Int = 1").is_err());
        // the closing bracket already ends a bracketed statement
        assert!(parse_schema(b"struct A [ a: Int ]").is_ok());
    }

    #[test]
    fn test_comments_anywhere() {
        let src = b"\\ leading comment\nstruct A [ \\(inline (nested))\n a: Int ];";
        assert!(parse_schema(src).is_ok());
    }
}
