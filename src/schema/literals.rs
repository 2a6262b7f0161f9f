//! Value literal parsing
//!
//! Per SCHEMA.md §5, literals are type-directed: the declared type picks
//! the interpretation of the source text, so the same brace syntax reads
//! as hex bytes, an array, a map, or a struct depending on the target.
//! The same sublanguage serves `const` statements, field defaults, and
//! the CLI `encode` command.

use crate::types::{
    BitmapDef, EnumDef, EnumValue, StructDef, StructValue, TypeEnv, TypeError, TypeId, TypeKind,
    Value, ValueMap, MAX_MAGNITUDE,
};

use super::errors::{SchemaError, SchemaResult};
use super::parser::Parser;

impl<'a> Parser<'a> {
    /// Parse one literal of the declared type `ty`.
    pub fn parse_literal(&mut self, env: &TypeEnv, ty: TypeId) -> SchemaResult<Value> {
        match env.kind(ty) {
            TypeKind::Unresolved => Err(SchemaError::Type(
                TypeError::UnresolvedForwardDeclaration(env.name(ty).to_string()),
            )),
            TypeKind::Int | TypeKind::Fixed { .. } => self.parse_int_literal(),
            TypeKind::Bytes => self.parse_bytes_literal().map(Value::Bytes),
            TypeKind::Arr { elem } => self.parse_arr_literal(env, *elem),
            TypeKind::Map { key, val } => self.parse_map_literal(env, *key, *val),
            TypeKind::Struct(def) => self.parse_struct_literal(env, def),
            TypeKind::Enum(def) => self.parse_enum_literal(env, def),
            TypeKind::Bitmap(def) => self.parse_bitmap_literal(def),
        }
    }

    /// Integer literal: a bare decimal/hex token, or the sign-capable
    /// braced form `{-0x42}`.
    fn parse_int_literal(&mut self) -> SchemaResult<Value> {
        let t = self.token()?;
        let (negative, magnitude) = if t == b"{" {
            let mut t = self.token()?;
            let negative = t == b"-";
            if negative {
                t = self.token()?;
            }
            let m = self.parse_uint(t)?;
            self.expect("}")?;
            (negative, m)
        } else {
            (false, self.parse_uint(t)?)
        };
        if magnitude > MAX_MAGNITUDE {
            return Err(SchemaError::Type(TypeError::MagnitudeOverflow {
                value: magnitude.min(i64::MAX as u64) as i64,
                max: MAX_MAGNITUDE,
            }));
        }
        let v = magnitude as i64;
        Ok(Value::Int(if negative { -v } else { v }))
    }

    /// Bytes literal: `{ hex byte pairs }` or a `|` block string.
    fn parse_bytes_literal(&mut self) -> SchemaResult<Vec<u8>> {
        let t = self.token()?;
        match t {
            b"{" => {
                let mut out = Vec::new();
                loop {
                    let t = self.token()?;
                    if t == b"}" {
                        return Ok(out);
                    }
                    self.hex_token_into(t, &mut out)?;
                }
            }
            b"|" => self.parse_block_string(),
            other => Err(self.err(format!(
                "expected bytes literal, got '{}'",
                String::from_utf8_lossy(other)
            ))),
        }
    }

    fn hex_token_into(&self, t: &[u8], out: &mut Vec<u8>) -> SchemaResult<()> {
        if t.len() % 2 != 0 {
            return Err(self.err(format!(
                "hex run '{}' has an odd number of digits",
                String::from_utf8_lossy(t)
            )));
        }
        for pair in t.chunks(2) {
            let hi = hex_val(pair[0]);
            let lo = hex_val(pair[1]);
            match (hi, lo) {
                (Some(hi), Some(lo)) => out.push(hi << 4 | lo),
                _ => {
                    return Err(self.err(format!(
                        "invalid hex byte '{}'",
                        String::from_utf8_lossy(pair)
                    )))
                }
            }
        }
        Ok(())
    }

    /// Block string: `|` to end of line; following lines whose first
    /// non-blank byte is `|` continue it with the margin stripped,
    /// joined by a newline unless the previous line ended with `\`.
    fn parse_block_string(&mut self) -> SchemaResult<Vec<u8>> {
        let mut out = Vec::new();
        let mut join_newline = false;
        loop {
            let mut line = self.tok.rest_of_line().to_vec();
            let continued = line.last() == Some(&b'\\');
            if continued {
                line.pop();
            }
            if join_newline {
                out.push(b'\n');
            }
            out.extend_from_slice(&line);
            join_newline = !continued;

            let save = self.tok.save();
            if !self.tok.take_margin_byte(b'|') {
                self.tok.restore(save);
                return Ok(out);
            }
        }
    }

    fn parse_arr_literal(&mut self, env: &TypeEnv, elem: TypeId) -> SchemaResult<Value> {
        self.expect("{")?;
        let mut items = Vec::new();
        loop {
            if self.eat("}") {
                return Ok(Value::Arr(items));
            }
            items.push(self.parse_literal(env, elem)?);
            self.eat(",");
        }
    }

    fn parse_map_literal(
        &mut self,
        env: &TypeEnv,
        key: TypeId,
        val: TypeId,
    ) -> SchemaResult<Value> {
        self.expect("{")?;
        let mut map = ValueMap::new();
        loop {
            if self.eat("}") {
                return Ok(Value::Map(map));
            }
            let k = self.parse_literal(env, key)?;
            self.expect("=")?;
            let v = self.parse_literal(env, val)?;
            map.insert(k, v);
            self.eat(",");
        }
    }

    /// Struct literal `{ field = value ... }`; omitted fields fall back
    /// to declared defaults, and a positional field may stay unset only
    /// as part of the trailing suffix.
    fn parse_struct_literal(&mut self, env: &TypeEnv, def: &StructDef) -> SchemaResult<Value> {
        self.expect("{")?;
        let mut sv = StructValue::unset(def.fields.len());
        loop {
            if self.eat("}") {
                break;
            }
            let fname = self.ident()?;
            let idx = def
                .field_by_name(&fname)
                .ok_or_else(|| self.err(format!("unknown field '{}'", fname)))?;
            self.expect("=")?;
            sv.fields[idx] = Some(self.parse_literal(env, def.fields[idx].ty)?);
            self.eat(",");
        }

        for (i, f) in def.fields.iter().enumerate() {
            if sv.fields[i].is_none() {
                if let Some(d) = &f.default {
                    sv.fields[i] = Some(d.clone());
                }
            }
        }

        let mut omitted = false;
        for i in def.positional() {
            match &sv.fields[i] {
                Some(_) if omitted => {
                    return Err(SchemaError::Type(TypeError::PositionalGap(
                        def.fields[i].name.clone(),
                    )))
                }
                Some(_) => {}
                None => omitted = true,
            }
        }
        Ok(Value::Struct(sv))
    }

    /// Enum literal: `variantName literal` (no braces).
    fn parse_enum_literal(&mut self, env: &TypeEnv, def: &EnumDef) -> SchemaResult<Value> {
        let vname = self.ident()?;
        let idx = def
            .variant_by_name(&vname)
            .ok_or_else(|| self.err(format!("unknown variant '{}'", vname)))?;
        let v = self.parse_literal(env, def.variants[idx].ty)?;
        Ok(Value::Enum(EnumValue::new(idx, v)))
    }

    /// Bitmap literal: a numeric register value, or one variant's name
    /// standing for its declared bits.
    fn parse_bitmap_literal(&mut self, def: &BitmapDef) -> SchemaResult<Value> {
        let t = self.token()?;
        if t.first().is_some_and(u8::is_ascii_digit) {
            let v = self.parse_uint(t)?;
            let reg = u32::try_from(v)
                .map_err(|_| self.err(format!("register {:#x} does not fit 32 bits", v)))?;
            return Ok(Value::Bitmap(reg));
        }
        let name = String::from_utf8_lossy(t);
        let var = def.variant(&name).map_err(SchemaError::Type)?;
        Ok(Value::Bitmap(var.bits))
    }
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
