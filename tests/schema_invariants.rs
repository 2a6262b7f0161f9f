//! Schema Compiler Invariant Tests
//!
//! Tests for SCHEMA.md invariants:
//! - Token classes: digit/hex/alpha merge, delimiters stand alone
//! - Forward declarations resolve by backfill, duplicates are errors
//! - Value literals are type-directed and shared with defaults/consts
//! - Parse errors carry the source line

use zoa::schema::{parse_schema, Parser, SchemaError, Tokenizer};
use zoa::types::{EnumValue, StructValue, TypeEnv, TypeError, TypeKind, Value};

// =============================================================================
// Test Utilities
// =============================================================================

fn tokens(src: &str) -> Vec<String> {
    let mut tok = Tokenizer::new(src.as_bytes());
    let mut out = Vec::new();
    while let Some(t) = tok.next() {
        out.push(String::from_utf8(t.to_vec()).unwrap());
    }
    out
}

fn literal_of(env: &TypeEnv, ty: &str, src: &str) -> Value {
    let id = env.resolve(ty).unwrap();
    Parser::new(src.as_bytes()).parse_literal(env, id).unwrap()
}

// =============================================================================
// Tokenizer
// =============================================================================

#[test]
fn test_token_classes() {
    assert_eq!(
        tokens("a_b[foo.bar baz]"),
        vec!["a_b", "[", "foo.bar", "baz", "]"]
    );
    assert_eq!(tokens("0xFF 42 x9"), vec!["0xFF", "42", "x9"]);
    assert_eq!(
        tokens("a:{b}=c;"),
        vec!["a", ":", "{", "b", "}", "=", "c", ";"]
    );
}

#[test]
fn test_comments_are_whitespace() {
    assert_eq!(tokens("a \\ to end of line\nb"), vec!["a", "b"]);
    assert_eq!(tokens("a \\(balanced (inner) done) b"), vec!["a", "b"]);
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn test_full_schema_compiles() {
    let env = parse_schema(
        b"\\ exercise every statement kind
          declare Node;
          struct Node [ name: Bytes; kids: Arr[Node]; meta: Map[Bytes, Int] zid 1 ];
          enum Shape [ point: Int; blob: Bytes; node: Node ];
          bitmap Flags [ ro 0x1 0x1; hidden 0x2 0x2 ];
          const origin: Int = 0;",
    )
    .unwrap();

    assert!(env.unresolved().is_empty());
    assert!(env.lookup("Arr[Node]").is_some());
    assert!(env.lookup("Map[Bytes, Int]").is_some());
    assert!(env.constant("origin").is_some());

    let node = env.resolve("Node").unwrap();
    let TypeKind::Struct(def) = env.kind(node) else {
        panic!("not a struct")
    };
    assert_eq!(def.fields[1].name, "kids");
    assert_eq!(def.fields[2].zid, Some(1));
}

#[test]
fn test_self_reference_through_declare() {
    // a recursive type: the struct's field refers to its own slot
    let env = parse_schema(b"declare T; struct T [ kids: Arr[T] ];").unwrap();
    assert!(env.unresolved().is_empty());
}

#[test]
fn test_duplicate_type_name_rejected() {
    let err = parse_schema(b"struct A [ a: Int ]; struct A [ b: Int ];").unwrap_err();
    assert_eq!(
        err,
        SchemaError::Type(TypeError::DuplicateTypeName("A".into()))
    );
}

#[test]
fn test_parse_error_carries_line() {
    let err = parse_schema(b"struct A [ a: Int ];\n\nnonsense B;").unwrap_err();
    let SchemaError::Parse { line, .. } = err else {
        panic!("expected a parse error")
    };
    assert_eq!(line, 3);
}

#[test]
fn test_unknown_type_rejected() {
    assert!(matches!(
        parse_schema(b"struct A [ a: Missing ];"),
        Err(SchemaError::Parse { .. })
    ));
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_const_literals() {
    let env = parse_schema(
        b"const answer: Int = 0x2a;
          const debt: Int = {-7};
          const greeting: Bytes = {68 69};",
    )
    .unwrap();
    assert_eq!(env.constant("answer").unwrap().value, Value::Int(42));
    assert_eq!(env.constant("debt").unwrap().value, Value::Int(-7));
    assert_eq!(
        env.constant("greeting").unwrap().value,
        Value::bytes(b"hi".as_slice())
    );
}

#[test]
fn test_block_string_literal() {
    let env = parse_schema(
        b"const banner: Bytes = |line one
                                |line two
          ;
          const joined: Bytes = |left\\
                                |right
          ;",
    )
    .unwrap();
    assert_eq!(
        env.constant("banner").unwrap().value,
        Value::bytes(b"line one\nline two".as_slice())
    );
    assert_eq!(
        env.constant("joined").unwrap().value,
        Value::bytes(b"leftright".as_slice())
    );
}

#[test]
fn test_struct_literal_with_defaults() {
    let env = parse_schema(b"struct S [ a: Int; b: Int = 9; c: Bytes zid 2 ];").unwrap();
    let Value::Struct(sv) = literal_of(&env, "S", "{a = 1 c = {00}}") else {
        panic!("not a struct")
    };
    assert_eq!(sv.fields[0], Some(Value::Int(1)));
    assert_eq!(sv.fields[1], Some(Value::Int(9)));
    assert_eq!(sv.fields[2], Some(Value::bytes(vec![0x00])));
}

#[test]
fn test_struct_literal_gap_rejected() {
    let env = parse_schema(b"struct S [ a: Int; b: Int ];").unwrap();
    let id = env.resolve("S").unwrap();
    let err = Parser::new(b"{b = 2}").parse_literal(&env, id).unwrap_err();
    assert_eq!(err, SchemaError::Type(TypeError::PositionalGap("b".into())));
}

#[test]
fn test_enum_literal_no_braces() {
    let env = parse_schema(b"enum E [ a: Int; b: Bytes ];").unwrap();
    assert_eq!(
        literal_of(&env, "E", "a 5"),
        Value::Enum(EnumValue::new(0, Value::Int(5)))
    );
    assert_eq!(
        literal_of(&env, "E", "b {6869}"),
        Value::Enum(EnumValue::new(1, Value::bytes(b"hi".as_slice())))
    );
}

#[test]
fn test_nested_container_literal() {
    let env = parse_schema(b"struct S [ rows: Arr[Arr[Int]] ];").unwrap();
    let v = literal_of(&env, "S", "{rows = {{1 2} {3}}}");
    let expected = Value::Struct(StructValue::positional(vec![Value::Arr(vec![
        Value::Arr(vec![Value::Int(1), Value::Int(2)]),
        Value::Arr(vec![Value::Int(3)]),
    ])]));
    assert_eq!(v, expected);
}

// =============================================================================
// Default values feed encoding
// =============================================================================

#[test]
fn test_default_applied_then_encoded() {
    let env = parse_schema(b"struct S [ a: Int = 3 ];").unwrap();
    let id = env.resolve("S").unwrap();
    let v = Parser::new(b"{}").parse_literal(&env, id).unwrap();
    let node = zoa::types::encode(&env, id, &v).unwrap();
    let children = node.as_arr().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].as_data(), Some(b"\x03".as_slice()));
}
