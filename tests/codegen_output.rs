//! Code Generation and CLI Output Tests
//!
//! The generators consume a resolved environment read-only: headers and
//! descriptor dumps must reflect exactly what the schema declared.
//! CLI-level tests run commands against schema files on disk.

use std::fs;

use tempfile::TempDir;

use zoa::cli;
use zoa::codegen;
use zoa::raw::RawNode;
use zoa::schema::parse_schema;
use zoa::types::{self, StructValue, Value};

// =============================================================================
// Test Utilities
// =============================================================================

const SAMPLE_SCHEMA: &str = "\
struct Point [ x: Int; y: Int ];
enum Shape [ dot: Point; raw: Bytes ];
bitmap Style [ bold 0x1 0x1; thin 0x0 0x1 ];
const unit: Point = {x = 1 y = 1};
";

fn write_schema(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("sample.zoa");
    fs::write(&path, SAMPLE_SCHEMA).unwrap();
    path
}

// =============================================================================
// C header generation
// =============================================================================

#[test]
fn test_c_header_contains_all_declarations() {
    let env = parse_schema(SAMPLE_SCHEMA.as_bytes()).unwrap();
    let header = codegen::c_header(&env).unwrap();

    assert!(header.starts_with("#include <stdint.h>"));
    assert!(header.contains("} Point;"));
    assert!(header.contains("Point dot;"));
    assert!(header.contains("zoa_bytes raw;"));
    assert!(header.contains("typedef uint32_t Style;"));
    assert!(header.contains("#define Style_bold 0x1u"));
    assert!(header.contains("#define Style_thin_MSK 0x1u"));
}

#[test]
fn test_header_order_definitions_before_uses() {
    let env = parse_schema(SAMPLE_SCHEMA.as_bytes()).unwrap();
    let header = codegen::c_header(&env).unwrap();
    let point = header.find("} Point;").unwrap();
    let shape = header.find("} Shape;").unwrap();
    assert!(point < shape);
}

// =============================================================================
// Descriptor summaries
// =============================================================================

#[test]
fn test_summary_json_round() {
    let env = parse_schema(SAMPLE_SCHEMA.as_bytes()).unwrap();
    let json = serde_json::to_string(&codegen::summarize(&env)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let types = parsed.as_array().unwrap();
    let point = types
        .iter()
        .find(|t| t["name"] == "Point")
        .expect("Point summarized");
    assert_eq!(point["kind"], "struct");
    assert_eq!(point["fields"][0]["name"], "x");

    let consts = codegen::summarize_consts(&env);
    assert_eq!(consts[0].name, "unit");
    assert_eq!(consts[0].ty, "Point");
}

// =============================================================================
// CLI commands against files on disk
// =============================================================================

#[test]
fn test_cli_export_writes_header() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);
    let out = dir.path().join("sample.h");

    cli::export(&schema, None, Some(out.as_path())).unwrap();

    let header = fs::read_to_string(&out).unwrap();
    assert!(header.contains("} Point;"));
}

#[test]
fn test_cli_encode_writes_wire_bytes() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);
    let out = dir.path().join("point.bin");

    cli::encode(
        &schema,
        None,
        "Point",
        Some("{x = 1 y = 2}".to_string()),
        Some(out.as_path()),
    )
    .unwrap();

    let wire = fs::read(&out).unwrap();
    let env = parse_schema(SAMPLE_SCHEMA.as_bytes()).unwrap();
    let id = env.resolve("Point").unwrap();
    let node = RawNode::from_wire(&wire).unwrap();
    let expected = Value::Struct(StructValue::positional(vec![
        Value::Int(1),
        Value::Int(2),
    ]));
    assert_eq!(types::decode(&env, id, &node).unwrap(), expected);
}

#[test]
fn test_cli_check_rejects_bad_schema() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.zoa");
    fs::write(&path, "struct A [ a: Nope ];").unwrap();
    assert!(cli::check(&path, None).is_err());
}

#[test]
fn test_cli_module_qualification() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir);
    let out = dir.path().join("geo.h");

    cli::export(&schema, Some("geo"), Some(out.as_path())).unwrap();

    let header = fs::read_to_string(&out).unwrap();
    assert!(header.contains("} geo_Point;"));
}
