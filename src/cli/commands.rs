//! CLI command implementations
//!
//! Every command loads and parses the schema first, then works against
//! the resolved [`TypeEnv`] read-only. Command output (headers, JSON,
//! hex) goes to stdout; structured logs go to stderr.

use std::path::Path;

use serde_json::json;

use crate::codegen;
use crate::observability::Logger;
use crate::raw::decode_prefix;
use crate::schema::Parser;
use crate::types::{self, TypeEnv, TypeKind};

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{
    read_schema, read_value_source, read_wire_input, write_text, write_wire_output,
};

/// Parse arguments and dispatch.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a single command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Check { schema, module } => check(&schema, module.as_deref()),
        Command::Export {
            schema,
            module,
            out,
        } => export(&schema, module.as_deref(), out.as_deref()),
        Command::Types { schema, module } => dump_types(&schema, module.as_deref()),
        Command::Encode {
            schema,
            ty,
            value,
            out,
            module,
        } => encode(&schema, module.as_deref(), &ty, value, out.as_deref()),
        Command::Decode {
            schema,
            ty,
            input,
            hex,
            module,
        } => decode(
            &schema,
            module.as_deref(),
            &ty,
            input.as_deref(),
            hex.as_deref(),
        ),
    }
}

/// Load and parse a schema file into a fresh environment.
fn load_env(schema: &Path, module: Option<&str>) -> CliResult<TypeEnv> {
    let src = read_schema(schema)?;
    let mut env = TypeEnv::new();
    let mut parser = match module {
        Some(m) => Parser::with_module(&src, m),
        None => Parser::new(&src),
    };
    parser.parse_into(&mut env)?;

    let unresolved = env.unresolved();
    if !unresolved.is_empty() {
        Logger::warn(
            "SCHEMA_UNRESOLVED",
            &[("names", unresolved.join(",").as_str())],
        );
    }
    Logger::info(
        "SCHEMA_PARSED",
        &[
            ("path", schema.display().to_string().as_str()),
            ("types", env.iter().count().to_string().as_str()),
            ("consts", env.consts().count().to_string().as_str()),
        ],
    );
    Ok(env)
}

/// `zoa check`: parse and print a one-line summary.
pub fn check(schema: &Path, module: Option<&str>) -> CliResult<()> {
    let env = load_env(schema, module)?;
    let mut structs = 0;
    let mut enums = 0;
    let mut bitmaps = 0;
    for (_, decl) in env.iter() {
        match decl.kind {
            TypeKind::Struct(_) => structs += 1,
            TypeKind::Enum(_) => enums += 1,
            TypeKind::Bitmap(_) => bitmaps += 1,
            _ => {}
        }
    }
    println!(
        "ok: {} structs, {} enums, {} bitmaps, {} consts",
        structs,
        enums,
        bitmaps,
        env.consts().count()
    );
    Ok(())
}

/// `zoa export`: render a C header.
pub fn export(schema: &Path, module: Option<&str>, out: Option<&Path>) -> CliResult<()> {
    let env = load_env(schema, module)?;
    let header = codegen::c_header(&env)?;
    write_text(out, &header)?;
    if let Some(path) = out {
        Logger::info(
            "EXPORT_WRITTEN",
            &[
                ("path", path.display().to_string().as_str()),
                ("bytes", header.len().to_string().as_str()),
            ],
        );
    }
    Ok(())
}

/// `zoa types`: dump resolved descriptors as JSON.
pub fn dump_types(schema: &Path, module: Option<&str>) -> CliResult<()> {
    let env = load_env(schema, module)?;
    let dump = json!({
        "types": codegen::summarize(&env),
        "consts": codegen::summarize_consts(&env),
    });
    let mut text = serde_json::to_string_pretty(&dump)?;
    text.push('\n');
    write_text(None, &text)
}

/// `zoa encode`: value literal -> wire bytes.
pub fn encode(
    schema: &Path,
    module: Option<&str>,
    ty: &str,
    value: Option<String>,
    out: Option<&Path>,
) -> CliResult<()> {
    let env = load_env(schema, module)?;
    let id = env.resolve(ty)?;
    let src = read_value_source(value)?;
    let literal = Parser::new(&src).parse_literal(&env, id)?;
    let node = types::encode(&env, id, &literal)?;
    let wire = node.to_wire();
    write_wire_output(out, &wire)?;
    Logger::info(
        "ENCODE_OK",
        &[("type", ty), ("bytes", wire.len().to_string().as_str())],
    );
    Ok(())
}

/// `zoa decode`: wire bytes -> value literal on stdout.
pub fn decode(
    schema: &Path,
    module: Option<&str>,
    ty: &str,
    input: Option<&Path>,
    hex_str: Option<&str>,
) -> CliResult<()> {
    let env = load_env(schema, module)?;
    let id = env.resolve(ty)?;
    let wire = read_wire_input(input, hex_str)?;
    let (node, used) = decode_prefix(&wire)?;
    let value = types::decode(&env, id, &node)?;
    println!("{}", value);
    Logger::info(
        "DECODE_OK",
        &[("type", ty), ("bytes", used.to_string().as_str())],
    );
    Ok(())
}
