//! File and stream I/O for CLI commands
//!
//! - Schema source and wire bytes come from files or stdin
//! - Raw bytes go to files; hex goes to stdout
//! - stdout is reserved for command output, logs go to stderr

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use super::errors::{CliError, CliResult};

/// Read schema source bytes.
pub fn read_schema(path: &Path) -> CliResult<Vec<u8>> {
    fs::read(path).map_err(|e| CliError::io(path, e))
}

/// Value literal source: the `--value` argument, or stdin.
pub fn read_value_source(value: Option<String>) -> CliResult<Vec<u8>> {
    match value {
        Some(v) => Ok(v.into_bytes()),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(CliError::stdio)?;
            Ok(buf)
        }
    }
}

/// Wire input: a raw file, a hex string, or raw stdin.
pub fn read_wire_input(input: Option<&Path>, hex_str: Option<&str>) -> CliResult<Vec<u8>> {
    if let Some(path) = input {
        return fs::read(path).map_err(|e| CliError::io(path, e));
    }
    if let Some(h) = hex_str {
        let compact: String = h.chars().filter(|c| !c.is_whitespace()).collect();
        return Ok(hex::decode(compact)?);
    }
    let mut buf = Vec::new();
    io::stdin()
        .read_to_end(&mut buf)
        .map_err(CliError::stdio)?;
    Ok(buf)
}

/// Write wire bytes: raw to a file, hex to stdout.
pub fn write_wire_output(out: Option<&Path>, bytes: &[u8]) -> CliResult<()> {
    match out {
        Some(path) => fs::write(path, bytes).map_err(|e| CliError::io(path, e)),
        None => {
            let mut stdout = io::stdout();
            writeln!(stdout, "{}", hex::encode(bytes)).map_err(CliError::stdio)?;
            stdout.flush().map_err(CliError::stdio)
        }
    }
}

/// Write text output: to a file, or stdout.
pub fn write_text(out: Option<&Path>, text: &str) -> CliResult<()> {
    match out {
        Some(path) => fs::write(path, text).map_err(|e| CliError::io(path, e)),
        None => {
            let mut stdout = io::stdout();
            stdout
                .write_all(text.as_bytes())
                .map_err(CliError::stdio)?;
            stdout.flush().map_err(CliError::stdio)
        }
    }
}
