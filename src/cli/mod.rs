//! CLI module for zoa
//!
//! Provides the command-line interface for:
//! - check: parse a schema and summarize it
//! - export: generate a C header
//! - types: dump resolved descriptors as JSON
//! - encode: value literal to wire bytes
//! - decode: wire bytes to a value literal

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, decode, dump_types, encode, export, run, run_command};
pub use errors::{CliError, CliResult};
