//! Schema compiler front end for zoa
//!
//! Per SCHEMA.md, schema source is a flat list of `;`-terminated
//! declarations compiled into a [`TypeEnv`](crate::types::TypeEnv).
//!
//! # Design Principles
//!
//! - One pass: the parser mutates the environment as it goes
//! - Forward references via `declare`d slots backfilled in place
//! - Value literals are type-directed and shared by consts, defaults,
//!   and the CLI
//! - Parse errors carry the source line

mod errors;
mod literals;
mod parser;
mod tokenizer;

pub use errors::{SchemaError, SchemaResult};
pub use parser::{parse_schema, Parser};
pub use tokenizer::Tokenizer;
