//! zoa - a strict, self-describing binary encoding with a typed schema
//! compiler
//!
//! See FORMAT.md for the wire format and SCHEMA.md for the schema
//! language.

pub mod cli;
pub mod codegen;
pub mod observability;
pub mod raw;
pub mod schema;
pub mod types;
