//! Observability for the zoa compiler
//!
//! Structured JSON logging for CLI-level events. The core codec and
//! parser stay pure; only the command layer logs.
//!
//! # Principles
//!
//! 1. One log line = one event
//! 2. Deterministic key ordering
//! 3. Synchronous, no buffering, no background threads

mod logger;

pub use logger::{Logger, Severity};
