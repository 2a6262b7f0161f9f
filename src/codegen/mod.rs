//! Code generation backends
//!
//! Consumers of a resolved [`TypeEnv`](crate::types::TypeEnv): they run
//! only after schema parsing completes, never re-parse source, and never
//! mutate the environment.

mod c;
mod summary;

pub use c::{c_bitmap, c_enum, c_header, c_struct, C_PRELUDE};
pub use summary::{
    summarize, summarize_consts, BmVarSummary, ConstSummary, FieldSummary, TypeSummary,
    VariantSummary,
};
