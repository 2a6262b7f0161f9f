//! CLI argument definitions using clap
//!
//! Commands:
//! - zoa check <schema>
//! - zoa export <schema> --out <path>
//! - zoa types <schema>
//! - zoa encode <schema> --type <name> --value <literal>
//! - zoa decode <schema> --type <name> --hex <bytes>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// zoa - a self-describing binary encoding with a typed schema compiler
#[derive(Parser, Debug)]
#[command(name = "zoa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a schema and report what it defines
    Check {
        /// Path to schema source
        schema: PathBuf,

        /// Qualify definitions under this module name
        #[arg(long)]
        module: Option<String>,
    },

    /// Generate a C header from a schema
    Export {
        /// Path to schema source
        schema: PathBuf,

        /// Qualify definitions under this module name
        #[arg(long)]
        module: Option<String>,

        /// Output path (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Dump resolved type descriptors as JSON
    Types {
        /// Path to schema source
        schema: PathBuf,

        /// Qualify definitions under this module name
        #[arg(long)]
        module: Option<String>,
    },

    /// Encode a value literal to wire bytes
    Encode {
        /// Path to schema source
        schema: PathBuf,

        /// Qualified name of the type to encode as
        #[arg(long = "type")]
        ty: String,

        /// Value literal (stdin if omitted)
        #[arg(long)]
        value: Option<String>,

        /// Write raw bytes here (hex on stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Qualify definitions under this module name
        #[arg(long)]
        module: Option<String>,
    },

    /// Decode wire bytes back into a value literal
    Decode {
        /// Path to schema source
        schema: PathBuf,

        /// Qualified name of the type to decode as
        #[arg(long = "type")]
        ty: String,

        /// Read raw bytes from this file (stdin if no input given)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Hex-encoded wire bytes
        #[arg(long)]
        hex: Option<String>,

        /// Qualify definitions under this module name
        #[arg(long)]
        module: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
