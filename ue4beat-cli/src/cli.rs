//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use ue4beat_log_pipeline::{OutputLayout, StaticFields};

/// ue4beat -- reads UE4 dedicated server log lines from stdin and writes
/// one JSON object per line to stdout.
#[derive(Parser, Debug)]
#[command(
    name = "ue4beat",
    version,
    about,
    long_about = None,
    disable_version_flag = true
)]
pub struct Cli {
    /// Add a name/value field to each output line (repeatable).
    ///
    /// Names get a `fields.` prefix unless they already have one. Values that
    /// parse as numbers are written as JSON numbers.
    #[arg(
        short = 'f',
        long = "field",
        num_args = 2,
        value_names = ["NAME", "VALUE"],
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub field: Vec<String>,

    /// Path to an optional ue4beat.toml configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output layout (overrides the config file).
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Override diagnostic log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)] // handled by clap, never read
    version: Option<bool>,
}

/// Output layouts selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Static fields, record keys and `fields.log_line`; no frame key when absent.
    Flat,
    /// The parsed record as-is (frame `-1` kept, no static fields).
    Record,
}

impl From<LayoutArg> for OutputLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Flat => OutputLayout::Flat,
            LayoutArg::Record => OutputLayout::Record,
        }
    }
}

impl Cli {
    /// Static fields given with `-f`, in command-line order (later wins).
    pub fn static_fields(&self) -> StaticFields {
        StaticFields::from_pairs(
            self.field
                .chunks_exact(2)
                .map(|pair| (pair[0].as_str(), pair[1].as_str())),
        )
    }
}
