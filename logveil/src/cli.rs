// logveil/src/cli.rs
//! Command-line interface definition for the logveil binary.

use clap::Parser;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "logveil",
    author = "Logveil Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mask sensitive data in your log streams",
    long_about = "Logveil is a line-buffered filter that masks sensitive values embedded in \
log text. It recognizes the same logical key-value pair across JSON members, key=value pairs, \
colon-delimited free text and URL query/path segments, and substitutes masked replacements \
in place without altering the surrounding text."
)]
pub struct Cli {
    /// Path to a YAML or JSON masking configuration, merged over the
    /// built-in defaults.
    #[arg(long, short = 'c', value_name = "FILE", env = "LOGVEIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Read input from a file instead of stdin.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Write masked output to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Declare an extra sensitive field, as NAME or NAME:TYPE
    /// (e.g. `documento:national-id`). Repeatable.
    #[arg(long = "field", value_name = "NAME[:TYPE]")]
    pub fields: Vec<String>,

    /// Drop a named field from the effective configuration. Repeatable.
    #[arg(long = "disable", value_name = "NAME")]
    pub disable: Vec<String>,

    /// Disable the auto-detection pass over bare value shapes.
    #[arg(long = "no-auto-detect")]
    pub no_auto_detect: bool,

    /// Override the configured mask character.
    #[arg(long, value_name = "CHAR")]
    pub mask_char: Option<char>,

    /// Print a per-rule substitution summary to stderr at end of input.
    #[arg(long)]
    pub stats: bool,

    /// Strip ANSI escape sequences before matching.
    #[arg(long = "strip-ansi")]
    pub strip_ansi: bool,

    /// Suppress all informational and debug messages.
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long, short = 'd')]
    pub debug: bool,
}
