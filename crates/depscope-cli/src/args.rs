//! Command-line argument definitions for the depscope CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity and per-run overrides of the render settings.

use clap::{Parser, ValueEnum};

/// Output formats of the depscope CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Mermaid flowchart text
    Mermaid,
    /// Decorated tree, flat graph and summary as JSON
    Json,
}

/// Command-line arguments for the depscope dependency graph tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the directory to analyze
    #[arg(help = "Path to the directory to analyze")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.mmd")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Mermaid)]
    pub format: OutputFormat,

    /// Flowchart direction (TB, TD, BT, RL, LR)
    #[arg(long)]
    pub direction: Option<String>,

    /// Hide external packages
    #[arg(long)]
    pub hide_external: bool,

    /// Show standard-library modules
    #[arg(long)]
    pub show_builtin: bool,

    /// Maximum directory depth to traverse
    #[arg(long, allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Disable node styling
    #[arg(long)]
    pub plain: bool,

    /// Render only the given file (path relative to the input directory)
    #[arg(long)]
    pub focus: Option<String>,

    /// Maximum number of files to parse
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Parse files with unrecognized suffixes as JavaScript
    #[arg(long)]
    pub all_files: bool,

    /// Print every unresolved internal reference
    #[arg(long)]
    pub show_warnings: bool,
}
