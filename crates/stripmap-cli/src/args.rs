//! Command-line argument definitions for the stripmap CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! trip visibility, configuration file selection and logging verbosity.

use clap::{Parser, ValueEnum};

/// Output format of the rendered diagram.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Standalone SVG preview
    #[default]
    Svg,
    /// Stop positions, trip paths and labels as JSON
    Json,
}

/// Command-line arguments for the stripmap line diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input route JSON file
    #[arg(help = "Path to the input route file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    pub format: Format,

    /// Trip ids to draw (comma-separated); all trips when omitted
    #[arg(short, long, value_delimiter = ',')]
    pub trips: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
