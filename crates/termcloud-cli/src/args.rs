//! Command-line argument definitions for the termcloud CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity and overrides of individual cloud options.

use clap::Parser;

/// Command-line arguments for the termcloud tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a JSON file of enrichment results
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<f32>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<f32>,

    /// Maximum number of words (0 for no limit)
    #[arg(long)]
    pub max_n: Option<usize>,

    /// Show whole term names instead of single words
    #[arg(long)]
    pub terms: bool,

    /// Report words that did not fit the canvas
    #[arg(long)]
    pub warnings: bool,

    /// Organism the results were computed for (used by the logo link)
    #[arg(long, default_value = "hsapiens")]
    pub organism: String,

    /// Comma-separated genes of the query (used by the logo link)
    #[arg(long, value_delimiter = ',')]
    pub genes: Vec<String>,
}
