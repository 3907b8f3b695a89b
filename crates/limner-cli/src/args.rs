//! Command-line argument definitions for the Limner CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the scene file, the output file and its
//! format, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Limner export tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene file (TOML)
    #[arg(help = "Path to the input scene file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.png")]
    pub output: String,

    /// Output format (png, jpg, jpeg, svg, pdf); guessed from the output
    /// file extension when omitted
    #[arg(short, long)]
    pub format: Option<String>,

    /// Pixel ratio for raster output
    #[arg(short, long)]
    pub scale: Option<f32>,

    /// Watermark text stamped on the export
    #[arg(short, long)]
    pub watermark: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
