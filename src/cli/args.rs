//! Command-line argument definitions for the marine forecast tool
//!
//! Global flags (verbosity, config file, cache directory, workers) apply to
//! every subcommand and override the layered configuration.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the coastal waters forecast parser
#[derive(Debug, Clone, Parser)]
#[command(
    name = "marine-forecast",
    version,
    about = "Parse coastal waters forecast bulletins into structured zone forecasts",
    long_about = "Parses coastal waters forecast (CWF) bulletins into a preamble, a short \
                  synopsis and per-zone forecasts with advisories and timeframe-keyed text. \
                  Works on single products, on a cache of saved products, or on whole \
                  directories in parallel."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// JSON configuration file. Defaults to the platform config directory.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        long = "cache-dir",
        global = true,
        value_name = "PATH",
        help = "Directory holding cached product documents"
    )]
    pub cache_dir: Option<PathBuf>,

    #[arg(
        short = 'j',
        long = "workers",
        global = true,
        value_name = "COUNT",
        help = "Number of products parsed concurrently"
    )]
    pub workers: Option<usize>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a single product file or stdin
    Parse(ParseArgs),
    /// Parse the newest cached product for a location
    Latest(LatestArgs),
    /// List locations with cached products
    Locations(LocationsArgs),
    /// Parse every product under a directory
    Batch(BatchArgs),
    /// Check parsed products for structural problems
    Validate(ValidateArgs),
    /// Save a product into the cache
    Import(ImportArgs),
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Product file; reads stdin when omitted
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Input is bare bulletin text rather than a JSON product document
    #[arg(long = "raw")]
    pub raw: bool,

    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Also print parsing statistics
    #[arg(long = "stats")]
    pub stats: bool,
}

/// Arguments for the latest command
#[derive(Debug, Clone, Parser)]
pub struct LatestArgs {
    /// Issuing location, e.g. BOX
    #[arg(value_name = "LOCATION")]
    pub location: String,

    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Arguments for the locations command
#[derive(Debug, Clone, Parser)]
pub struct LocationsArgs {
    #[arg(long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for the batch command
#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// Directory searched recursively for product files
    #[arg(value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Write `<name>.parsed.json` files into this directory
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Directory of product files; defaults to the cache directory
    #[arg(value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Product file to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Location the product was issued for
    #[arg(short = 'l', long = "location", value_name = "LOCATION")]
    pub location: String,

    /// Input is bare bulletin text rather than a JSON product document
    #[arg(long = "raw")]
    pub raw: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the logging level based on verbosity and quiet flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if progress bars should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
