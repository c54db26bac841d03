//! Marine Forecast Library
//!
//! A Rust library for turning coastal waters forecast (CWF) bulletins into
//! structured zone forecasts.
//!
//! This library provides tools for:
//! - Splitting a bulletin into its preamble and per-zone `$$` chunks
//! - Parsing each chunk into a zone code, location, timestamp, advisories
//!   and timeframe-keyed forecast text
//! - Extracting the short synopsis paragraph
//! - Resolving bulletin timestamps to fixed offsets and UTC
//! - Reading product documents from a local cache and checking parsed output
//!
//! Parsing never fails; text that does not fit the expected layout is kept in
//! the `unprocessed` fields of the result.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod product;
pub mod synopsis;
pub mod timestamp;
pub mod validation;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::Config;
pub use error::{ForecastError, Result};
pub use models::{RegionForecast, SubForecast, ZoneForecast};
pub use parser::{BulletinParser, ParseResult, ParseStats, parse_product};
pub use product::{CachedProductSource, ProductEnvelope, ProductSource, parse_latest};
pub use synopsis::extract_synopsis;
pub use timestamp::{AbbreviationTable, OffsetResolver};
pub use validation::{Violation, check_region_forecast};
