//! Coastal waters forecast bulletin parser
//!
//! Turns the free text of a coastal waters forecast product into a
//! [`RegionForecast`]. Parsing never fails: text that does not fit the
//! expected layout ends up in the `unprocessed` lists of the result.
//!
//! ## Architecture
//!
//! - [`segmenter`] - Splits product text into preamble and `$$` chunks
//! - [`cursor`] - Line cursor shared by the header phases
//! - [`phases`] - Code, location, timestamp and update-flag phases
//! - [`body`] - Advisory and timeframe state machine for the chunk body
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use marine_forecast::parser::BulletinParser;
//!
//! let text = "PREAMBLE LINE\n000\n$$\nZONE1-\nCoastal waters-\n0300 AM EST\n\
//!             ...SMALL CRAFT ADVISORY...\n.TODAY...Winds light.\n$$";
//! let region = BulletinParser::new().parse(text);
//!
//! assert_eq!(region.preamble, "PREAMBLE LINE");
//! assert_eq!(region.forecasts[0].code, "ZONE1");
//! assert_eq!(region.forecasts[0].sub_forecast("TODAY"), Some("Winds light."));
//! ```

pub mod body;
pub mod cursor;
pub mod phases;
pub mod segmenter;
pub mod stats;

#[cfg(test)]
mod tests;

pub use body::{BodyEvent, BodyState, parse_body};
pub use cursor::{Exhausted, LineCursor, Phase};
pub use stats::{ParseResult, ParseStats};

use crate::models::{RegionForecast, ZoneForecast};
use crate::synopsis::extract_synopsis;
use crate::timestamp::{AbbreviationTable, OffsetResolver, parse_timestamp};
use cursor::PhaseResult;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of parsing a single `$$` chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    Parsed(ZoneForecast),
    /// Ran out of lines in a header phase; the chunk is kept verbatim
    Unprocessed(Exhausted),
    /// No non-blank lines
    Empty,
}

/// Stateless bulletin parser; safe to share between threads
#[derive(Clone)]
pub struct BulletinParser {
    resolver: Arc<dyn OffsetResolver>,
}

impl BulletinParser {
    /// Parser resolving timezones with the built-in abbreviation table
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(AbbreviationTable::new()))
    }

    /// Parser resolving timezones with a custom resolver
    pub fn with_resolver(resolver: Arc<dyn OffsetResolver>) -> Self {
        Self { resolver }
    }

    /// Parse a product into a region forecast
    pub fn parse(&self, product_text: &str) -> RegionForecast {
        self.parse_with_stats(product_text).forecast
    }

    /// Parse a product and report how much of it was understood
    pub fn parse_with_stats(&self, product_text: &str) -> ParseResult {
        let segments = segmenter::segment(product_text);
        let mut stats = ParseStats::default();
        let mut forecasts = Vec::new();
        let mut unprocessed = Vec::new();

        for chunk in segments.chunks {
            stats.chunks_seen += 1;
            match self.parse_chunk(chunk) {
                ChunkOutcome::Parsed(forecast) => {
                    stats.forecasts_parsed += 1;
                    if forecast.forecast_date.is_none() {
                        stats.timestamps_unparsed += 1;
                    }
                    stats.body_lines_unprocessed += forecast.unprocessed.len();
                    forecasts.push(forecast);
                }
                ChunkOutcome::Unprocessed(exhausted) => {
                    debug!(
                        "Chunk {} ran out of lines in the {} phase",
                        stats.chunks_seen, exhausted.phase
                    );
                    stats.chunks_unprocessed += 1;
                    unprocessed.push(chunk.to_string());
                }
                ChunkOutcome::Empty => {
                    debug!("Skipping empty chunk {}", stats.chunks_seen);
                    stats.empty_chunks += 1;
                }
            }
        }

        debug!(
            "Parsed {} zone forecasts from {} chunks ({} unprocessed)",
            stats.forecasts_parsed, stats.chunks_seen, stats.chunks_unprocessed
        );

        ParseResult {
            forecast: RegionForecast {
                preamble: segments.preamble,
                short_synopsis: extract_synopsis(product_text),
                forecasts,
                unprocessed,
            },
            stats,
        }
    }

    /// Parse one `$$` chunk into a zone forecast
    pub fn parse_chunk(&self, chunk: &str) -> ChunkOutcome {
        let lines = segmenter::chunk_lines(chunk);
        if lines.is_empty() {
            return ChunkOutcome::Empty;
        }

        match self.parse_lines(&lines) {
            Ok(forecast) => ChunkOutcome::Parsed(forecast),
            Err(exhausted) => ChunkOutcome::Unprocessed(exhausted),
        }
    }

    fn parse_lines(&self, lines: &[&str]) -> PhaseResult<ZoneForecast> {
        let mut cursor = LineCursor::new(lines.iter().copied());

        let code = phases::read_code(&mut cursor)?;
        let location = phases::read_location(&mut cursor)?;
        let forecast_date_original = phases::read_timestamp(&mut cursor)?.to_string();
        let is_updated = phases::read_update_flag(&mut cursor);

        let timestamp = parse_timestamp(&forecast_date_original, self.resolver.as_ref());
        if timestamp.is_none() {
            warn!(
                "Could not parse timestamp '{}' for zone {}",
                forecast_date_original, code
            );
        }

        let body = parse_body(cursor.into_remaining());

        Ok(ZoneForecast {
            raw: lines.join("\n"),
            code,
            location,
            forecast_date_original,
            forecast_date_local: timestamp.map(|t| t.local),
            forecast_date: timestamp.map(|t| t.utc),
            is_updated,
            advisories: body.advisories,
            sub_forecasts: body.sub_forecasts,
            unprocessed: body.unprocessed,
        })
    }
}

impl Default for BulletinParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a product with the default parser
pub fn parse_product(product_text: &str) -> RegionForecast {
    BulletinParser::new().parse(product_text)
}
