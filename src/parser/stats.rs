//! Parsing statistics and result structures for bulletin processing

use crate::models::RegionForecast;
use serde::{Deserialize, Serialize};

/// Parsed region forecast with statistics about how much of it parsed cleanly
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub forecast: RegionForecast,
    pub stats: ParseStats,
}

/// Counters collected while parsing one product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Chunks following the preamble, including empty ones
    pub chunks_seen: usize,

    /// Chunks turned into zone forecasts
    pub forecasts_parsed: usize,

    /// Chunks that ran out of lines in a header phase
    pub chunks_unprocessed: usize,

    /// Chunks with no non-blank lines
    pub empty_chunks: usize,

    /// Zone forecasts whose timestamp could not be parsed
    pub timestamps_unparsed: usize,

    /// Body lines kept as unprocessed across all zone forecasts
    pub body_lines_unprocessed: usize,
}

impl ParseStats {
    /// Share of non-empty chunks that became forecasts, as a percentage
    pub fn success_rate(&self) -> f64 {
        let candidates = self.forecasts_parsed + self.chunks_unprocessed;
        if candidates == 0 {
            0.0
        } else {
            (self.forecasts_parsed as f64 / candidates as f64) * 100.0
        }
    }

    /// Whether every chunk and timestamp parsed
    pub fn is_clean(&self) -> bool {
        self.chunks_unprocessed == 0 && self.timestamps_unparsed == 0
    }

    /// Add another product's counters to these
    pub fn merge(&mut self, other: &ParseStats) {
        self.chunks_seen += other.chunks_seen;
        self.forecasts_parsed += other.forecasts_parsed;
        self.chunks_unprocessed += other.chunks_unprocessed;
        self.empty_chunks += other.empty_chunks;
        self.timestamps_unparsed += other.timestamps_unparsed;
        self.body_lines_unprocessed += other.body_lines_unprocessed;
    }
}
