//! Splits product text into the preamble and zone chunks on `$$`.

use crate::constants::{CHUNK_SENTINEL, PADDING_LINE};

/// Product text split at the chunk sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments<'a> {
    pub preamble: String,
    pub chunks: Vec<&'a str>,
}

/// Split product text into its preamble and the chunks following it
pub fn segment(product_text: &str) -> Segments<'_> {
    let mut pieces = product_text.split(CHUNK_SENTINEL);
    let preamble = pieces.next().map(clean_preamble).unwrap_or_default();

    Segments {
        preamble,
        chunks: pieces.collect(),
    }
}

/// Trimmed preamble lines without blanks or `000` padding, joined by newlines
pub fn clean_preamble(segment: &str) -> String {
    segment
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != PADDING_LINE)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trimmed, non-blank lines of a chunk
pub fn chunk_lines(chunk: &str) -> Vec<&str> {
    chunk
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
