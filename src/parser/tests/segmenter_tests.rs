//! Tests for preamble cleanup and chunk segmentation

use super::*;
use crate::parser::segmenter::{chunk_lines, clean_preamble, segment};

#[test]
fn test_segment_minimal_bulletin() {
    let segments = segment(minimal_bulletin());

    assert_eq!(segments.preamble, "PREAMBLE LINE");
    assert_eq!(segments.chunks.len(), 2);
    assert!(segments.chunks[0].contains("ZONE1-"));
    assert_eq!(segments.chunks[1], "");
}

#[test]
fn test_segment_without_sentinel() {
    let segments = segment("Header only\nno chunks here\n");

    assert_eq!(segments.preamble, "Header only\nno chunks here");
    assert!(segments.chunks.is_empty());
}

#[test]
fn test_segment_empty_text() {
    let segments = segment("");

    assert_eq!(segments.preamble, "");
    assert!(segments.chunks.is_empty());
}

#[test]
fn test_clean_preamble_drops_padding_and_blanks() {
    let preamble = clean_preamble("\n000\n  FZUS51 KBOX 150830  \n\n   \nCWFBOX\n0000\n");

    assert_eq!(preamble, "FZUS51 KBOX 150830\nCWFBOX\n0000");
}

#[test]
fn test_clean_preamble_of_sample() {
    let segments = segment(sample_bulletin());

    assert!(segments.preamble.starts_with("FZUS51 KBOX 150830\nCWFBOX"));
    for line in segments.preamble.lines() {
        assert!(!line.trim().is_empty());
        assert_ne!(line, "000");
    }
    assert_eq!(segments.chunks.len(), 5);
}

#[test]
fn test_chunk_lines_are_trimmed_and_non_blank() {
    let lines = chunk_lines("\n  ANZ230-151600-  \n\n\tCape Cod Bay-\r\n   \n");

    assert_eq!(lines, vec!["ANZ230-151600-", "Cape Cod Bay-"]);
}
