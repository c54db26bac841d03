//! Test utilities and fixtures for bulletin parser testing
//!
//! Shared bulletin texts used across the parser test modules.

mod segmenter_tests;

/// Realistic multi-zone Boston coastal waters product
pub fn sample_bulletin() -> &'static str {
    include_str!("../../../tests/fixtures/cwf_box.txt")
}

/// Minimal product with one complete zone chunk
pub fn minimal_bulletin() -> &'static str {
    "PREAMBLE LINE\n000\n$$\nZONE1-\nCoastal waters-\n0300 AM EST\n\
     ...SMALL CRAFT ADVISORY...\n.TODAY...Winds light.\n$$"
}

/// Zone chunk with a parseable timestamp and the given body lines
pub fn zone_chunk(body: &[&str]) -> String {
    let mut lines = vec![
        "GMZ850-151600-",
        "Coastal waters from Tarpon Springs to Suwannee River FL out 20 NM-",
        "400 AM EST Mon Jan 15 2024",
    ];
    lines.extend_from_slice(body);
    format!("\n{}\n", lines.join("\n"))
}
