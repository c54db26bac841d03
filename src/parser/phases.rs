//! Header phases of a zone chunk: code, location, timestamp and update flag.
//!
//! A chunk opens with lines like
//!
//! ```text
//! ANZ230-151600-
//! Cape Cod Bay-
//! 330 AM EST Mon Jan 15 2024
//! UPDATED
//! ```
//!
//! Code and location lines may wrap; a trailing `-` marks the end of a wrapped
//! group. The phases run strictly in order over one [`LineCursor`].

use super::cursor::{Exhausted, LineCursor, Phase, PhaseResult};
use crate::constants::{CONTINUATION_MARKER, TIMESTAMP_LEAD_DIGITS, UPDATED_FLAG};

/// Read the zone code, stopping after the first line ending with `-`.
///
/// A code made only of hyphens is treated like a chunk that ran out of lines,
/// since a forecast without a code cannot be addressed.
pub fn read_code(cursor: &mut LineCursor<'_>) -> PhaseResult<String> {
    let mut parts = Vec::new();
    loop {
        let line = cursor.next_line(Phase::Code)?;
        parts.push(strip_continuation(line));
        if line.ends_with(CONTINUATION_MARKER) {
            break;
        }
    }

    let code = parts.join(" ");
    if code.trim().is_empty() {
        return Err(Exhausted { phase: Phase::Code });
    }
    Ok(code)
}

/// Read the location description.
///
/// The location ends on a line ending with `-` whose successor starts with
/// digits, taken to be the timestamp. This is an approximation: a wrapped
/// location whose continuation happens to start with three digits ends early.
pub fn read_location(cursor: &mut LineCursor<'_>) -> PhaseResult<String> {
    let mut parts = Vec::new();
    loop {
        let line = cursor.next_line(Phase::Location)?;
        parts.push(strip_continuation(line));
        if line.ends_with(CONTINUATION_MARKER) && cursor.peek().is_some_and(starts_with_digits) {
            break;
        }
    }
    Ok(parts.join(" "))
}

/// Read the timestamp line verbatim
pub fn read_timestamp<'a>(cursor: &mut LineCursor<'a>) -> PhaseResult<&'a str> {
    cursor.next_line(Phase::Timestamp)
}

/// Consume an `UPDATED` line if one follows; never fails
pub fn read_update_flag(cursor: &mut LineCursor<'_>) -> bool {
    cursor.next_if(|line| line == UPDATED_FLAG).is_some()
}

fn strip_continuation(line: &str) -> String {
    line.trim_end_matches(CONTINUATION_MARKER).trim().to_string()
}

/// Whether the leading characters (up to three) of a line are all numeric
pub fn starts_with_digits(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .take(TIMESTAMP_LEAD_DIGITS)
            .all(char::is_numeric)
}
