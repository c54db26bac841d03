//! Front-to-back cursor over the lines of a zone chunk
//!
//! Every header phase pulls lines from the same cursor. Running out of lines
//! is reported as [`Exhausted`], which sends the whole chunk to the region's
//! unprocessed list.

use std::collections::VecDeque;
use std::fmt;

/// Header phase of a zone chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Code,
    Location,
    Timestamp,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Code => "code",
            Phase::Location => "location",
            Phase::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// The chunk ran out of lines while `phase` still needed one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhausted {
    pub phase: Phase,
}

/// Result of a header phase
pub type PhaseResult<T> = Result<T, Exhausted>;

/// Consuming queue of trimmed, non-blank chunk lines
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: VecDeque<&'a str>,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }

    /// Take the next line, failing with the phase that wanted it
    pub fn next_line(&mut self, phase: Phase) -> PhaseResult<&'a str> {
        self.lines.pop_front().ok_or(Exhausted { phase })
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.lines.front().copied()
    }

    /// Take the next line only if it satisfies `predicate`
    pub fn next_if(&mut self, predicate: impl FnOnce(&str) -> bool) -> Option<&'a str> {
        match self.peek() {
            Some(line) if predicate(line) => self.lines.pop_front(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Hand the unconsumed lines over, in order
    pub fn into_remaining(self) -> impl Iterator<Item = &'a str> {
        self.lines.into_iter()
    }
}
