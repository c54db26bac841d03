//! Body of a zone chunk: advisories and timeframe sub forecasts.
//!
//! ```text
//! ...SMALL CRAFT ADVISORY IN EFFECT
//! THROUGH THIS EVENING...
//! .TODAY...SW winds 10 to 15 kt. Seas 2 to 4 ft.
//! .TONIGHT...W winds 5 to 10 kt.
//! ```
//!
//! Lines are folded through [`BodyState::step`], which decides what a line is
//! from the line itself and the two pieces of state carried between lines: an
//! open advisory and the current timeframe. [`BodyParts`] accumulates the
//! resulting [`BodyEvent`]s.

use crate::constants::{ELLIPSIS, TIMEFRAME_PREFIX};
use crate::models::SubForecast;
use tracing::debug;

/// State carried from one body line to the next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyState {
    pub in_advisory: bool,
    pub timeframe: Option<String>,
}

/// What a single body line contributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyEvent {
    /// Advisory text with ellipses removed; `closes` ends the advisory
    Advisory { text: String, closes: bool },
    /// Text for a timeframe; headers with no trailing text produce empty text
    Timeframe { key: String, text: String },
    /// Line outside any advisory or timeframe
    Unprocessed(String),
}

impl BodyState {
    /// Classify `line` and compute the state for the next line
    pub fn step(&self, line: &str) -> (BodyState, BodyEvent) {
        if self.in_advisory || line.starts_with(ELLIPSIS) {
            let closes = line.ends_with(ELLIPSIS);
            let next = BodyState {
                in_advisory: !closes,
                timeframe: self.timeframe.clone(),
            };
            let text = line.replace(ELLIPSIS, "").trim().to_string();
            return (next, BodyEvent::Advisory { text, closes });
        }

        let mut timeframe = self.timeframe.clone();
        let mut content = line;
        if let Some(header) = line.strip_prefix(TIMEFRAME_PREFIX) {
            if let [key, rest] = header.split(ELLIPSIS).collect::<Vec<_>>()[..] {
                timeframe = Some(key.to_string());
                content = rest;
            }
        }

        let event = match &timeframe {
            Some(key) => BodyEvent::Timeframe {
                key: key.clone(),
                text: content.trim().to_string(),
            },
            None => BodyEvent::Unprocessed(line.to_string()),
        };

        (
            BodyState {
                in_advisory: false,
                timeframe,
            },
            event,
        )
    }
}

/// Accumulated body content of a zone chunk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyParts {
    pub advisories: Vec<String>,
    timeframes: Vec<(String, Vec<String>)>,
    pub unprocessed: Vec<String>,
    open_advisory: Vec<String>,
    open_advisory_lines: Vec<String>,
}

/// Final body content once every line has been seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBody {
    pub advisories: Vec<String>,
    pub sub_forecasts: Vec<SubForecast>,
    pub unprocessed: Vec<String>,
}

impl BodyParts {
    /// Record the event produced by `line`
    pub fn apply(&mut self, line: &str, event: BodyEvent) {
        match event {
            BodyEvent::Advisory { text, closes } => {
                self.open_advisory_lines.push(line.to_string());
                self.open_advisory.push(text);
                if closes {
                    let advisory = std::mem::take(&mut self.open_advisory).join(" ");
                    self.open_advisory_lines.clear();
                    self.advisories.push(advisory);
                }
            }
            BodyEvent::Timeframe { key, text } => {
                let index = match self.timeframes.iter().position(|(seen, _)| *seen == key) {
                    Some(index) => index,
                    None => {
                        self.timeframes.push((key, Vec::new()));
                        self.timeframes.len() - 1
                    }
                };
                // blank fragments are not buffered
                if !text.is_empty() {
                    self.timeframes[index].1.push(text);
                }
            }
            BodyEvent::Unprocessed(line) => self.unprocessed.push(line),
        }
    }

    /// Flatten timeframe buffers; an advisory left open becomes unprocessed lines
    pub fn finish(mut self) -> ParsedBody {
        if !self.open_advisory_lines.is_empty() {
            debug!(
                "Advisory not terminated, keeping {} lines as unprocessed",
                self.open_advisory_lines.len()
            );
            self.unprocessed.append(&mut self.open_advisory_lines);
        }

        let sub_forecasts = self
            .timeframes
            .into_iter()
            .map(|(timeframe, texts)| SubForecast {
                timeframe,
                forecast_text: texts.join(" "),
            })
            .collect();

        ParsedBody {
            advisories: self.advisories,
            sub_forecasts,
            unprocessed: self.unprocessed,
        }
    }
}

/// Run every remaining chunk line through the body state machine
pub fn parse_body<'a>(lines: impl IntoIterator<Item = &'a str>) -> ParsedBody {
    let (_, parts) = lines.into_iter().fold(
        (BodyState::default(), BodyParts::default()),
        |(state, mut parts), line| {
            let (next, event) = state.step(line);
            parts.apply(line, event);
            (next, parts)
        },
    );
    parts.finish()
}
