//! Structural checks over a parsed region forecast.
//!
//! The parser never rejects input, so these checks are how a caller finds out
//! whether a product parsed into something sensible. Each failed check yields a
//! [`Violation`]; an empty list means the forecast looks well formed.

use crate::constants::PADDING_LINE;
use crate::models::{RegionForecast, ZoneForecast};
use std::collections::HashSet;
use std::fmt;

/// A single failed structural check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Preamble is empty after cleaning
    EmptyPreamble,
    /// Preamble still contains a blank or `000` line
    PreambleNotClean { line: String },
    /// Preamble mentions a synopsis but none was extracted
    MissingSynopsis,
    /// Zone forecast with an empty code
    EmptyCode { index: usize },
    /// Zone forecast with an empty original timestamp
    EmptyTimestamp { code: String },
    /// Exactly one of the local and UTC dates is present
    DateMismatch { code: String },
    /// The same timeframe appears more than once
    DuplicateTimeframe { code: String, timeframe: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPreamble => write!(f, "preamble is empty"),
            Self::PreambleNotClean { line } => {
                write!(f, "preamble contains a padding line: '{}'", line)
            }
            Self::MissingSynopsis => {
                write!(f, "preamble mentions a synopsis but none was extracted")
            }
            Self::EmptyCode { index } => write!(f, "forecast #{} has an empty code", index),
            Self::EmptyTimestamp { code } => {
                write!(f, "forecast {} has an empty timestamp", code)
            }
            Self::DateMismatch { code } => write!(
                f,
                "forecast {} has only one of forecast_date and forecast_date_local",
                code
            ),
            Self::DuplicateTimeframe { code, timeframe } => write!(
                f,
                "forecast {} repeats timeframe '{}'",
                code, timeframe
            ),
        }
    }
}

/// Run every structural check over a region forecast
pub fn check_region_forecast(region: &RegionForecast) -> Vec<Violation> {
    let mut violations = check_preamble(region);

    for (index, forecast) in region.forecasts.iter().enumerate() {
        violations.extend(check_zone_forecast(index, forecast));
    }

    violations
}

fn check_preamble(region: &RegionForecast) -> Vec<Violation> {
    let mut violations = Vec::new();

    if region.preamble.trim().is_empty() {
        violations.push(Violation::EmptyPreamble);
    }

    violations.extend(
        region
            .preamble
            .lines()
            .filter(|line| line.trim().is_empty() || line.trim() == PADDING_LINE)
            .map(|line| Violation::PreambleNotClean {
                line: line.to_string(),
            }),
    );

    if region.preamble.to_lowercase().contains("synopsis") && region.short_synopsis.is_empty() {
        violations.push(Violation::MissingSynopsis);
    }

    violations
}

/// Checks for a single zone forecast; `index` is its position in the region
pub fn check_zone_forecast(index: usize, forecast: &ZoneForecast) -> Vec<Violation> {
    let mut violations = Vec::new();
    let code = forecast.code.clone();

    if code.is_empty() {
        violations.push(Violation::EmptyCode { index });
    }

    if forecast.forecast_date_original.trim().is_empty() {
        violations.push(Violation::EmptyTimestamp { code: code.clone() });
    }

    if forecast.forecast_date.is_some() != forecast.forecast_date_local.is_some() {
        violations.push(Violation::DateMismatch { code: code.clone() });
    }

    let mut seen = HashSet::new();
    for sub in &forecast.sub_forecasts {
        if !seen.insert(sub.timeframe.as_str()) {
            violations.push(Violation::DuplicateTimeframe {
                code: code.clone(),
                timeframe: sub.timeframe.clone(),
            });
        }
    }

    violations
}
