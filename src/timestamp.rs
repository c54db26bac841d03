//! Forecast timestamp normalization and parsing.
//!
//! Bulletin timestamps look like `330 AM EST Mon Jan 15 2024`, sometimes
//! followed by the same instant in a second zone (`/230 AM CST Mon Jan 15 2024/`).
//! [`normalize_timestamp`] turns that into something a date parser accepts and
//! [`parse_timestamp`] resolves it against an [`OffsetResolver`].

use crate::constants::{
    MAX_OFFSET_MINUTES, TIMESTAMP_FORMATS, TIMESTAMP_ZONE_SEPARATOR, TIMEZONE_ABBREVIATIONS,
};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Resolves a timezone abbreviation found in a bulletin to a fixed UTC offset
pub trait OffsetResolver: Send + Sync {
    fn resolve(&self, abbreviation: &str) -> Option<FixedOffset>;
}

/// Abbreviation lookup table, seeded with the zones used by coastal bulletins
#[derive(Debug, Clone)]
pub struct AbbreviationTable {
    offsets: HashMap<String, i32>,
}

impl AbbreviationTable {
    /// Table holding only the built-in abbreviations
    pub fn new() -> Self {
        let offsets = TIMEZONE_ABBREVIATIONS
            .iter()
            .map(|(name, minutes)| (name.to_string(), *minutes))
            .collect();
        Self { offsets }
    }

    /// Add or replace an abbreviation, offset given in minutes east of UTC
    pub fn with_offset(mut self, abbreviation: &str, minutes: i32) -> Self {
        self.offsets.insert(abbreviation.to_uppercase(), minutes);
        self
    }

    /// Extend the table with configured overrides
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a i32)>,
    ) -> Self {
        for (abbreviation, minutes) in overrides {
            self.offsets.insert(abbreviation.to_uppercase(), *minutes);
        }
        self
    }
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OffsetResolver for AbbreviationTable {
    fn resolve(&self, abbreviation: &str) -> Option<FixedOffset> {
        let minutes = *self.offsets.get(&abbreviation.to_uppercase())?;
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return None;
        }
        FixedOffset::east_opt(minutes * 60)
    }
}

/// A timestamp resolved to both its stated offset and UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastTimestamp {
    pub local: DateTime<FixedOffset>,
    pub utc: DateTime<Utc>,
}

/// Normalize a raw bulletin timestamp for parsing.
///
/// Keeps only the text before the first `/` and inserts a colon two characters
/// before the first space, so `330 AM EST Mon Jan 15 2024` becomes
/// `3:30 AM EST Mon Jan 15 2024`. When there is no space with at least two
/// characters before it, the trimmed text is returned without a colon.
pub fn normalize_timestamp(original: &str) -> String {
    let primary = original
        .split(TIMESTAMP_ZONE_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim();

    let split_at = primary
        .find(' ')
        .and_then(|space| primary[..space].char_indices().rev().nth(1))
        .map(|(index, _)| index);

    match split_at {
        Some(split_at) => format!("{}:{}", &primary[..split_at], &primary[split_at..]),
        None => primary.to_string(),
    }
}

/// Parse a raw bulletin timestamp, returning `None` when it is not recognised
pub fn parse_timestamp(original: &str, resolver: &dyn OffsetResolver) -> Option<ForecastTimestamp> {
    let normalized = normalize_timestamp(original);

    let mut offset = None;
    let mut remaining = Vec::new();
    for token in normalized.split_whitespace() {
        if offset.is_none() && token.chars().all(|c| c.is_ascii_alphabetic()) {
            if let Some(resolved) = resolver.resolve(token) {
                offset = Some(resolved);
                continue;
            }
        }
        remaining.push(token);
    }

    let Some(offset) = offset else {
        debug!("No known timezone in timestamp '{}'", original);
        return None;
    };

    let datetime_text = remaining.join(" ");
    let naive = TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&datetime_text, format).ok());

    let Some(naive) = naive else {
        debug!("Unrecognised timestamp format '{}'", original);
        return None;
    };

    let local = offset.from_local_datetime(&naive).single()?;
    Some(ForecastTimestamp {
        local,
        utc: local.with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_is_case_insensitive() {
        let table = AbbreviationTable::new();
        assert_eq!(table.resolve("ChST"), FixedOffset::east_opt(10 * 3600));
        assert_eq!(table.resolve("est"), FixedOffset::west_opt(5 * 3600));
        assert_eq!(table.resolve("XYZ"), None);
    }

    #[test]
    fn test_resolver_overrides() {
        let table = AbbreviationTable::new().with_offset("nzst", 12 * 60);
        assert_eq!(table.resolve("NZST"), FixedOffset::east_opt(12 * 3600));

        let too_far = AbbreviationTable::new().with_offset("BAD", 20 * 60);
        assert_eq!(too_far.resolve("BAD"), None);
    }

    #[test]
    fn test_normalize_inserts_colon() {
        assert_eq!(
            normalize_timestamp("330 AM EST Mon Jan 15 2024"),
            "3:30 AM EST Mon Jan 15 2024"
        );
        assert_eq!(
            normalize_timestamp("1030 PM HST Sat Mar 2 2024"),
            "10:30 PM HST Sat Mar 2 2024"
        );
    }

    #[test]
    fn test_normalize_drops_duplicate_zone() {
        assert_eq!(
            normalize_timestamp("330 AM EDT Wed Jun 5 2024 /230 AM CDT Wed Jun 5 2024/"),
            "3:30 AM EDT Wed Jun 5 2024"
        );
    }

    #[test]
    fn test_normalize_without_usable_space() {
        assert_eq!(normalize_timestamp("NOTIME"), "NOTIME");
        assert_eq!(normalize_timestamp("1 AM"), "1 AM");
        assert_eq!(normalize_timestamp(""), "");
    }

    #[test]
    fn test_normalize_counts_characters_not_bytes() {
        assert_eq!(normalize_timestamp("3é0 AM EST"), "3:é0 AM EST");
        assert_eq!(normalize_timestamp("é AM"), "é AM");
        assert_eq!(normalize_timestamp("éé AM"), ":éé AM");
    }

    #[test]
    fn test_parse_full_timestamp() {
        let table = AbbreviationTable::new();
        let parsed = parse_timestamp("330 AM EST Mon Jan 15 2024", &table).unwrap();

        assert_eq!(parsed.local.to_rfc3339(), "2024-01-15T03:30:00-05:00");
        assert_eq!(parsed.utc.to_rfc3339(), "2024-01-15T08:30:00+00:00");
    }

    #[test]
    fn test_parse_with_duplicate_zone() {
        let table = AbbreviationTable::new();
        let parsed = parse_timestamp(
            "1015 PM EDT Wed Jun 5 2024 /915 PM CDT Wed Jun 5 2024/",
            &table,
        )
        .unwrap();

        assert_eq!(parsed.local.to_rfc3339(), "2024-06-05T22:15:00-04:00");
        assert_eq!(parsed.utc.to_rfc3339(), "2024-06-06T02:15:00+00:00");
    }

    #[test]
    fn test_parse_pacific_island_zone() {
        let table = AbbreviationTable::new();
        let parsed = parse_timestamp("400 AM ChST Sun Mar 3 2024", &table).unwrap();
        assert_eq!(parsed.local.to_rfc3339(), "2024-03-03T04:00:00+10:00");
        assert_eq!(parsed.utc.to_rfc3339(), "2024-03-02T18:00:00+00:00");
    }

    #[test]
    fn test_parse_without_weekday() {
        let table = AbbreviationTable::new();
        let parsed = parse_timestamp("1200 PM PST Jan 15 2024", &table).unwrap();
        assert_eq!(parsed.local.to_rfc3339(), "2024-01-15T12:00:00-08:00");
    }

    #[test]
    fn test_parse_failures_are_none() {
        let table = AbbreviationTable::new();
        // no year
        assert!(parse_timestamp("0300 AM EST", &table).is_none());
        // unknown zone
        assert!(parse_timestamp("300 AM XYZ Mon Jan 15 2024", &table).is_none());
        // no zone at all
        assert!(parse_timestamp("300 AM Mon Jan 15 2024", &table).is_none());
        // weekday contradicts the date
        assert!(parse_timestamp("300 AM EST Tue Jan 15 2024", &table).is_none());
        assert!(parse_timestamp("Coastal waters", &table).is_none());
    }
}
