//! Core data structures for parsed coastal waters forecasts.
//!
//! Defines the region-level result of parsing a bulletin, the per-zone
//! forecast records and their timeframe-keyed sub forecasts.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Structured result of parsing one coastal waters forecast product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionForecast {
    /// Product header lines, trimmed, without blanks or `000` padding
    pub preamble: String,

    /// Narrative synopsis, empty when the product has none
    pub short_synopsis: String,

    /// Zone forecasts in order of appearance
    pub forecasts: Vec<ZoneForecast>,

    /// Raw chunks that ran out of lines before a forecast could be built
    pub unprocessed: Vec<String>,
}

/// Forecast for a single zone (or group of zones) within a product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneForecast {
    pub raw: String,
    pub code: String,
    pub location: String,
    pub forecast_date_original: String,
    pub forecast_date_local: Option<DateTime<FixedOffset>>,
    pub forecast_date: Option<DateTime<Utc>>,
    pub is_updated: bool,
    pub advisories: Vec<String>,
    pub sub_forecasts: Vec<SubForecast>,
    pub unprocessed: Vec<String>,
}

/// Forecast text for one named timeframe, e.g. `TODAY` or `SAT NIGHT`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubForecast {
    pub timeframe: String,
    pub forecast_text: String,
}

impl RegionForecast {
    /// Look up a zone forecast by its code
    pub fn forecast_for(&self, code: &str) -> Option<&ZoneForecast> {
        self.forecasts.iter().find(|forecast| forecast.code == code)
    }
}

impl ZoneForecast {
    /// Forecast text for a timeframe, if the zone has one
    pub fn sub_forecast(&self, timeframe: &str) -> Option<&str> {
        self.sub_forecasts
            .iter()
            .find(|sub| sub.timeframe == timeframe)
            .map(|sub| sub.forecast_text.as_str())
    }

    /// Whether any advisory is in effect for the zone
    pub fn has_advisories(&self) -> bool {
        !self.advisories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_absent_dates_serialize_as_null() {
        let forecast = ZoneForecast {
            code: "ANZ230".to_string(),
            forecast_date_original: "bogus".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&forecast).unwrap();
        assert!(value["forecast_date_local"].is_null());
        assert!(value["forecast_date"].is_null());
        assert_eq!(value["is_updated"], false);
    }

    #[test]
    fn test_output_keys() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 1, 15, 3, 0, 0).unwrap();
        let forecast = ZoneForecast {
            code: "ANZ230".to_string(),
            forecast_date_local: Some(local),
            forecast_date: Some(local.with_timezone(&Utc)),
            ..Default::default()
        };
        let region = RegionForecast {
            forecasts: vec![forecast],
            ..Default::default()
        };

        let value = serde_json::to_value(&region).unwrap();
        for key in ["preamble", "short_synopsis", "forecasts", "unprocessed"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        let zone = &value["forecasts"][0];
        for key in [
            "raw",
            "code",
            "location",
            "forecast_date_original",
            "forecast_date_local",
            "forecast_date",
            "is_updated",
            "advisories",
            "sub_forecasts",
            "unprocessed",
        ] {
            assert!(zone.get(key).is_some(), "missing zone key {key}");
        }
        assert_eq!(zone["forecast_date_local"], "2024-01-15T03:00:00-05:00");
        assert_eq!(zone["forecast_date"], "2024-01-15T08:00:00Z");
    }

    #[test]
    fn test_sub_forecast_lookup() {
        let forecast = ZoneForecast {
            sub_forecasts: vec![SubForecast {
                timeframe: "TODAY".to_string(),
                forecast_text: "Winds light.".to_string(),
            }],
            ..Default::default()
        };
        assert_eq!(forecast.sub_forecast("TODAY"), Some("Winds light."));
        assert_eq!(forecast.sub_forecast("TONIGHT"), None);
        assert!(!forecast.has_advisories());
    }
}
