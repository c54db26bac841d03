//! Integration tests for the bulletin parser against a full product
//!
//! Uses a realistic multi-zone coastal waters bulletin to check the parser end
//! to end through the public API.

use marine_forecast::{
    BulletinParser, RegionForecast, check_region_forecast, extract_synopsis, parse_product,
};

const BULLETIN: &str = include_str!("fixtures/cwf_box.txt");

/// Test that a well-formed bulletin passes every structural check
///
/// Purpose: Validate the documented output properties on real-world layout
/// Benefit: Catches regressions that unit tests on single phases would miss
#[test]
fn test_bulletin_satisfies_structural_checks() {
    let region = parse_product(BULLETIN);

    assert!(check_region_forecast(&region).is_empty());
    assert!(!region.preamble.lines().any(|l| l.trim().is_empty() || l == "000"));
    assert!(region.preamble.starts_with("FZUS51 KBOX 150830"));
}

#[test]
fn test_every_forecast_has_consistent_dates() {
    let region = parse_product(BULLETIN);

    assert_eq!(region.forecasts.len(), 3);
    for forecast in &region.forecasts {
        assert!(!forecast.code.is_empty());
        assert!(!forecast.forecast_date_original.is_empty());
        assert_eq!(
            forecast.forecast_date.is_some(),
            forecast.forecast_date_local.is_some()
        );
        assert_eq!(
            forecast.forecast_date.map(|d| d.to_rfc3339()),
            Some("2024-01-15T08:30:00+00:00".to_string())
        );
    }
}

#[test]
fn test_truncated_zone_is_kept_verbatim() {
    let region = parse_product(BULLETIN);

    assert_eq!(
        region.unprocessed,
        vec!["\n\nANZ254-\nCoastal waters south of Nantucket-\n\n"]
    );
}

#[test]
fn test_synopsis_matches_standalone_extraction() {
    let region = parse_product(BULLETIN);

    assert_eq!(region.short_synopsis, extract_synopsis(BULLETIN));
    assert!(region.short_synopsis.starts_with("High pressure builds"));
}

/// Test the JSON output contract
///
/// Purpose: Confirm field names, null dates and RFC 3339 strings in output
/// Benefit: Downstream consumers depend on the exact serialized shape
#[test]
fn test_json_output_contract() {
    let region = parse_product(BULLETIN);
    let json = serde_json::to_value(&region).unwrap();

    let object = json.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["forecasts", "preamble", "short_synopsis", "unprocessed"]
    );

    let first = &json["forecasts"][0];
    assert_eq!(first["code"], "ANZ230-151600");
    assert_eq!(first["forecast_date"], "2024-01-15T08:30:00Z");
    assert_eq!(first["forecast_date_local"], "2024-01-15T03:30:00-05:00");
    assert_eq!(first["sub_forecasts"][0]["timeframe"], "TODAY");
    assert_eq!(first["is_updated"], false);

    let decoded: RegionForecast = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, region);
}

#[test]
fn test_unknown_zone_leaves_dates_null_in_json() {
    let region =
        parse_product("HEADER\n$$\nPKZ041-\nDixon Entrance-\n300 AM XYZT Mon Jan 15 2024\n$$");
    let json = serde_json::to_value(&region).unwrap();

    assert!(json["forecasts"][0]["forecast_date"].is_null());
    assert!(json["forecasts"][0]["forecast_date_local"].is_null());
}

#[test]
fn test_parse_is_idempotent_and_stats_agree() {
    let parser = BulletinParser::new();
    let result = parser.parse_with_stats(BULLETIN);

    assert_eq!(result.forecast, parser.parse(BULLETIN));
    assert_eq!(result.stats.forecasts_parsed, result.forecast.forecasts.len());
    assert_eq!(result.stats.chunks_unprocessed, result.forecast.unprocessed.len());
    assert!(!result.stats.is_clean());
    assert!((result.stats.success_rate() - 75.0).abs() < f64::EPSILON);
}

#[test]
fn test_crlf_bulletin_parses_like_lf() {
    let crlf = BULLETIN.replace('\n', "\r\n");
    let region = parse_product(&crlf);
    let expected = parse_product(BULLETIN);

    let codes = |r: &RegionForecast| {
        r.forecasts
            .iter()
            .map(|f| f.code.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(codes(&region), codes(&expected));
    assert_eq!(region.short_synopsis, expected.short_synopsis);
}
