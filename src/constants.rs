//! Application constants for the coastal waters forecast parser
//!
//! Sentinel tokens of the bulletin format, default values and the
//! timezone abbreviations used by coastal bulletins.

// =============================================================================
// Bulletin Sentinels
// =============================================================================

/// Separates the preamble and each zone chunk
pub const CHUNK_SENTINEL: &str = "$$";

/// Padding line emitted at the top of some products
pub const PADDING_LINE: &str = "000";

/// Soft-wrap / continuation marker ending code and location lines
pub const CONTINUATION_MARKER: char = '-';

/// Delimits advisories and separates a timeframe header from its text
pub const ELLIPSIS: &str = "...";

/// Prefix of a timeframe header line such as `.TONIGHT...`
pub const TIMEFRAME_PREFIX: char = '.';

/// Line flagging a zone forecast as reissued
pub const UPDATED_FLAG: &str = "UPDATED";

/// Separates duplicated timestamps in different zones (`... EST /... CST/`)
pub const TIMESTAMP_ZONE_SEPARATOR: char = '/';

/// Number of leading characters that must be numeric for a line to be taken
/// as the timestamp following a location
pub const TIMESTAMP_LEAD_DIGITS: usize = 3;

// =============================================================================
// Timestamp Parsing
// =============================================================================

/// Formats tried, in order, against a normalized timestamp with its zone removed
pub const TIMESTAMP_FORMATS: &[&str] = &[
    "%I:%M %p %a %b %d %Y",
    "%I:%M %p %b %d %Y",
    "%H:%M %a %b %d %Y",
    "%H:%M %b %d %Y",
];

/// Largest accepted offset, in minutes, for configured timezone abbreviations
pub const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Timezone abbreviations used by coastal waters bulletins and their UTC
/// offsets in minutes
pub const TIMEZONE_ABBREVIATIONS: &[(&str, i32)] = &[
    ("UTC", 0),
    ("GMT", 0),
    ("EST", -5 * 60),
    ("EDT", -4 * 60),
    ("CST", -6 * 60),
    ("CDT", -5 * 60),
    ("MST", -7 * 60),
    ("MDT", -6 * 60),
    ("PST", -8 * 60),
    ("PDT", -7 * 60),
    ("AKST", -9 * 60),
    ("AKDT", -8 * 60),
    ("HST", -10 * 60),
    ("HDT", -9 * 60),
    ("AST", -4 * 60),
    ("ADT", -3 * 60),
    ("CHST", 10 * 60),
    ("SST", -11 * 60),
];

// =============================================================================
// Configuration Defaults
// =============================================================================

/// Directory name used under the platform cache and config directories
pub const APP_DIR_NAME: &str = "marine-forecast";

/// Config file name looked up in the platform config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the product cache directory
pub const ENV_CACHE_DIR: &str = "MARINE_FORECAST_CACHE_DIR";

/// Environment variable overriding the worker count
pub const ENV_WORKERS: &str = "MARINE_FORECAST_WORKERS";

/// Extension of cached product documents
pub const PRODUCT_FILE_EXTENSION: &str = "json";

/// Suffix appended to batch output files
pub const PARSED_FILE_SUFFIX: &str = "parsed.json";
