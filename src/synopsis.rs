//! Synopsis extraction from raw product text.
//!
//! The synopsis is the short narrative paragraph most products carry ahead of
//! the zone forecasts, e.g.
//!
//! ```text
//! .SYNOPSIS FOR MASSACHUSETTS AND RHODE ISLAND COASTAL WATERS...
//! High pressure builds over the waters today.
//!
//! $$
//! ```
//!
//! It is located independently of chunk segmentation: the first `synopsis`
//! (any case) up to the nearest following `$$` anywhere in the text.

use crate::constants::ELLIPSIS;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SYNOPSIS_PATTERN: Regex = Regex::new(r"(?is)synopsis(.*?)\$\$").unwrap();
}

/// Extract the synopsis narrative, or an empty string when there is none
pub fn extract_synopsis(product_text: &str) -> String {
    let Some(captured) = SYNOPSIS_PATTERN
        .captures(product_text)
        .and_then(|captures| captures.get(1))
    else {
        return String::new();
    };

    let body = narrative_of(captured.as_str());
    body.lines().collect::<Vec<_>>().join(" ").trim().to_string()
}

/// Strip the synopsis heading from the captured block.
///
/// With `...` delimiters the heading is everything up to the first one;
/// without them it is the first line.
fn narrative_of(block: &str) -> String {
    if block.contains(ELLIPSIS) {
        block.split(ELLIPSIS).skip(1).collect::<Vec<_>>().join(" ")
    } else if block.contains('\n') {
        block.lines().skip(1).collect::<Vec<_>>().join(" ")
    } else {
        block.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synopsis_with_ellipsis_heading() {
        let text = "FZUS51 KBOX 150830\n\
                    .SYNOPSIS FOR MASSACHUSETTS AND RHODE ISLAND COASTAL WATERS...\n\
                    High pressure builds over the waters today.\n\
                    A cold front approaches Tuesday.\n\
                    \n\
                    $$\n\
                    ANZ230-151600-\n";

        assert_eq!(
            extract_synopsis(text),
            "High pressure builds over the waters today. A cold front approaches Tuesday."
        );
    }

    #[test]
    fn test_synopsis_heading_and_text_on_one_line() {
        let text = "SYNOPSIS...Weak high pressure over the region.\n$$";
        assert_eq!(extract_synopsis(text), "Weak high pressure over the region.");
    }

    #[test]
    fn test_synopsis_multiple_ellipsis_segments() {
        let text = "Synopsis for the waters...Gale warning in effect...Seas building\n$$";
        assert_eq!(
            extract_synopsis(text),
            "Gale warning in effect Seas building"
        );
    }

    #[test]
    fn test_synopsis_without_ellipsis_drops_first_line() {
        let text = "Synopsis for Lake Superior\nHigh pressure will remain\nover the lake through Monday.\n$$";
        assert_eq!(
            extract_synopsis(text),
            "High pressure will remain over the lake through Monday."
        );
    }

    #[test]
    fn test_single_line_synopsis_returned_unchanged() {
        let text = "SYNOPSIS: calm seas expected $$";
        assert_eq!(extract_synopsis(text), ": calm seas expected");
    }

    #[test]
    fn test_synopsis_is_case_insensitive_and_first_match_wins() {
        let text = "syNopsis...first one\n$$\nSYNOPSIS...second one\n$$";
        assert_eq!(extract_synopsis(text), "first one");
    }

    #[test]
    fn test_missing_synopsis_is_empty() {
        assert_eq!(extract_synopsis("ANZ230-\nNo summary here\n$$"), "");
        // no terminating sentinel
        assert_eq!(extract_synopsis("SYNOPSIS...never closed"), "");
    }

    #[test]
    fn test_crlf_line_breaks() {
        let text = "Synopsis\r\nLine two\r\nline three\r\n$$";
        assert_eq!(extract_synopsis(text), "Line two line three");
    }
}
