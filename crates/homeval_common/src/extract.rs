//! Numeric estimate extraction from free-form model replies.
//!
//! Takes the first numeric token in the text, optionally preceded by a
//! currency symbol and optionally grouped with `,` thousands separators.
//! Nothing smarter happens here: "3-bed home worth $450,000" yields 3.

use once_cell::sync::Lazy;
use regex::Regex;

static ESTIMATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[$₹€£]\s?)?(\d[\d,]*(?:\.\d+)?)").expect("estimate pattern is valid")
});

/// Outcome of scanning a reply for an estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedEstimate {
    Parsed(f64),
    Unparsable,
}

impl ParsedEstimate {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Parsed(v) => Some(v),
            Self::Unparsable => None,
        }
    }
}

/// Pull the first numeric token out of `text`.
///
/// Zero, negative or non-finite tokens count as `Unparsable`.
pub fn extract_estimate(text: &str) -> ParsedEstimate {
    let Some(caps) = ESTIMATE_TOKEN.captures(text) else {
        return ParsedEstimate::Unparsable;
    };

    let digits: String = caps[1].chars().filter(|c| *c != ',').collect();
    match digits.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => ParsedEstimate::Parsed(v),
        _ => ParsedEstimate::Unparsable,
    }
}
