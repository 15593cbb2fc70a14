//! Valuation result types handed to the persistence and presentation layers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the listing price compares with the estimated value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    /// Listing price sits well below the estimate
    Underpriced,
    /// Listing price is within the fair band
    Fair,
    /// Listing price sits well above the estimate
    Overpriced,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Underpriced => "underpriced",
            Self::Fair => "fair",
            Self::Overpriced => "overpriced",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which path produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuationSource {
    /// The completion service answered
    Ai,
    /// Local market simulation (no credential, or the call failed)
    Fallback,
}

impl ValuationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ValuationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one valuation. Always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    /// Best estimate of fair market value
    pub estimated_value: f64,

    /// Heuristic certainty score in [0, 100]; not a statistical guarantee
    pub confidence: u8,

    pub recommendation: Recommendation,

    /// Raw model narrative, or a fixed sentence on the fallback path
    pub reasoning: String,

    pub source: ValuationSource,
}

impl ValuationResult {
    pub fn is_degraded(&self) -> bool {
        self.source == ValuationSource::Fallback
    }
}
