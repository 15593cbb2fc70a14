//! Fallback pricing model and confidence calibration.
//!
//! Used whenever no external signal exists. The estimate is a randomized but
//! bounded market simulation driven only by the listing price:
//!
//! | draw r        | market band | multiplier      |
//! |---------------|-------------|-----------------|
//! | r < 0.30      | below       | [0.85, 0.95)    |
//! | r < 0.65      | near        | [0.95, 1.05)    |
//! | otherwise     | above       | [1.05, 1.20)    |
//!
//! Confidence is a heuristic, not a statistical derivation: bigger gaps
//! between listing price and estimate are read as stronger signals and get
//! higher scores. It is computed from the resulting gap, never from the
//! band that was sampled.
//!
//! All randomness comes from the caller's `Rng` so tests can seed it.

use rand::Rng;
use std::ops::{Range, RangeInclusive};

/// Market band picked by the first uniform draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketBand {
    /// Market values the home below its listing price
    Below,
    /// Market values the home close to its listing price
    Near,
    /// Market values the home above its listing price
    Above,
}

impl MarketBand {
    /// Map a uniform draw in [0, 1) to a band
    pub fn from_draw(r: f64) -> Self {
        if r < 0.30 {
            Self::Below
        } else if r < 0.65 {
            Self::Near
        } else {
            Self::Above
        }
    }

    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_draw(rng.gen::<f64>())
    }

    /// Half-open multiplier range applied to the listing price
    pub fn multiplier_range(self) -> Range<f64> {
        match self {
            Self::Below => 0.85..0.95,
            Self::Near => 0.95..1.05,
            Self::Above => 1.05..1.20,
        }
    }
}

/// Simulated market estimate for a listing, rounded to a whole amount.
///
/// `listing_price` must be positive and finite.
pub fn fallback_estimate<R: Rng + ?Sized>(listing_price: f64, rng: &mut R) -> f64 {
    let band = MarketBand::sample(rng);
    let multiplier = rng.gen_range(band.multiplier_range());
    (listing_price * multiplier).round()
}

/// |estimate - listing| / listing
pub fn relative_deviation(listing_price: f64, estimated_value: f64) -> f64 {
    (estimated_value - listing_price).abs() / listing_price
}

/// Confidence tier selected by relative deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    /// d <= 0.05
    Weak,
    /// 0.05 < d <= 0.15
    Moderate,
    /// d > 0.15
    Strong,
}

impl ConfidenceTier {
    pub fn for_deviation(d: f64) -> Self {
        if d > 0.15 {
            Self::Strong
        } else if d > 0.05 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    /// Inclusive range of integer scores for this tier
    pub fn range(self) -> RangeInclusive<u8> {
        match self {
            Self::Weak => 75..=82,
            Self::Moderate => 85..=92,
            Self::Strong => 90..=95,
        }
    }
}

/// Draw a confidence score for a (listing, estimate) pair.
pub fn calibrate_confidence<R: Rng + ?Sized>(
    listing_price: f64,
    estimated_value: f64,
    rng: &mut R,
) -> u8 {
    let tier = ConfidenceTier::for_deviation(relative_deviation(listing_price, estimated_value));
    rng.gen_range(tier.range())
}
