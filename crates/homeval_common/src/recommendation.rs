//! Listing price classification.
//!
//! The 8% threshold does not line up with the fallback sampling bands
//! (5% / 15%). Both values are kept as they are.

use crate::valuation::Recommendation;

/// Percentage deviation beyond which a listing is no longer fair
pub const RECOMMENDATION_THRESHOLD_PCT: f64 = 8.0;

/// Classify a listing against an estimate.
///
/// p = (estimate - listing) / listing * 100; underpriced when p > 8,
/// overpriced when p < -8, fair otherwise (boundaries are fair).
pub fn classify_recommendation(listing_price: f64, estimated_value: f64) -> Recommendation {
    // Scale before dividing so whole-number inputs land on exact percentages
    let diff_pct = (estimated_value - listing_price) * 100.0 / listing_price;

    if diff_pct > RECOMMENDATION_THRESHOLD_PCT {
        Recommendation::Underpriced
    } else if diff_pct < -RECOMMENDATION_THRESHOLD_PCT {
        Recommendation::Overpriced
    } else {
        Recommendation::Fair
    }
}
