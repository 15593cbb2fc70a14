//! Property attributes and request-side validation.
//!
//! The engine assumes attributes are already inside these bounds; callers
//! run `validate()` before handing a property over.

use serde::{Deserialize, Serialize};

/// Smallest accepted living area in square feet
pub const MIN_SQFT: f64 = 200.0;

/// Largest accepted living area in square feet
pub const MAX_SQFT: f64 = 50_000.0;

/// Lower bound for bedroom and bathroom counts
pub const MIN_ROOMS: f64 = 1.0;

/// Upper bound for bedroom and bathroom counts
pub const MAX_ROOMS: f64 = 20.0;

/// Lowest accepted listing price
pub const MIN_LISTING_PRICE: f64 = 10_000.0;

/// Highest accepted listing price (100M)
pub const MAX_LISTING_PRICE: f64 = 100_000_000.0;

/// Attributes of one property, constructed per valuation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAttributes {
    pub city: String,
    pub state: String,
    pub sqft: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub listing_price: f64,
}

/// Validation failures, reported before the engine is invoked
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("All property fields are required (missing {0})")]
    MissingField(&'static str),

    #[error("Numeric values must be greater than zero ({0})")]
    NonPositive(&'static str),

    #[error("Unrealistic bedroom or bathroom count")]
    UnrealisticRooms,

    #[error("Square feet value looks invalid: {0}")]
    SquareFootageOutOfRange(f64),

    #[error("Listing price out of range: {0}")]
    ListingPriceOutOfRange(f64),
}

impl PropertyAttributes {
    /// Copy with surrounding whitespace stripped from city and state
    pub fn normalized(&self) -> Self {
        Self {
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            ..self.clone()
        }
    }

    /// Check every attribute against its accepted domain.
    ///
    /// Checks run in a fixed order: presence, positivity, room counts,
    /// square footage, listing price. The first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.city.trim().is_empty() {
            return Err(ValidationError::MissingField("city"));
        }
        if self.state.trim().is_empty() {
            return Err(ValidationError::MissingField("state"));
        }

        let numeric = [
            ("sqft", self.sqft),
            ("bedrooms", f64::from(self.bedrooms)),
            ("bathrooms", self.bathrooms),
            ("listingPrice", self.listing_price),
        ];
        for (name, value) in numeric {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::NonPositive(name));
            }
        }

        let rooms = MIN_ROOMS..=MAX_ROOMS;
        if !rooms.contains(&f64::from(self.bedrooms)) || !rooms.contains(&self.bathrooms) {
            return Err(ValidationError::UnrealisticRooms);
        }

        if !(MIN_SQFT..=MAX_SQFT).contains(&self.sqft) {
            return Err(ValidationError::SquareFootageOutOfRange(self.sqft));
        }

        if !(MIN_LISTING_PRICE..=MAX_LISTING_PRICE).contains(&self.listing_price) {
            return Err(ValidationError::ListingPriceOutOfRange(self.listing_price));
        }

        Ok(())
    }
}
