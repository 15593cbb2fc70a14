//! Analysis prompt sent to the completion service.

use crate::property::PropertyAttributes;

/// Build the analyst prompt for one property.
///
/// Attribute values are embedded as given; validation happens upstream.
pub fn build_property_prompt(property: &PropertyAttributes) -> String {
    format!(
        r#"
You are a professional real estate market analyst.

Analyze the following property and return ONLY valid JSON:

{{
  "estimatedValue": number,
  "confidence": number,
  "recommendation": "underpriced" | "fair" | "overpriced",
  "reasoning": string
}}

Property Details:
City: {}
State: {}
Square Feet: {}
Bedrooms: {}
Bathrooms: {}
Listing Price: {}

Consider:
- Location desirability
- Property size
- Market trends
- Comparable pricing
"#,
        property.city,
        property.state,
        property.sqft,
        property.bedrooms,
        property.bathrooms,
        property.listing_price,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PropertyAttributes {
        PropertyAttributes {
            city: "Portland".to_string(),
            state: "OR".to_string(),
            sqft: 2140.0,
            bedrooms: 4,
            bathrooms: 2.5,
            listing_price: 689_000.0,
        }
    }

    #[test]
    fn test_prompt_embeds_all_attributes() {
        let prompt = build_property_prompt(&sample());

        assert!(prompt.contains("City: Portland"));
        assert!(prompt.contains("State: OR"));
        assert!(prompt.contains("Square Feet: 2140"));
        assert!(prompt.contains("Bedrooms: 4"));
        assert!(prompt.contains("Bathrooms: 2.5"));
        assert!(prompt.contains("Listing Price: 689000"));
    }

    #[test]
    fn test_prompt_requests_json_schema() {
        let prompt = build_property_prompt(&sample());

        assert!(prompt.contains("real estate market analyst"));
        assert!(prompt.contains("return ONLY valid JSON"));
        assert!(prompt.contains(r#""estimatedValue": number"#));
        assert!(prompt.contains(r#""recommendation": "underpriced" | "fair" | "overpriced""#));
        assert!(prompt.contains(r#""reasoning": string"#));
    }

    #[test]
    fn test_prompt_lists_evaluation_factors() {
        let prompt = build_property_prompt(&sample());

        for factor in [
            "Location desirability",
            "Property size",
            "Market trends",
            "Comparable pricing",
        ] {
            assert!(prompt.contains(factor), "missing factor {}", factor);
        }
    }
}
