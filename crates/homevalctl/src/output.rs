//! Terminal output for valuation results.

use homeval_common::{PropertyAttributes, Recommendation, ValuationResult};
use owo_colors::OwoColorize;

const KEY_WIDTH: usize = 16;

/// Whole-unit amount with thousands separators, e.g. "$1,234,567"
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round().abs() as u64;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Signed percentage of estimate over listing, e.g. "+7.9%"
pub fn format_gap(listing_price: f64, estimated_value: f64) -> String {
    let pct = (estimated_value - listing_price) * 100.0 / listing_price;
    format!("{:+.1}%", pct)
}

fn recommendation_colored(recommendation: Recommendation) -> String {
    let label = recommendation.as_str().to_uppercase();
    match recommendation {
        Recommendation::Underpriced => label.bright_green().to_string(),
        Recommendation::Fair => label.cyan().to_string(),
        Recommendation::Overpriced => label.bright_red().to_string(),
    }
}

fn print_kv(key: &str, value: &str) {
    println!("  {:width$} {}", key, value, width = KEY_WIDTH);
}

pub fn display_valuation(property: &PropertyAttributes, result: &ValuationResult) {
    println!();
    println!(
        "[VALUATION]  {}, {}",
        property.city.bold(),
        property.state.bold()
    );
    println!();

    print_kv("listing_price", &format_currency(property.listing_price));
    print_kv("estimated_value", &format_currency(result.estimated_value));
    print_kv(
        "gap",
        &format_gap(property.listing_price, result.estimated_value),
    );
    print_kv("confidence", &format!("{}%", result.confidence));
    print_kv(
        "recommendation",
        &recommendation_colored(result.recommendation),
    );

    let source = if result.is_degraded() {
        result.source.as_str().yellow().to_string()
    } else {
        result.source.as_str().to_string()
    };
    print_kv("source", &source);

    println!();
    println!("[REASONING]");
    for line in result.reasoning.trim().lines() {
        println!("  {}", line);
    }
    println!();
}

pub fn display_credential_status(api_key_env: &str, present: bool) {
    if present {
        println!("[OK] credential found in ${}", api_key_env);
    } else {
        println!(
            "[NOTE] {} not set; valuations use the fallback market simulation",
            format!("${}", api_key_env).yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(512_340.0), "$512,340");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1_000.0), "$1,000");
        assert_eq!(format_currency(0.0), "$0");
    }

    #[test]
    fn test_format_currency_rounds() {
        assert_eq!(format_currency(498_750.5), "$498,751");
        assert_eq!(format_currency(-12_000.0), "-$12,000");
    }

    #[test]
    fn test_format_gap() {
        assert_eq!(format_gap(100_000.0, 109_000.0), "+9.0%");
        assert_eq!(format_gap(100_000.0, 91_000.0), "-9.0%");
        assert_eq!(format_gap(100_000.0, 100_000.0), "+0.0%");
    }
}
