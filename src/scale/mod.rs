//! Ingredient scaling for display.
//!
//! Amounts are free text. Only plain decimal numbers are scaled; fractions,
//! ranges and prose ("a pinch") are shown exactly as typed.

use crate::model::Ingredient;
use regex::Regex;
use std::sync::OnceLock;

fn decimal_pattern() -> &'static Regex {
    static DECIMAL: OnceLock<Regex> = OnceLock::new();
    DECIMAL.get_or_init(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap())
}

/// Parses `amount` as a decimal number, rejecting `inf`, `NaN` and padding.
pub fn parse_amount(amount: &str) -> Option<f64> {
    if !decimal_pattern().is_match(amount) {
        return None;
    }
    amount.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Significant digits kept in a scaled amount.
const SCALED_DIGITS: usize = 10;

/// Scales a numeric amount and formats it back to its shortest form.
///
/// Non-numeric text comes back as-is. A factor of 1.0 still reformats, so
/// "1.50" becomes "1.5" whatever the scale, but never changes the value.
/// Any other factor rounds the product to [`SCALED_DIGITS`] significant
/// digits, so `0.1 * 3` shows as "0.3".
pub fn scale_amount(amount: &str, factor: f64) -> String {
    match parse_amount(amount) {
        Some(value) if factor == 1.0 => format_amount(value),
        Some(value) => {
            let scaled = value * factor;
            if scaled.is_finite() {
                format_amount(round_significant(scaled))
            } else {
                amount.to_string()
            }
        }
        None => amount.to_string(),
    }
}

fn round_significant(value: f64) -> f64 {
    format!("{:.*e}", SCALED_DIGITS - 1, value)
        .parse()
        .unwrap_or(value)
}

fn format_amount(value: f64) -> String {
    // -0.0 would otherwise print as "-0"
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Builds the display line for one ingredient:
/// `"{amount} {unit} {ingredient} {notes}"`, leaving out empty parts.
pub fn ingredient_line(ingredient: &Ingredient, factor: f64) -> String {
    let amount = scale_amount(&ingredient.amount, factor);
    [
        amount.as_str(),
        ingredient.unit.as_str(),
        ingredient.ingredient.as_str(),
        ingredient.notes.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

/// Display lines for every ingredient, in order.
pub fn scale_ingredients(ingredients: &[Ingredient], factor: f64) -> Vec<String> {
    ingredients
        .iter()
        .map(|ingredient| ingredient_line(ingredient, factor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubling_flour() {
        let ingredients = vec![Ingredient::new("2", "cups", "flour", "")];
        assert_eq!(scale_ingredients(&ingredients, 2.0), vec!["4 cups flour"]);
    }

    #[test]
    fn test_identity_scale_normalizes() {
        assert_eq!(scale_amount("1.50", 1.0), "1.5");
        assert_eq!(scale_amount("2.0", 1.0), "2");
        assert_eq!(scale_amount("007", 1.0), "7");
        assert_eq!(scale_amount(".5", 1.0), "0.5");
        assert_eq!(scale_amount("3.", 1.0), "3");
    }

    #[test]
    fn test_identity_scale_preserves_value() {
        for amount in ["1", "0.25", "12.5", "1e2", "-3", "+4.75", "0.1"] {
            let scaled = scale_amount(amount, 1.0);
            assert_eq!(
                scaled.parse::<f64>().unwrap(),
                amount.parse::<f64>().unwrap(),
                "{}",
                amount
            );
        }
    }

    #[test]
    fn test_fractional_scales() {
        assert_eq!(scale_amount("3", 0.5), "1.5");
        assert_eq!(scale_amount("1.5", 2.5), "3.75");
        assert_eq!(scale_amount("2", 3.0), "6");
        assert_eq!(scale_amount("1", 0.1), "0.1");
    }

    #[test]
    fn test_products_drop_float_noise() {
        assert_eq!(scale_amount("0.1", 3.0), "0.3");
        assert_eq!(scale_amount("1.1", 3.0), "3.3");
        assert_eq!(scale_amount("0.7", 1.5), "1.05");
        assert_eq!(scale_amount("0.2", 0.1), "0.02");
        assert_eq!(scale_amount("1e20", 2.0), "200000000000000000000");
        assert_eq!(scale_amount("-0.1", 0.0), "0");
    }

    #[test]
    fn test_identity_scale_keeps_long_amounts() {
        assert_eq!(scale_amount("0.12345678901234", 1.0), "0.12345678901234");
    }

    #[test]
    fn test_non_numeric_passes_through() {
        assert_eq!(scale_amount("a pinch", 2.0), "a pinch");
        assert_eq!(scale_amount("1/2", 2.0), "1/2");
        assert_eq!(scale_amount("2-3", 2.0), "2-3");
        assert_eq!(scale_amount(" 2", 2.0), " 2");
        assert_eq!(scale_amount("inf", 2.0), "inf");
        assert_eq!(scale_amount("NaN", 2.0), "NaN");
        assert_eq!(scale_amount("", 2.0), "");
    }

    #[test]
    fn test_overflow_falls_back_to_text() {
        assert_eq!(scale_amount("1e308", 10.0), "1e308");
    }

    #[test]
    fn test_zero_has_no_sign() {
        assert_eq!(scale_amount("-0", 1.0), "0");
        assert_eq!(scale_amount("0", 2.0), "0");
    }

    #[test]
    fn test_line_omits_empty_fields() {
        let line = ingredient_line(&Ingredient::new("", "", "salt", "to taste"), 2.0);
        assert_eq!(line, "salt to taste");

        let line = ingredient_line(&Ingredient::new("a pinch", "", "salt", ""), 2.0);
        assert_eq!(line, "a pinch salt");

        let line = ingredient_line(&Ingredient::new("1", "tbsp", "butter", "softened"), 0.5);
        assert_eq!(line, "0.5 tbsp butter softened");

        let line = ingredient_line(&Ingredient::default(), 1.0);
        assert_eq!(line, "");
    }

    #[test]
    fn test_scales_every_ingredient_in_order() {
        let ingredients = vec![
            Ingredient::new("2", "", "eggs", ""),
            Ingredient::new("some", "", "water", ""),
            Ingredient::new("250", "ml", "milk", "warm"),
        ];
        assert_eq!(
            scale_ingredients(&ingredients, 1.5),
            vec!["3 eggs", "some water", "375 ml milk warm"]
        );
    }
}
