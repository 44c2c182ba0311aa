//! Money calculation utilities using rust_decimal for precision
//!
//! All ledger arithmetic is done using `Decimal` internally, then converted
//! to `f64` for storage/serialization. Free-typed numeric input follows the
//! ledger-wide numeric-or-zero policy: anything that does not parse as a
//! finite number becomes zero, never an error.

use rust_decimal::prelude::*;
use serde_json::Value;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
///
/// Stored values come from `parse_or_zero`/`number_or_zero` and are always
/// finite. If a non-finite value somehow reaches here, logs an error and
/// returns ZERO to avoid silent corruption in the derived totals.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Round to 2 decimal places, half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value)
        .to_f64()
        // SAFETY: Decimal's entire value range (~7.9e28) sits inside f64's
        // representable range, so the conversion cannot fail
        .expect("Decimal is always representable as f64")
}

/// Parse free-typed input as a number, coercing failures to zero
///
/// This is the numeric-or-zero policy shared by every money/quantity input:
/// leading/trailing whitespace is ignored, empty input is zero, and anything
/// that is not a finite number is zero. Coercions of non-empty input are
/// logged at debug level so a host can surface a non-blocking warning.
pub fn parse_or_zero(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            tracing::debug!(input = %trimmed, "non-numeric input coerced to zero");
            0.0
        }
    }
}

/// Read a JSON field as a number under the numeric-or-zero policy
///
/// Numbers pass through when finite, numeric strings parse, and anything
/// else (missing, null, bool, array, object) is zero. Used when rebuilding
/// a ledger from a persisted payload.
pub fn number_or_zero(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => parse_or_zero(s),
        _ => 0.0,
    }
}

/// Compare two monetary values within tolerance
#[inline]
pub fn money_eq(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_decimal_precision() {
        // 0.1 + 0.2 drifts in binary floating point; Decimal holds exact
        let sum = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(sum, Decimal::new(3, 1));
    }

    #[test]
    fn test_accumulation_precision() {
        // 1000 additions of 0.01 must be exactly 10
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += to_decimal(0.01);
        }
        assert_eq!(total, Decimal::new(10, 0));
        assert_eq!(to_f64(total), 10.0);
    }

    #[test]
    fn test_to_decimal_non_finite_defaults_to_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
        assert_eq!(to_decimal(f64::NEG_INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_to_f64_rounds_half_up() {
        assert_eq!(to_f64(Decimal::new(2345, 3)), 2.35);
        assert_eq!(to_f64(Decimal::new(2344, 3)), 2.34);
        // Away from zero, not toward even
        assert_eq!(to_f64(Decimal::new(-2345, 3)), -2.35);
    }

    #[test]
    fn test_parse_or_zero_valid_numbers() {
        assert_eq!(parse_or_zero("10"), 10.0);
        assert_eq!(parse_or_zero("3.5"), 3.5);
        assert_eq!(parse_or_zero("-2.5"), -2.5);
        assert_eq!(parse_or_zero("  7 "), 7.0);
        assert_eq!(parse_or_zero("1e3"), 1000.0);
    }

    #[test]
    fn test_parse_or_zero_coerces_invalid_to_zero() {
        assert_eq!(parse_or_zero(""), 0.0);
        assert_eq!(parse_or_zero("   "), 0.0);
        assert_eq!(parse_or_zero("abc"), 0.0);
        // Full-string parse: trailing garbage is not a partial number
        assert_eq!(parse_or_zero("12abc"), 0.0);
        assert_eq!(parse_or_zero("inf"), 0.0);
        assert_eq!(parse_or_zero("NaN"), 0.0);
    }

    #[test]
    fn test_number_or_zero() {
        let payload = json!({
            "rate": 5,
            "qty": "4.2",
            "note": "text",
            "flag": true,
            "nothing": null
        });
        assert_eq!(number_or_zero(payload.get("rate")), 5.0);
        assert_eq!(number_or_zero(payload.get("qty")), 4.2);
        assert_eq!(number_or_zero(payload.get("note")), 0.0);
        assert_eq!(number_or_zero(payload.get("flag")), 0.0);
        assert_eq!(number_or_zero(payload.get("nothing")), 0.0);
        assert_eq!(number_or_zero(payload.get("missing")), 0.0);
    }

    #[test]
    fn test_money_eq_within_tolerance() {
        assert!(money_eq(Decimal::new(1000, 2), Decimal::new(1000, 2)));
        assert!(money_eq(Decimal::new(1000, 2), Decimal::new(1001, 2)));
        assert!(!money_eq(Decimal::new(1000, 2), Decimal::new(1002, 2)));
    }
}
