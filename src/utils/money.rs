//! Money helpers.
//!
//! Monetary values are stored as NUMERIC (BigDecimal) in Postgres and exposed
//! as f64 in JSON responses, rounded to cents at the boundary.

use num_traits::ToPrimitive;
use sqlx::types::BigDecimal;

/// Round a computed amount to 2 decimal places.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert an f64 amount into a BigDecimal for persistence.
/// Non-finite inputs (already rejected by request validation) collapse to zero.
pub fn to_bigdecimal(value: f64) -> BigDecimal {
    BigDecimal::try_from(value).unwrap_or_default()
}

/// Convert a stored BigDecimal back to f64 for responses.
pub fn to_f64(value: &BigDecimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(10.005), 10.01);
        assert_eq!(round_to_cents(10.004), 10.0);
        assert_eq!(round_to_cents(0.0), 0.0);
        assert_eq!(round_to_cents(123.456), 123.46);
    }

    #[test]
    fn test_bigdecimal_round_trip() {
        let bd = to_bigdecimal(149.99);
        assert!((to_f64(&bd) - 149.99).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_collapses_to_zero() {
        assert_eq!(to_f64(&to_bigdecimal(f64::NAN)), 0.0);
    }
}
