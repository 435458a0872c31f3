//! Shared arithmetic helpers for the tax calculators.

use rust_decimal::Decimal;

/// Rounds a monetary value to two decimal places using half-up rounding
/// (away from zero at the midpoint), the standard financial convention.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fiscal_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// The larger of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Converts a rate on the 0–100 percentage scale to its fraction.
pub fn pct(rate: Decimal) -> Decimal {
    rate / Decimal::ONE_HUNDRED
}

/// `numerator / denominator × 100`, or zero when the denominator is zero.
///
/// Every ratio the engine reports goes through this guard so a zero
/// denominator yields 0 rather than a division panic.
pub fn ratio_pct(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator == Decimal::ZERO {
        Decimal::ZERO
    } else {
        round_half_up(numerator / denominator * Decimal::ONE_HUNDRED)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(10.014)), dec!(10.01));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(10.015)), dec!(10.02));
    }

    #[test]
    fn round_half_up_is_away_from_zero_for_negatives() {
        assert_eq!(round_half_up(dec!(-10.015)), dec!(-10.02));
    }

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(1.00), dec!(2.00)), dec!(2.00));
        assert_eq!(max(dec!(-1.00), dec!(-2.00)), dec!(-1.00));
    }

    #[test]
    fn pct_converts_percentage_scale() {
        assert_eq!(pct(dec!(18)), dec!(0.18));
        assert_eq!(pct(dec!(1.65)), dec!(0.0165));
    }

    #[test]
    fn ratio_pct_computes_percentage() {
        assert_eq!(ratio_pct(dec!(80000), dec!(500000)), dec!(16.00));
    }

    #[test]
    fn ratio_pct_guards_zero_denominator() {
        assert_eq!(ratio_pct(dec!(123.45), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn ratio_pct_handles_negative_numerator() {
        assert_eq!(ratio_pct(dec!(-50), dec!(200)), dec!(-25.00));
    }
}
