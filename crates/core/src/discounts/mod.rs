//! Discounts
//!
//! Line discount specifications and the policy that turns one into a discount
//! amount for a line subtotal.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Percentage discount outside of 0-100%.
    #[error("discount percentage must be between 0% and 100%, got {0}%")]
    PercentageOutOfRange(Decimal),

    /// Absolute discount below zero.
    #[error("discount amount cannot be negative")]
    NegativeAmount,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Discount applied to a single cart line.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LineDiscount {
    /// Take a percentage off the line subtotal (e.g., "10% off")
    PercentageOff(Percentage),

    /// Take a fixed amount off the line subtotal (e.g., "£2 off")
    AmountOff(Money<'static, Currency>),
}

/// Check that a discount is within bounds for the given line subtotal.
///
/// # Errors
///
/// Returns an error if:
/// - a percentage is below 0% or above 100% (`DiscountError::PercentageOutOfRange`).
/// - an amount is negative (`DiscountError::NegativeAmount`).
/// - an amount is in a different currency to the line (`DiscountError::Money`).
pub fn validate_discount(
    line_subtotal: &Money<'static, Currency>,
    discount: &LineDiscount,
) -> Result<(), DiscountError> {
    match discount {
        LineDiscount::PercentageOff(percent) => {
            let fraction = fraction_of(percent);

            if fraction < Decimal::ZERO || fraction > Decimal::ONE {
                return Err(DiscountError::PercentageOutOfRange(
                    (fraction * Decimal::ONE_HUNDRED).normalize(),
                ));
            }

            Ok(())
        }
        LineDiscount::AmountOff(amount) => {
            ensure_same_currency(line_subtotal, amount)?;

            if amount.to_minor_units() < 0 {
                return Err(DiscountError::NegativeAmount);
            }

            Ok(())
        }
    }
}

/// Compute the discount amount for a line subtotal.
///
/// Percentages are rounded half away from zero to the nearest minor unit.
/// The result is clamped to `0..=line_subtotal`, so a discount can never make
/// a line negative.
///
/// # Errors
///
/// Returns a [`DiscountError`] if:
/// - the percentage calculation overflows (`DiscountError::PercentConversion`).
/// - an amount is in a different currency to the line (`DiscountError::Money`).
pub fn compute_discount(
    line_subtotal: &Money<'static, Currency>,
    discount: &LineDiscount,
) -> Result<Money<'static, Currency>, DiscountError> {
    let subtotal_minor = line_subtotal.to_minor_units();

    let discount_minor = match discount {
        LineDiscount::PercentageOff(percent) => percent_of_minor(percent, subtotal_minor)?,
        LineDiscount::AmountOff(amount) => {
            ensure_same_currency(line_subtotal, amount)?;

            amount.to_minor_units()
        }
    };

    Ok(Money::from_minor(
        discount_minor.clamp(0, subtotal_minor.max(0)),
        line_subtotal.currency(),
    ))
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// # Errors
///
/// Returns an error if the percentage calculation overflows or cannot be safely represented
/// (`DiscountError::PercentConversion`).
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    fraction_of(percent)
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// The percentage as a fraction (0.25 for 25%).
fn fraction_of(percent: &Percentage) -> Decimal {
    // decimal_percentage doesn't expose the underlying Decimal
    (*percent) * Decimal::ONE
}

fn ensure_same_currency(
    line_subtotal: &Money<'static, Currency>,
    amount: &Money<'static, Currency>,
) -> Result<(), DiscountError> {
    if amount.currency() == line_subtotal.currency() {
        Ok(())
    } else {
        Err(DiscountError::Money(MoneyError::CurrencyMismatch {
            expected: line_subtotal.currency().iso_alpha_code,
            actual: amount.currency().iso_alpha_code,
        }))
    }
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percentage_discount_on_line_subtotal() -> TestResult {
        let subtotal = Money::from_minor(2000, GBP);
        let discount = LineDiscount::PercentageOff(Percentage::from(0.1));

        assert_eq!(
            compute_discount(&subtotal, &discount)?,
            Money::from_minor(200, GBP)
        );

        Ok(())
    }

    #[test]
    fn percentage_discount_rounds_half_away_from_zero() -> TestResult {
        let subtotal = Money::from_minor(5, GBP);
        let discount = LineDiscount::PercentageOff(Percentage::from(0.5));

        // 2.5p rounds up to 3p
        assert_eq!(
            compute_discount(&subtotal, &discount)?,
            Money::from_minor(3, GBP)
        );

        Ok(())
    }

    #[test]
    fn amount_discount_is_clamped_to_line_subtotal() -> TestResult {
        let subtotal = Money::from_minor(2000, GBP);
        let discount = LineDiscount::AmountOff(Money::from_minor(5000, GBP));

        assert_eq!(
            compute_discount(&subtotal, &discount)?,
            Money::from_minor(2000, GBP)
        );

        Ok(())
    }

    #[test]
    fn amount_discount_below_subtotal_is_unchanged() -> TestResult {
        let subtotal = Money::from_minor(2000, GBP);
        let discount = LineDiscount::AmountOff(Money::from_minor(150, GBP));

        assert_eq!(
            compute_discount(&subtotal, &discount)?,
            Money::from_minor(150, GBP)
        );

        Ok(())
    }

    #[test]
    fn amount_discount_in_other_currency_errors() {
        let subtotal = Money::from_minor(2000, GBP);
        let discount = LineDiscount::AmountOff(Money::from_minor(100, USD));

        assert_eq!(
            compute_discount(&subtotal, &discount),
            Err(DiscountError::Money(MoneyError::CurrencyMismatch {
                expected: GBP.iso_alpha_code,
                actual: USD.iso_alpha_code,
            }))
        );
    }

    #[test]
    fn validate_accepts_zero_and_full_percentages() -> TestResult {
        let subtotal = Money::from_minor(2000, GBP);

        validate_discount(&subtotal, &LineDiscount::PercentageOff(Percentage::from(0.0)))?;
        validate_discount(&subtotal, &LineDiscount::PercentageOff(Percentage::from(1.0)))?;

        Ok(())
    }

    #[test]
    fn validate_rejects_percentage_above_one_hundred() {
        let subtotal = Money::from_minor(2000, GBP);
        let result = validate_discount(&subtotal, &LineDiscount::PercentageOff(Percentage::from(1.5)));

        assert!(
            matches!(result, Err(DiscountError::PercentageOutOfRange(_))),
            "expected PercentageOutOfRange, got {result:?}"
        );
    }

    #[test]
    fn validate_rejects_negative_percentage() {
        let subtotal = Money::from_minor(2000, GBP);
        let result =
            validate_discount(&subtotal, &LineDiscount::PercentageOff(Percentage::from(-0.1)));

        assert!(
            matches!(result, Err(DiscountError::PercentageOutOfRange(_))),
            "expected PercentageOutOfRange, got {result:?}"
        );
    }

    #[test]
    fn validate_rejects_negative_amount() {
        let subtotal = Money::from_minor(2000, GBP);
        let result = validate_discount(
            &subtotal,
            &LineDiscount::AmountOff(Money::from_minor(-1, GBP)),
        );

        assert_eq!(result, Err(DiscountError::NegativeAmount));
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }

    #[test]
    fn percent_of_minor_calculates_correctly() -> TestResult {
        let percent = Percentage::from(0.25);
        let result = percent_of_minor(&percent, 200)?;

        assert_eq!(result, 50);

        Ok(())
    }
}
