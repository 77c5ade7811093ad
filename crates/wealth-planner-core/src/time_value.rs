use log::warn;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::PlannerError;
use crate::types::{Money, Percent, Rate};
use crate::PlannerResult;

const PERCENT: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Rate conversions
// ---------------------------------------------------------------------------

/// Annual percentage (12 = 12%) to decimal annual rate (0.12).
pub fn annual_rate(percent: Percent) -> Rate {
    percent / PERCENT
}

/// Annual percentage to decimal monthly rate by flat division: `percent / 100 / 12`.
///
/// This is not the geometric monthly equivalent `(1 + r)^(1/12) - 1`. All
/// monthly projections use the flat convention and must keep doing so.
pub fn monthly_rate(percent: Percent) -> Rate {
    percent / PERCENT / MONTHS_PER_YEAR
}

// ---------------------------------------------------------------------------
// Checked arithmetic
// ---------------------------------------------------------------------------

fn overflow(context: &str) -> PlannerError {
    PlannerError::NumericOverflow {
        context: context.into(),
    }
}

pub(crate) fn add(a: Decimal, b: Decimal, context: &str) -> PlannerResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(context))
}

pub(crate) fn mul(a: Decimal, b: Decimal, context: &str) -> PlannerResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(context))
}

pub(crate) fn div(a: Decimal, b: Decimal, context: &str) -> PlannerResult<Decimal> {
    if b.is_zero() {
        return Err(PlannerError::DivisionByZero {
            context: context.into(),
        });
    }
    a.checked_div(b).ok_or_else(|| overflow(context))
}

/// `(1 + rate)^periods`, evaluated by exponentiation by squaring.
pub fn growth_factor(rate: Rate, periods: u32) -> PlannerResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powi(i64::from(periods))
        .ok_or_else(|| overflow("compound growth factor"))
}

// ---------------------------------------------------------------------------
// Compounding primitives
// ---------------------------------------------------------------------------

/// Lumpsum future value: `principal * (1 + annual_rate)^years`.
pub fn lumpsum_future_value(principal: Money, annual_rate: Rate, years: u32) -> PlannerResult<Money> {
    let factor = growth_factor(annual_rate, years)?;
    mul(principal, factor, "lumpsum future value")
}

/// Future value of one contribution at the end of each year, compounded annually:
/// `payment * ((1 + r)^years - 1) / r`.
///
/// A zero rate has no closed form here and is reported as
/// [`PlannerError::DivisionByZero`].
pub fn ordinary_annuity_future_value(
    payment: Money,
    annual_rate: Rate,
    years: u32,
) -> PlannerResult<Money> {
    if annual_rate.is_zero() {
        return Err(PlannerError::DivisionByZero {
            context: "ordinary annuity future value (annual rate is 0%)".into(),
        });
    }
    let factor = growth_factor(annual_rate, years)?;
    let annuity_factor = div(factor - Decimal::ONE, annual_rate, "ordinary annuity factor")?;
    mul(payment, annuity_factor, "ordinary annuity future value")
}

/// Annuity-due factor for monthly contributions at the start of each month:
/// `((1 + r)^months - 1) / r * (1 + r)`. Falls back to `months` at a 0% rate.
fn annuity_due_factor(monthly_rate: Rate, months: u32) -> PlannerResult<Decimal> {
    if monthly_rate.is_zero() {
        return Ok(Decimal::from(months));
    }
    let factor = growth_factor(monthly_rate, months)?;
    let ordinary = div(factor - Decimal::ONE, monthly_rate, "annuity-due factor")?;
    mul(ordinary, Decimal::ONE + monthly_rate, "annuity-due factor")
}

/// Future value of a monthly SIP paid at the start of each month:
/// `payment * ((1 + r)^months - 1) / r * (1 + r)`.
pub fn annuity_due_future_value_monthly(
    payment: Money,
    monthly_rate: Rate,
    months: u32,
) -> PlannerResult<Money> {
    let factor = annuity_due_factor(monthly_rate, months)?;
    mul(payment, factor, "annuity-due future value")
}

/// Monthly start-of-period payment that grows to `target` over `months`.
/// Inverse of [`annuity_due_future_value_monthly`].
pub fn annuity_due_payment_monthly(
    target: Money,
    monthly_rate: Rate,
    months: u32,
) -> PlannerResult<Money> {
    let factor = annuity_due_factor(monthly_rate, months)?;
    div(target, factor, "annuity-due payment (zero contribution months)")
}

/// Level payment that fully amortizes `present_value` over `periods`:
/// `pv * r / (1 - (1 + r)^-periods)`, or `pv / periods` at a 0% rate.
pub fn amortized_payment(
    present_value: Money,
    periodic_rate: Rate,
    periods: u32,
) -> PlannerResult<Money> {
    if periods == 0 {
        return Err(PlannerError::DivisionByZero {
            context: "amortized payment (zero periods)".into(),
        });
    }
    if periodic_rate.is_zero() {
        return div(present_value, Decimal::from(periods), "amortized payment");
    }

    let factor = growth_factor(periodic_rate, periods)?;
    let discount = div(Decimal::ONE, factor, "amortization discount factor")?;
    let numerator = mul(present_value, periodic_rate, "amortized payment")?;
    div(numerator, Decimal::ONE - discount, "amortized payment")
}

/// Present value of `periods` end-of-period payments that start at
/// `first_payment` and grow by `growth_rate` each period, discounted at
/// `discount_rate`:
///
/// `first_payment * (1 - ((1 + g) / (1 + r))^n) / (r - g)`
///
/// When `discount_rate == growth_rate` the formula is 0/0 and the value is
/// `first_payment * periods`.
pub fn growing_annuity_present_value(
    first_payment: Money,
    discount_rate: Rate,
    growth_rate: Rate,
    periods: u32,
) -> PlannerResult<Money> {
    if discount_rate == growth_rate {
        warn!(
            "growing annuity: discount rate equals growth rate ({discount_rate}), using payment * periods"
        );
        return mul(first_payment, Decimal::from(periods), "growing annuity present value");
    }

    let ratio = div(
        Decimal::ONE + growth_rate,
        Decimal::ONE + discount_rate,
        "growing annuity growth/discount ratio",
    )?;
    let ratio_n = ratio
        .checked_powi(i64::from(periods))
        .ok_or_else(|| overflow("growing annuity growth/discount ratio"))?;
    let factor = div(
        Decimal::ONE - ratio_n,
        discount_rate - growth_rate,
        "growing annuity factor",
    )?;
    mul(first_payment, factor, "growing annuity present value")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn test_rate_conversions() {
        assert_eq!(annual_rate(dec!(12)), dec!(0.12));
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn test_lumpsum_basic() {
        // 1000 at 10% for 2 years = 1210
        let fv = lumpsum_future_value(dec!(1000), dec!(0.10), 2).unwrap();
        assert_eq!(fv, dec!(1210));
    }

    #[test]
    fn test_lumpsum_zero_years_is_identity() {
        let fv = lumpsum_future_value(dec!(2_500_000), dec!(0.13), 0).unwrap();
        assert_eq!(fv, dec!(2_500_000));
    }

    #[test]
    fn test_ordinary_annuity_basic() {
        // 100 per year at 10% for 3 years: 100 * (1.331 - 1) / 0.1 = 331
        let fv = ordinary_annuity_future_value(dec!(100), dec!(0.10), 3).unwrap();
        assert_eq!(fv, dec!(331));
    }

    #[test]
    fn test_ordinary_annuity_zero_years() {
        let fv = ordinary_annuity_future_value(dec!(300_000), dec!(0.13), 0).unwrap();
        assert_eq!(fv, Decimal::ZERO);
    }

    #[test]
    fn test_ordinary_annuity_zero_rate_is_division_by_zero() {
        let err = ordinary_annuity_future_value(dec!(100), Decimal::ZERO, 5).unwrap_err();
        assert!(matches!(err, PlannerError::DivisionByZero { .. }));
    }

    #[test]
    fn test_annuity_due_one_month() {
        // A single payment at the start of the month earns one month of interest.
        let fv = annuity_due_future_value_monthly(dec!(1000), dec!(0.01), 1).unwrap();
        assert_close(fv, dec!(1010), dec!(0.0000001));
    }

    #[test]
    fn test_annuity_due_zero_rate_falls_back_to_sum() {
        let fv = annuity_due_future_value_monthly(dec!(5000), Decimal::ZERO, 240).unwrap();
        assert_eq!(fv, dec!(1_200_000));
    }

    #[test]
    fn test_annuity_due_zero_months() {
        let fv = annuity_due_future_value_monthly(dec!(5000), dec!(0.01), 0).unwrap();
        assert_eq!(fv, Decimal::ZERO);
    }

    #[test]
    fn test_annuity_due_payment_inverts_future_value() {
        let fv = annuity_due_future_value_monthly(dec!(20_000), dec!(0.01), 300).unwrap();
        let pmt = annuity_due_payment_monthly(fv, dec!(0.01), 300).unwrap();
        assert_close(pmt, dec!(20_000), dec!(0.000001));
    }

    #[test]
    fn test_annuity_due_payment_zero_months_rejected() {
        let err = annuity_due_payment_monthly(dec!(1000), dec!(0.01), 0).unwrap_err();
        assert!(matches!(err, PlannerError::DivisionByZero { .. }));
    }

    #[test]
    fn test_amortized_payment_textbook() {
        // 100_000 over 12 months at 1%/month => ~8884.88
        let pmt = amortized_payment(dec!(100_000), dec!(0.01), 12).unwrap();
        assert_close(pmt, dec!(8884.88), dec!(0.01));
    }

    #[test]
    fn test_amortized_payment_zero_rate() {
        let pmt = amortized_payment(dec!(240_000), Decimal::ZERO, 240).unwrap();
        assert_eq!(pmt, dec!(1000));
    }

    #[test]
    fn test_amortized_payment_zero_periods_rejected() {
        let err = amortized_payment(dec!(1000), dec!(0.01), 0).unwrap_err();
        assert!(matches!(err, PlannerError::DivisionByZero { .. }));
    }

    #[test]
    fn test_growing_annuity_degenerate_branch() {
        let pv = growing_annuity_present_value(dec!(1000), dec!(0.005), dec!(0.005), 360).unwrap();
        assert_eq!(pv, dec!(360_000));
    }

    #[test]
    fn test_growing_annuity_zero_growth_matches_level_annuity() {
        // With g = 0 the growing annuity is a level annuity: 100 * (1 - 1.1^-3) / 0.1
        let pv = growing_annuity_present_value(dec!(100), dec!(0.10), Decimal::ZERO, 3).unwrap();
        assert_close(pv, dec!(248.685199), dec!(0.00001));
    }

    #[test]
    fn test_growing_annuity_zero_periods() {
        let pv = growing_annuity_present_value(dec!(1000), dec!(0.01), dec!(0.005), 0).unwrap();
        assert_eq!(pv, Decimal::ZERO);
    }

    #[test]
    fn test_growth_factor_overflow_reported() {
        let err = growth_factor(dec!(1), 200).unwrap_err();
        assert!(matches!(err, PlannerError::NumericOverflow { .. }));
    }
}
