//! Field-level checks applied to assumptions records before any formula runs.
//!
//! Each check names the offending field in the returned
//! [`PlannerError::InvalidInput`], so callers can point users at the exact
//! input that failed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::PlannerError;
use crate::types::{Money, Percent};
use crate::PlannerResult;

/// Upper bound for any percentage input (returns, inflation).
pub const MAX_PERCENT: Decimal = dec!(100);

/// Longest horizon, in years, any projector accepts.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Oldest age any projector accepts.
pub const MAX_AGE: u32 = 120;

fn invalid(field: &str, reason: String) -> PlannerError {
    PlannerError::InvalidInput {
        field: field.into(),
        reason,
    }
}

/// Money amounts must be non-negative.
pub fn non_negative_money(field: &str, value: Money) -> PlannerResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, format!("{field} must be >= 0 (got {value})")));
    }
    Ok(())
}

/// Percent rates must lie in `[0, 100]`.
pub fn percent(field: &str, value: Percent) -> PlannerResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, format!("{field} must be >= 0% (got {value}%)")));
    }
    if value > MAX_PERCENT {
        return Err(invalid(
            field,
            format!("{field} must be <= {MAX_PERCENT}% (got {value}%)"),
        ));
    }
    Ok(())
}

/// Horizons must lie in `[min, MAX_HORIZON_YEARS]`.
pub fn horizon_years(field: &str, years: u32, min: u32) -> PlannerResult<()> {
    if years < min {
        return Err(invalid(field, format!("{field} must be >= {min} (got {years})")));
    }
    if years > MAX_HORIZON_YEARS {
        return Err(invalid(
            field,
            format!("{field} must be <= {MAX_HORIZON_YEARS} (got {years})"),
        ));
    }
    Ok(())
}

pub fn age(field: &str, value: u32) -> PlannerResult<()> {
    if value > MAX_AGE {
        return Err(invalid(field, format!("{field} must be <= {MAX_AGE} (got {value})")));
    }
    Ok(())
}
