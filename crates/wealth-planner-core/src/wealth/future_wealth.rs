use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::{self, add, mul};
use crate::types::{with_metadata, Component, ComputationOutput, Money, Percent};
use crate::validation;
use crate::PlannerResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Assumptions for projecting total wealth from an existing portfolio plus
/// recurring yearly and monthly contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureWealthInput {
    /// Value of the portfolio today.
    pub current_portfolio: Money,
    /// Lumpsum added at the end of every year.
    pub lumpsum_yearly: Money,
    /// SIP paid at the start of every month.
    pub monthly_sip: Money,
    /// Expected annual return, in percent (13 = 13%).
    pub expected_return: Percent,
    pub years: u32,
}

impl Default for FutureWealthInput {
    fn default() -> Self {
        Self {
            current_portfolio: dec!(2_500_000),
            lumpsum_yearly: dec!(300_000),
            monthly_sip: dec!(20_000),
            expected_return: dec!(13),
            years: 20,
        }
    }
}

/// Projected wealth at the end of the horizon. Values are unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureWealthOutput {
    pub future_value_current: Money,
    pub future_value_lumpsum: Money,
    pub future_value_sip: Money,
    /// Exactly `future_value_current + future_value_lumpsum + future_value_sip`.
    pub total_wealth: Money,
    /// Nominal amount put in: `current + yearly * years + monthly * 12 * years`.
    pub total_invested: Money,
    /// `total_wealth - total_invested`
    pub estimated_return: Money,
    pub years: u32,
    pub composition: Vec<Component>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(input: &FutureWealthInput) -> PlannerResult<()> {
    validation::non_negative_money("current_portfolio", input.current_portfolio)?;
    validation::non_negative_money("lumpsum_yearly", input.lumpsum_yearly)?;
    validation::non_negative_money("monthly_sip", input.monthly_sip)?;
    validation::percent("expected_return", input.expected_return)?;
    validation::horizon_years("years", input.years, 0)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project the future value of the current portfolio (annual compounding),
/// the yearly lumpsum stream (ordinary annuity) and the monthly SIP stream
/// (annuity-due at the flat monthly rate), and their total.
pub fn project_future_wealth(
    input: &FutureWealthInput,
) -> PlannerResult<ComputationOutput<FutureWealthOutput>> {
    validate(input)?;
    let mut warnings: Vec<String> = Vec::new();

    let annual = time_value::annual_rate(input.expected_return);
    let monthly = time_value::monthly_rate(input.expected_return);
    let months = input.years * 12;
    debug!(
        "future wealth: annual rate {annual}, monthly rate {monthly}, {} years / {months} months",
        input.years
    );

    let future_value_current =
        time_value::lumpsum_future_value(input.current_portfolio, annual, input.years)?;
    let future_value_lumpsum =
        time_value::ordinary_annuity_future_value(input.lumpsum_yearly, annual, input.years)?;
    let future_value_sip =
        time_value::annuity_due_future_value_monthly(input.monthly_sip, monthly, months)?;

    let total_wealth = add(
        add(future_value_current, future_value_lumpsum, "total wealth")?,
        future_value_sip,
        "total wealth",
    )?;

    let years = Decimal::from(input.years);
    let lumpsum_paid = mul(input.lumpsum_yearly, years, "total invested")?;
    let sip_paid = mul(input.monthly_sip, Decimal::from(months), "total invested")?;
    let total_invested = add(
        add(input.current_portfolio, lumpsum_paid, "total invested")?,
        sip_paid,
        "total invested",
    )?;
    let estimated_return = total_wealth - total_invested;

    if input.years == 0 {
        warnings.push("Horizon is 0 years: projected wealth equals the current portfolio".into());
    }

    let composition = vec![
        Component::new("Current Portfolio", future_value_current),
        Component::new("Lumpsum Investments", future_value_lumpsum),
        Component::new("SIP Investments", future_value_sip),
        Component::new("Wealth Gained", estimated_return),
    ];

    let output = FutureWealthOutput {
        future_value_current,
        future_value_lumpsum,
        future_value_sip,
        total_wealth,
        total_invested,
        estimated_return,
        years: input.years,
        composition,
    };

    with_metadata(
        "Future Wealth (lumpsum compounding + ordinary annuity + monthly annuity-due SIP)",
        input,
        warnings,
        output,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_scenario_totals() {
        let result = project_future_wealth(&FutureWealthInput::default()).unwrap();
        let out = &result.result;

        assert_eq!(out.total_invested, dec!(13_300_000));
        assert_eq!(
            out.total_wealth,
            out.future_value_current + out.future_value_lumpsum + out.future_value_sip
        );
        assert_eq!(out.estimated_return, out.total_wealth - out.total_invested);
        assert_eq!(out.years, 20);
    }

    #[test]
    fn test_current_portfolio_compounds_annually() {
        let result = project_future_wealth(&FutureWealthInput::default()).unwrap();
        // 2.5M * 1.13^20 ~= 28,807,719.41
        let fv = result.result.future_value_current;
        assert!((fv - dec!(28_807_719.41)).abs() < dec!(0.01), "fv={fv}");
    }

    #[test]
    fn test_zero_contributions_only_current_portfolio() {
        let input = FutureWealthInput {
            lumpsum_yearly: Decimal::ZERO,
            monthly_sip: Decimal::ZERO,
            ..FutureWealthInput::default()
        };
        let out = project_future_wealth(&input).unwrap().result;
        assert_eq!(out.future_value_lumpsum, Decimal::ZERO);
        assert_eq!(out.future_value_sip, Decimal::ZERO);
        assert_eq!(out.total_wealth, out.future_value_current);
    }

    #[test]
    fn test_zero_years_returns_current_portfolio() {
        let input = FutureWealthInput {
            years: 0,
            ..FutureWealthInput::default()
        };
        let result = project_future_wealth(&input).unwrap();
        assert_eq!(result.result.total_wealth, dec!(2_500_000));
        assert_eq!(result.result.estimated_return, Decimal::ZERO);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_composition_labels_in_order() {
        let out = project_future_wealth(&FutureWealthInput::default())
            .unwrap()
            .result;
        let labels: Vec<&str> = out.composition.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Current Portfolio",
                "Lumpsum Investments",
                "SIP Investments",
                "Wealth Gained"
            ]
        );
        assert_eq!(out.composition[3].amount, out.estimated_return);
    }

    #[test]
    fn test_zero_return_is_division_by_zero() {
        let input = FutureWealthInput {
            expected_return: Decimal::ZERO,
            ..FutureWealthInput::default()
        };
        let err = project_future_wealth(&input).unwrap_err();
        assert!(matches!(err, PlannerError::DivisionByZero { .. }));
    }

    #[test]
    fn test_negative_portfolio_rejected() {
        let input = FutureWealthInput {
            current_portfolio: dec!(-1),
            ..FutureWealthInput::default()
        };
        match project_future_wealth(&input).unwrap_err() {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "current_portfolio"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_first_invalid_field_reported() {
        let input = FutureWealthInput {
            monthly_sip: dec!(-5),
            expected_return: dec!(-1),
            ..FutureWealthInput::default()
        };
        match project_future_wealth(&input).unwrap_err() {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "monthly_sip"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
