use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::time_value;
use crate::types::{with_metadata, Component, ComputationOutput, Money, Percent};
use crate::validation;
use crate::PlannerResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for sizing a retirement corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementInput {
    /// Household expense per month, in today's money.
    pub current_monthly_expense: Money,
    /// Expected annual inflation, in percent.
    pub inflation_rate: Percent,
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    /// Expected annual return while saving, in percent.
    pub pre_retirement_return: Percent,
    /// Expected annual return on the corpus during retirement, in percent.
    pub post_retirement_return: Percent,
    /// Investable wealth already accumulated.
    pub current_wealth: Money,
}

impl Default for RetirementInput {
    fn default() -> Self {
        Self {
            current_monthly_expense: dec!(100_000),
            inflation_rate: dec!(6),
            current_age: 35,
            retirement_age: 60,
            life_expectancy: 90,
            pre_retirement_return: dec!(12),
            post_retirement_return: dec!(7),
            current_wealth: dec!(1_500_000),
        }
    }
}

/// Corpus sizing result. Every monetary field is rounded to whole units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementOutput {
    pub monthly_expense_at_retirement: Money,
    pub corpus_required: Money,
    /// Monthly SIP (paid at the start of each month) that closes the shortfall.
    pub monthly_sip_required: Money,
    pub future_value_current_wealth: Money,
    /// What `monthly_sip_required` grows to by retirement.
    pub future_value_sip: Money,
    /// `max(0, corpus_required - future_value_current_wealth)`
    pub shortfall: Money,
    pub years_to_retirement: u32,
    pub retirement_years: u32,
    pub composition: Vec<Component>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn whole_units(amount: Money) -> Money {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn validate(input: &RetirementInput) -> PlannerResult<()> {
    validation::non_negative_money("current_monthly_expense", input.current_monthly_expense)?;
    validation::percent("inflation_rate", input.inflation_rate)?;
    validation::age("current_age", input.current_age)?;
    validation::age("retirement_age", input.retirement_age)?;
    if input.retirement_age <= input.current_age {
        return Err(PlannerError::InvalidInput {
            field: "retirement_age".into(),
            reason: format!(
                "retirement_age must be > current_age ({} <= {})",
                input.retirement_age, input.current_age
            ),
        });
    }
    validation::age("life_expectancy", input.life_expectancy)?;
    if input.life_expectancy < input.retirement_age {
        return Err(PlannerError::InvalidInput {
            field: "life_expectancy".into(),
            reason: format!(
                "life_expectancy must be >= retirement_age ({} < {})",
                input.life_expectancy, input.retirement_age
            ),
        });
    }
    validation::percent("pre_retirement_return", input.pre_retirement_return)?;
    validation::percent("post_retirement_return", input.post_retirement_return)?;
    validation::non_negative_money("current_wealth", input.current_wealth)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Size the corpus needed at retirement to fund inflation-growing monthly
/// expenses until life expectancy, and the monthly SIP required to close
/// whatever gap current wealth leaves.
pub fn plan_retirement(
    input: &RetirementInput,
) -> PlannerResult<ComputationOutput<RetirementOutput>> {
    validate(input)?;
    let mut warnings: Vec<String> = Vec::new();

    let years_to_retirement = input.retirement_age - input.current_age;
    let retirement_years = input.life_expectancy - input.retirement_age;
    let months_to_retirement = years_to_retirement * 12;
    let months_in_retirement = retirement_years * 12;

    // --- Expense at retirement (annual inflation compounding) ---
    let expense_at_retirement = time_value::lumpsum_future_value(
        input.current_monthly_expense,
        time_value::annual_rate(input.inflation_rate),
        years_to_retirement,
    )?;

    // --- Corpus: PV of an inflation-growing monthly expense stream ---
    let monthly_post_return = time_value::monthly_rate(input.post_retirement_return);
    let monthly_inflation = time_value::monthly_rate(input.inflation_rate);
    debug!(
        "retirement: {years_to_retirement}y to retirement, {retirement_years}y in retirement, \
         monthly return {monthly_post_return}, monthly inflation {monthly_inflation}"
    );
    if monthly_post_return == monthly_inflation && retirement_years > 0 {
        warnings.push(
            "Retirement return equals inflation: corpus sized as expense at retirement x months"
                .into(),
        );
    }
    let corpus_required = time_value::growing_annuity_present_value(
        expense_at_retirement,
        monthly_post_return,
        monthly_inflation,
        months_in_retirement,
    )?;

    // --- Current wealth compounded to retirement ---
    let future_value_current_wealth = time_value::lumpsum_future_value(
        input.current_wealth,
        time_value::annual_rate(input.pre_retirement_return),
        years_to_retirement,
    )?;

    // --- Shortfall and the SIP that closes it ---
    let shortfall = (corpus_required - future_value_current_wealth).max(Decimal::ZERO);
    let monthly_pre_return = time_value::monthly_rate(input.pre_retirement_return);

    let monthly_sip = if shortfall > Decimal::ZERO && monthly_pre_return > Decimal::ZERO {
        time_value::annuity_due_payment_monthly(
            shortfall,
            monthly_pre_return,
            months_to_retirement,
        )?
    } else {
        if shortfall.is_zero() {
            warnings.push(
                "Current wealth covers the required corpus: no monthly contribution needed".into(),
            );
        } else {
            warnings.push(
                "Pre-retirement return is 0%: monthly contribution not computed for the shortfall"
                    .into(),
            );
        }
        Decimal::ZERO
    };

    let future_value_sip = time_value::annuity_due_future_value_monthly(
        monthly_sip,
        monthly_pre_return,
        months_to_retirement,
    )?;

    if retirement_years == 0 {
        warnings.push("Life expectancy equals retirement age: no corpus required".into());
    }

    // --- Round at the boundary ---
    let future_value_current_wealth = whole_units(future_value_current_wealth);
    let future_value_sip = whole_units(future_value_sip);
    let corpus_required = whole_units(corpus_required);
    let remaining_gap =
        (corpus_required - future_value_current_wealth - future_value_sip).max(Decimal::ZERO);

    let output = RetirementOutput {
        monthly_expense_at_retirement: whole_units(expense_at_retirement),
        corpus_required,
        monthly_sip_required: whole_units(monthly_sip),
        future_value_current_wealth,
        future_value_sip,
        shortfall: whole_units(shortfall),
        years_to_retirement,
        retirement_years,
        composition: vec![
            Component::new("Current Wealth", future_value_current_wealth),
            Component::new("SIP Contributions", future_value_sip),
            Component::new("Remaining Gap", remaining_gap),
        ],
    };

    with_metadata(
        "Retirement Corpus (growing-annuity PV of inflation-adjusted expenses, annuity-due SIP)",
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
    use rust_decimal::MathematicalOps;
    use rust_decimal_macros::dec;

    fn default_input() -> RetirementInput {
        RetirementInput::default()
    }

    #[test]
    fn test_horizons_derived_from_ages() {
        let out = plan_retirement(&default_input()).unwrap().result;
        assert_eq!(out.years_to_retirement, 25);
        assert_eq!(out.retirement_years, 30);
    }

    #[test]
    fn test_expense_inflated_to_retirement() {
        // 100_000 * 1.06^25 = 429_187.07
        let out = plan_retirement(&default_input()).unwrap().result;
        assert_eq!(out.monthly_expense_at_retirement, dec!(429_187));
    }

    #[test]
    fn test_default_scenario_values() {
        let out = plan_retirement(&default_input()).unwrap().result;
        assert_eq!(out.corpus_required, dec!(132_867_809));
        assert_eq!(out.future_value_current_wealth, dec!(25_500_097));
        assert_eq!(out.shortfall, dec!(107_367_713));
        assert_eq!(out.monthly_sip_required, dec!(56_580));
        assert_eq!(out.future_value_sip, dec!(107_367_713));
    }

    #[test]
    fn test_outputs_are_whole_units() {
        let out = plan_retirement(&default_input()).unwrap().result;
        for value in [
            out.monthly_expense_at_retirement,
            out.corpus_required,
            out.monthly_sip_required,
            out.future_value_current_wealth,
            out.future_value_sip,
            out.shortfall,
        ] {
            assert_eq!(value, value.trunc(), "{value} is not a whole amount");
        }
    }

    #[test]
    fn test_no_shortfall_when_wealth_covers_corpus() {
        let mut input = default_input();
        input.current_wealth = dec!(50_000_000);
        let result = plan_retirement(&input).unwrap();
        let out = &result.result;

        assert!(out.future_value_current_wealth >= out.corpus_required);
        assert_eq!(out.shortfall, Decimal::ZERO);
        assert_eq!(out.monthly_sip_required, Decimal::ZERO);
        assert_eq!(out.future_value_sip, Decimal::ZERO);
        assert!(result.warnings.iter().any(|w| w.contains("no monthly contribution")));
    }

    #[test]
    fn test_retirement_years_zero_needs_no_corpus() {
        let mut input = default_input();
        input.life_expectancy = input.retirement_age;
        let result = plan_retirement(&input).unwrap();
        assert_eq!(result.result.retirement_years, 0);
        assert_eq!(result.result.corpus_required, Decimal::ZERO);
        assert_eq!(result.result.shortfall, Decimal::ZERO);
    }

    #[test]
    fn test_return_equal_to_inflation_uses_degenerate_branch() {
        let mut input = default_input();
        input.post_retirement_return = input.inflation_rate;
        let result = plan_retirement(&input).unwrap();
        let out = &result.result;
        // expense_at_retirement * 360 months
        let expected = (dec!(100_000) * dec!(1.06).powi(25) * dec!(360)).round();
        assert!((out.corpus_required - expected).abs() <= Decimal::ONE);
        assert!(result.warnings.iter().any(|w| w.contains("equals inflation")));
    }

    #[test]
    fn test_zero_pre_retirement_return_gives_zero_sip() {
        let mut input = default_input();
        input.pre_retirement_return = Decimal::ZERO;
        let out = plan_retirement(&input).unwrap().result;
        assert!(out.shortfall > Decimal::ZERO);
        assert_eq!(out.monthly_sip_required, Decimal::ZERO);
        assert_eq!(out.future_value_current_wealth, dec!(1_500_000));
    }

    #[test]
    fn test_remaining_gap_composition() {
        let out = plan_retirement(&default_input()).unwrap().result;
        let gap = &out.composition[2];
        assert_eq!(gap.label, "Remaining Gap");
        assert_eq!(
            gap.amount,
            (out.corpus_required - out.future_value_current_wealth - out.future_value_sip)
                .max(Decimal::ZERO)
        );
    }

    #[test]
    fn test_validation_retirement_not_after_current() {
        let mut input = default_input();
        input.retirement_age = input.current_age;
        match plan_retirement(&input).unwrap_err() {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "retirement_age"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_life_expectancy_before_retirement() {
        let mut input = default_input();
        input.life_expectancy = 55;
        match plan_retirement(&input).unwrap_err() {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "life_expectancy"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_negative_wealth() {
        let mut input = default_input();
        input.current_wealth = dec!(-10);
        match plan_retirement(&input).unwrap_err() {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "current_wealth"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_rate_out_of_range() {
        let mut input = default_input();
        input.inflation_rate = dec!(150);
        match plan_retirement(&input).unwrap_err() {
            PlannerError::InvalidInput { field, .. } => assert_eq!(field, "inflation_rate"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
