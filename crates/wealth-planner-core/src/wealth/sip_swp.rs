use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::{self, mul};
use crate::types::{with_metadata, Component, ComputationOutput, Money, Percent};
use crate::validation;
use crate::PlannerResult;

/// Accumulate with a monthly SIP, then draw the corpus down with a level
/// monthly SWP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipSwpInput {
    pub monthly_sip: Money,
    pub sip_years: u32,
    pub withdrawal_years: u32,
    /// Annual return during the SIP phase, in percent.
    pub sip_return: Percent,
    /// Annual return during the SWP phase, in percent.
    pub swp_return: Percent,
}

impl Default for SipSwpInput {
    fn default() -> Self {
        Self {
            monthly_sip: dec!(5_000),
            sip_years: 20,
            withdrawal_years: 20,
            sip_return: dec!(12),
            swp_return: dec!(7),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipSwpOutput {
    pub accumulated_corpus: Money,
    pub monthly_withdrawal: Money,
    /// Exactly `monthly_withdrawal * withdrawal_years * 12`.
    pub total_withdrawal: Money,
    pub total_invested: Money,
    /// `total_withdrawal - total_invested`
    pub net_gain: Money,
    pub composition: Vec<Component>,
}

fn validate(input: &SipSwpInput) -> PlannerResult<()> {
    validation::non_negative_money("monthly_sip", input.monthly_sip)?;
    validation::horizon_years("sip_years", input.sip_years, 1)?;
    validation::horizon_years("withdrawal_years", input.withdrawal_years, 1)?;
    validation::percent("sip_return", input.sip_return)?;
    validation::percent("swp_return", input.swp_return)?;
    Ok(())
}

/// Project the corpus a monthly SIP builds and the level monthly withdrawal
/// that exhausts it exactly over the withdrawal phase.
pub fn bridge_sip_to_swp(input: &SipSwpInput) -> PlannerResult<ComputationOutput<SipSwpOutput>> {
    validate(input)?;
    let mut warnings: Vec<String> = Vec::new();

    let sip_rate = time_value::monthly_rate(input.sip_return);
    let swp_rate = time_value::monthly_rate(input.swp_return);
    let sip_months = input.sip_years * 12;
    let swp_months = input.withdrawal_years * 12;
    debug!("sip/swp: {sip_months} months at {sip_rate}, then {swp_months} months at {swp_rate}");

    let accumulated_corpus =
        time_value::annuity_due_future_value_monthly(input.monthly_sip, sip_rate, sip_months)?;

    if swp_rate.is_zero() {
        warnings.push("SWP return is 0%: withdrawal is the corpus split evenly across months".into());
    }
    let monthly_withdrawal = time_value::amortized_payment(accumulated_corpus, swp_rate, swp_months)?;
    let total_withdrawal = mul(monthly_withdrawal, Decimal::from(swp_months), "total withdrawal")?;
    let total_invested = mul(input.monthly_sip, Decimal::from(sip_months), "total invested")?;
    let net_gain = total_withdrawal - total_invested;

    let output = SipSwpOutput {
        accumulated_corpus,
        monthly_withdrawal,
        total_withdrawal,
        total_invested,
        net_gain,
        composition: vec![
            Component::new("Accumulated Corpus", accumulated_corpus),
            Component::new("Total Withdrawn", total_withdrawal),
        ],
    };

    with_metadata(
        "SIP to SWP (monthly annuity-due accumulation, level amortized withdrawal)",
        input,
        warnings,
        output,
    )
}
