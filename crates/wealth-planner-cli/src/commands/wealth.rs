use clap::Args;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

use wealth_planner_core::wealth::future_wealth::{self, FutureWealthInput};
use wealth_planner_core::wealth::retirement::{self, RetirementInput};
use wealth_planner_core::wealth::sip_swp::{self, SipSwpInput};

use crate::input;

/// Arguments for the future wealth projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FutureWealthArgs {
    /// Path to JSON/YAML assumptions file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Current portfolio value
    #[arg(long)]
    pub current_portfolio: Option<Decimal>,

    /// Lumpsum invested at the end of every year
    #[arg(long)]
    pub lumpsum_yearly: Option<Decimal>,

    /// Monthly SIP, invested at the start of every month
    #[arg(long)]
    pub monthly_sip: Option<Decimal>,

    /// Expected annual return in percent (e.g. 13 for 13%)
    #[arg(long)]
    pub expected_return: Option<Decimal>,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Option<u32>,
}

/// Arguments for retirement corpus sizing
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RetirementArgs {
    /// Path to JSON/YAML assumptions file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Current monthly household expense
    #[arg(long)]
    pub current_monthly_expense: Option<Decimal>,

    /// Expected annual inflation in percent
    #[arg(long)]
    pub inflation_rate: Option<Decimal>,

    #[arg(long)]
    pub current_age: Option<u32>,

    #[arg(long)]
    pub retirement_age: Option<u32>,

    #[arg(long)]
    pub life_expectancy: Option<u32>,

    /// Expected annual return until retirement, in percent
    #[arg(long)]
    pub pre_retirement_return: Option<Decimal>,

    /// Expected annual return during retirement, in percent
    #[arg(long)]
    pub post_retirement_return: Option<Decimal>,

    /// Investable wealth today
    #[arg(long)]
    pub current_wealth: Option<Decimal>,
}

/// Arguments for the SIP to SWP bridge
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SipSwpArgs {
    /// Path to JSON/YAML assumptions file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly SIP amount
    #[arg(long)]
    pub monthly_sip: Option<Decimal>,

    /// Years of SIP contributions
    #[arg(long)]
    pub sip_years: Option<u32>,

    /// Years of SWP withdrawals
    #[arg(long)]
    pub withdrawal_years: Option<u32>,

    /// Expected annual return during the SIP phase, in percent
    #[arg(long)]
    pub sip_return: Option<Decimal>,

    /// Expected annual return during the SWP phase, in percent
    #[arg(long)]
    pub swp_return: Option<Decimal>,
}

/// `--input` file first, then piped stdin. `None` means build from flags.
fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(input::file::read_input(path)?)),
        None => input::stdin::read_stdin(),
    }
}

fn future_wealth_from_flags(args: &FutureWealthArgs) -> FutureWealthInput {
    let defaults = FutureWealthInput::default();
    FutureWealthInput {
        current_portfolio: args.current_portfolio.unwrap_or(defaults.current_portfolio),
        lumpsum_yearly: args.lumpsum_yearly.unwrap_or(defaults.lumpsum_yearly),
        monthly_sip: args.monthly_sip.unwrap_or(defaults.monthly_sip),
        expected_return: args.expected_return.unwrap_or(defaults.expected_return),
        years: args.years.unwrap_or(defaults.years),
    }
}

fn retirement_from_flags(args: &RetirementArgs) -> RetirementInput {
    let defaults = RetirementInput::default();
    RetirementInput {
        current_monthly_expense: args
            .current_monthly_expense
            .unwrap_or(defaults.current_monthly_expense),
        inflation_rate: args.inflation_rate.unwrap_or(defaults.inflation_rate),
        current_age: args.current_age.unwrap_or(defaults.current_age),
        retirement_age: args.retirement_age.unwrap_or(defaults.retirement_age),
        life_expectancy: args.life_expectancy.unwrap_or(defaults.life_expectancy),
        pre_retirement_return: args
            .pre_retirement_return
            .unwrap_or(defaults.pre_retirement_return),
        post_retirement_return: args
            .post_retirement_return
            .unwrap_or(defaults.post_retirement_return),
        current_wealth: args.current_wealth.unwrap_or(defaults.current_wealth),
    }
}

fn sip_swp_from_flags(args: &SipSwpArgs) -> SipSwpInput {
    let defaults = SipSwpInput::default();
    SipSwpInput {
        monthly_sip: args.monthly_sip.unwrap_or(defaults.monthly_sip),
        sip_years: args.sip_years.unwrap_or(defaults.sip_years),
        withdrawal_years: args.withdrawal_years.unwrap_or(defaults.withdrawal_years),
        sip_return: args.sip_return.unwrap_or(defaults.sip_return),
        swp_return: args.swp_return.unwrap_or(defaults.swp_return),
    }
}

pub fn run_future_wealth(args: FutureWealthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fw_input = match load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => future_wealth_from_flags(&args),
    };
    let result = future_wealth::project_future_wealth(&fw_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_retirement(args: RetirementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ret_input = match load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => retirement_from_flags(&args),
    };
    let result = retirement::plan_retirement(&ret_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sip_swp(args: SipSwpArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ss_input = match load(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => sip_swp_from_flags(&args),
    };
    let result = sip_swp::bridge_sip_to_swp(&ss_input)?;
    Ok(serde_json::to_value(result)?)
}
