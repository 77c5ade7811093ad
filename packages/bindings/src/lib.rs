use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;
use wealth_planner_core::wealth::future_wealth::FutureWealthInput;
use wealth_planner_core::wealth::retirement::RetirementInput;
use wealth_planner_core::wealth::sip_swp::SipSwpInput;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Wealth projections
// ---------------------------------------------------------------------------

#[napi]
pub fn project_future_wealth(input_json: String) -> NapiResult<String> {
    let input: FutureWealthInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealth_planner_core::wealth::future_wealth::project_future_wealth(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn plan_retirement(input_json: String) -> NapiResult<String> {
    let input: RetirementInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        wealth_planner_core::wealth::retirement::plan_retirement(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn bridge_sip_to_swp(input_json: String) -> NapiResult<String> {
    let input: SipSwpInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        wealth_planner_core::wealth::sip_swp::bridge_sip_to_swp(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default assumptions for each projector, keyed by projector name.
#[derive(Serialize)]
struct DefaultInputs {
    future_wealth: FutureWealthInput,
    retirement: RetirementInput,
    sip_swp: SipSwpInput,
}

#[napi]
pub fn default_inputs() -> NapiResult<String> {
    let defaults = DefaultInputs {
        future_wealth: FutureWealthInput::default(),
        retirement: RetirementInput::default(),
        sip_swp: SipSwpInput::default(),
    };
    serde_json::to_string(&defaults).map_err(to_napi_error)
}
