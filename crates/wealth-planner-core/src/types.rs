use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::PlannerResult;

/// All monetary values, in whole units of the modeled currency.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Used inside formulas only.
pub type Rate = Decimal;

/// Rates as users enter them (12 = 12%). Every assumptions record uses these.
pub type Percent = Decimal;

/// A labeled amount, one slice of a result's composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub label: String,
    pub amount: Money,
}

impl Component {
    pub fn new(label: &str, amount: Money) -> Self {
        Self {
            label: label.to_string(),
            amount,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
}

/// Helper to wrap computation results with metadata.
///
/// Carries no timing information so two calls with the same assumptions
/// produce identical envelopes. Assumptions that cannot be echoed as JSON
/// are reported as [`PlannerError::SerializationError`].
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> PlannerResult<ComputationOutput<T>> {
    Ok(ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions)?,
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "rust_decimal_128bit".to_string(),
        },
    })
}
