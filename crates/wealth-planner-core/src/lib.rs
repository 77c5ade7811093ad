pub mod error;
pub mod time_value;
pub mod types;
pub mod validation;

#[cfg(feature = "wealth")]
pub mod wealth;

pub use error::PlannerError;
pub use types::*;

/// Standard result type for all wealth-planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
