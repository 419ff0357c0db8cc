pub mod affordability;
pub mod book;
pub mod error;
pub mod pipeline;
pub mod scenario;
pub mod schedule;
pub mod summary;
pub mod types;

#[cfg(feature = "presentation")]
pub mod presentation;

pub use book::ScenarioBook;
pub use error::LoanCompareError;
pub use scenario::{LoanScenario, ScenarioDraft};
pub use types::*;

/// Standard result type for all loan-compare operations
pub type LoanCompareResult<T> = Result<T, LoanCompareError>;
