use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates quoted the way borrowers enter them (12.0 = 12% per year).
pub type Percent = Decimal;

/// Periodic rates expressed as decimals (0.01 = 1% per month).
pub type Rate = Decimal;

pub const MONTHS_PER_YEAR: u32 = 12;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Convert an annual nominal percentage into the monthly periodic rate.
pub fn monthly_rate(annual_pct: Percent) -> Rate {
    annual_pct / HUNDRED / Decimal::from(MONTHS_PER_YEAR)
}

/// `part` as a percentage of `whole`. `None` when `whole` is not positive or
/// the percentage does not fit in a `Decimal`.
pub fn percent_of(part: Money, whole: Money) -> Option<Percent> {
    if whole <= Decimal::ZERO {
        return None;
    }
    part.checked_div(whole)?.checked_mul(HUNDRED)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
