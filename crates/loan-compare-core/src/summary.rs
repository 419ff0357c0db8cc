use serde::{Deserialize, Serialize};

use crate::error::LoanCompareError;
use crate::scenario::LoanScenario;
use crate::schedule::AmortizationSchedule;
use crate::types::*;
use crate::LoanCompareResult;

/// One row of the side-by-side comparison, kept numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub total_interest: Money,
    /// principal + total_interest
    pub total_paid: Money,
}

impl ScenarioSummary {
    pub fn from_schedule(scenario: &LoanScenario, schedule: &AmortizationSchedule) -> Self {
        Self {
            name: scenario.name.clone(),
            principal: scenario.principal,
            annual_rate_pct: scenario.annual_rate_pct,
            term_months: scenario.term_months,
            monthly_payment: schedule.monthly_payment,
            total_interest: schedule.total_interest,
            total_paid: scenario.principal + schedule.total_interest,
        }
    }
}

/// Summarise each (scenario, schedule) pair, preserving input order.
pub fn aggregate(entries: &[(LoanScenario, AmortizationSchedule)]) -> Vec<ScenarioSummary> {
    entries
        .iter()
        .map(|(scenario, schedule)| ScenarioSummary::from_schedule(scenario, schedule))
        .collect()
}

/// Scenario with the highest monthly payment. Ties keep the earliest entry.
pub fn max_payment(summaries: &[ScenarioSummary]) -> LoanCompareResult<&ScenarioSummary> {
    let mut iter = summaries.iter();
    let mut best = iter.next().ok_or(LoanCompareError::EmptyScenarioSet)?;
    for candidate in iter {
        if candidate.monthly_payment > best.monthly_payment {
            best = candidate;
        }
    }
    Ok(best)
}

/// Scenario with the lowest total interest, ties keep the earliest entry.
pub fn cheapest(summaries: &[ScenarioSummary]) -> LoanCompareResult<&ScenarioSummary> {
    let mut iter = summaries.iter();
    let mut best = iter.next().ok_or(LoanCompareError::EmptyScenarioSet)?;
    for candidate in iter {
        if candidate.total_interest < best.total_interest {
            best = candidate;
        }
    }
    Ok(best)
}
