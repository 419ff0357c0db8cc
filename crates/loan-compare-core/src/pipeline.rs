use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::debug;

use crate::affordability::{self, AffordabilityAssessment};
use crate::error::LoanCompareError;
use crate::scenario::{self, LoanScenario};
use crate::schedule::{self, AmortizationSchedule};
use crate::summary::{self, ScenarioSummary};
use crate::types::*;
use crate::LoanCompareResult;

/// Schedule for one scenario, tagged with its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSchedule {
    pub index: usize,
    pub name: String,
    pub schedule: AmortizationSchedule,
}

/// Everything produced by a single recompute pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub schedules: Vec<ScenarioSchedule>,
    pub summaries: Vec<ScenarioSummary>,
    pub assessment: AffordabilityAssessment,
    /// Name of the scenario with the lowest total interest.
    pub cheapest: String,
}

/// Recompute schedules, summaries and the affordability assessment from
/// scratch. Nothing is carried over between calls.
pub fn recompute(
    scenarios: &[LoanScenario],
    monthly_income: Money,
) -> LoanCompareResult<ComputationOutput<Comparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    scenario::validate_income(monthly_income)?;
    if scenarios.is_empty() {
        return Err(LoanCompareError::EmptyScenarioSet);
    }

    let mut entries: Vec<(LoanScenario, AmortizationSchedule)> =
        Vec::with_capacity(scenarios.len());
    for s in scenarios {
        let sched = schedule::compute_schedule(s.principal, s.annual_rate_pct, s.term_months)?;
        entries.push((s.clone(), sched));
    }

    let summaries = summary::aggregate(&entries);
    let assessment = affordability::assess(&summaries, monthly_income)?;
    let cheapest = summary::cheapest(&summaries)?.name.clone();

    if monthly_income.is_zero() {
        warnings.push(
            "Monthly income is zero; debt-to-income ratio reported as 0%".into(),
        );
    }
    let mut seen = HashSet::new();
    for s in scenarios {
        if !seen.insert(s.name.as_str()) {
            warnings.push(format!(
                "Scenario name '{}' is used more than once; rows are kept separately",
                s.name
            ));
        }
    }

    debug!(
        scenarios = scenarios.len(),
        max_payment = %assessment.max_monthly_payment,
        ratio_pct = %assessment.debt_to_income_pct,
        tier = %assessment.tier,
        "recomputed loan comparison"
    );

    let schedules = entries
        .into_iter()
        .enumerate()
        .map(|(index, (scenario, schedule))| ScenarioSchedule {
            index,
            name: scenario.name,
            schedule,
        })
        .collect();

    let output = Comparison {
        schedules,
        summaries,
        assessment,
        cheapest,
    };

    let total_periods: u32 = scenarios.iter().map(|s| s.term_months).sum();
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan comparison: annuity schedules, max-payment debt-to-income tiering",
        &serde_json::json!({
            "monthly_income": monthly_income.to_string(),
            "scenario_count": scenarios.len(),
            "total_periods": total_periods,
            "healthy_max_pct": affordability::HEALTHY_MAX_PCT.to_string(),
            "caution_max_pct": affordability::CAUTION_MAX_PCT.to_string(),
            "scenarios_are_alternatives": true,
            "zero_income_ratio": Decimal::ZERO.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
