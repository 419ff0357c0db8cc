use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCompareError;
use crate::scenario::LoanScenario;
use crate::types::*;
use crate::LoanCompareResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A single month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    /// Outstanding balance after this period's payment.
    pub balance: Money,
    pub cumulative_interest: Money,
    pub payment: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
    /// Level payment from the annuity formula.
    pub monthly_payment: Money,
    /// Payment of the last period after the residual-balance correction.
    pub final_payment: Money,
    pub total_interest: Money,
    pub total_paid: Money,
}

impl AmortizationSchedule {
    pub fn term_months(&self) -> u32 {
        self.rows.len() as u32
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build a fixed-payment (French) amortization schedule.
///
/// The last period repays whatever balance is left, so the closing balance is
/// exactly zero regardless of rounding drift in the level payment.
pub fn compute_schedule(
    principal: Money,
    annual_rate_pct: Percent,
    term_months: u32,
) -> LoanCompareResult<AmortizationSchedule> {
    validate_terms(principal, annual_rate_pct, term_months)?;

    let r = monthly_rate(annual_rate_pct);
    let level_payment = level_payment(principal, r, term_months)?;

    let mut rows = Vec::with_capacity(term_months as usize);
    let mut balance = principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut payment = level_payment;

    for period in 1..=term_months {
        let interest = balance
            .checked_mul(r)
            .ok_or_else(|| overflow(format!("interest for period {period}")))?;

        if period == term_months {
            let amortization = balance;
            payment = amortization
                .checked_add(interest)
                .ok_or_else(|| overflow(format!("final payment (period {period})")))?;
            balance = Decimal::ZERO;
        } else {
            let amortization = level_payment - interest;
            balance -= amortization;
        }

        cumulative_interest = cumulative_interest
            .checked_add(interest)
            .ok_or_else(|| overflow(format!("cumulative interest at period {period}")))?;

        rows.push(AmortizationRow {
            period,
            balance,
            cumulative_interest,
            payment,
        });
    }

    let total_paid = principal
        .checked_add(cumulative_interest)
        .ok_or_else(|| overflow("total paid".into()))?;

    Ok(AmortizationSchedule {
        rows,
        monthly_payment: level_payment,
        final_payment: payment,
        total_interest: cumulative_interest,
        total_paid,
    })
}

/// Compute the schedule for a stored scenario, wrapped in the standard
/// output envelope.
pub fn build_schedule(
    scenario: &LoanScenario,
) -> LoanCompareResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = compute_schedule(
        scenario.principal,
        scenario.annual_rate_pct,
        scenario.term_months,
    )?;

    if scenario.annual_rate_pct.is_zero() {
        warnings.push("Zero-rate loan: payment is principal divided by term".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-payment amortization (annuity formula, final-period correction)",
        &serde_json::json!({
            "scenario": scenario.name,
            "principal": scenario.principal.to_string(),
            "annual_rate_pct": scenario.annual_rate_pct.to_string(),
            "monthly_rate": monthly_rate(scenario.annual_rate_pct).to_string(),
            "term_months": scenario.term_months,
        }),
        warnings,
        elapsed,
        schedule,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// payment = P * r(1+r)^n / ((1+r)^n - 1), or P / n when r is zero.
fn level_payment(principal: Money, r: Rate, term_months: u32) -> LoanCompareResult<Money> {
    let n = Decimal::from(term_months);
    if r.is_zero() {
        return Ok(principal / n);
    }

    let factor = (Decimal::ONE + r)
        .checked_powi(term_months as i64)
        .ok_or_else(|| overflow(format!("annuity factor (1 + {r})^{term_months}")))?;

    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        // Rate too small to register at 28 digits.
        return Ok(principal / n);
    }

    r.checked_mul(factor)
        .and_then(|growth| principal.checked_mul(growth))
        .and_then(|num| num.checked_div(denom))
        .ok_or_else(|| overflow("level payment".into()))
}

fn overflow(context: String) -> LoanCompareError {
    LoanCompareError::Overflow { context }
}

fn validate_terms(
    principal: Money,
    annual_rate_pct: Percent,
    term_months: u32,
) -> LoanCompareResult<()> {
    if principal <= Decimal::ZERO {
        return Err(LoanCompareError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(LoanCompareError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if term_months == 0 {
        return Err(LoanCompareError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
