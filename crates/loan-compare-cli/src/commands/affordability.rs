use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Instant;

use loan_compare_core::affordability;
use loan_compare_core::presentation;
use loan_compare_core::scenario::{self, defaults};
use loan_compare_core::types::with_metadata;

use crate::input;

/// Arguments for a direct debt-to-income check
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly loan payment
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Monthly income (default 1,500,000)
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Label for the payment being tested
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AffordabilityInput {
    monthly_payment: Decimal,
    #[serde(default)]
    income: Option<Decimal>,
    #[serde(default)]
    scenario_name: Option<String>,
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let data: AffordabilityInput = match input::load(args.input.as_deref())? {
        Some(data) => data,
        None => AffordabilityInput {
            monthly_payment: args
                .payment
                .ok_or("--payment is required (or provide --input)")?,
            income: args.income,
            scenario_name: args.name,
        },
    };

    if data.monthly_payment < Decimal::ZERO {
        return Err("monthly payment cannot be negative".into());
    }
    let income = data.income.unwrap_or(defaults::MONTHLY_INCOME);
    scenario::validate_income(income)?;

    let mut warnings = Vec::new();
    if income.is_zero() {
        warnings.push("Monthly income is zero; debt-to-income ratio reported as 0%".to_string());
    }

    let assessment = affordability::classify(
        data.scenario_name.unwrap_or_else(|| "manual".into()),
        data.monthly_payment,
        income,
    );
    let kpis = presentation::kpis(&assessment);

    let elapsed = start.elapsed().as_micros() as u64;
    let output = with_metadata(
        "Debt-to-income tiering (<=30% healthy, <=40% caution, >40% critical)",
        &json!({
            "healthy_max_pct": affordability::HEALTHY_MAX_PCT.to_string(),
            "caution_max_pct": affordability::CAUTION_MAX_PCT.to_string(),
        }),
        warnings,
        elapsed,
        json!({ "assessment": assessment, "kpis": kpis }),
    );
    Ok(serde_json::to_value(output)?)
}
