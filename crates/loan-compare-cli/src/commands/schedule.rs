use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use loan_compare_core::presentation;
use loan_compare_core::schedule;
use loan_compare_core::{ScenarioBook, ScenarioDraft};

use crate::input;

/// Arguments for a single-loan amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Scenario label
    #[arg(long)]
    pub name: Option<String>,

    /// Loan amount (default 1,000,000)
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual nominal rate in percent (default 12.0)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months (default 12)
    #[arg(long)]
    pub term: Option<u32>,

    /// Emit currency-formatted rows instead of raw decimals
    #[arg(long)]
    pub formatted: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let draft: ScenarioDraft = match input::load(args.input.as_deref())? {
        Some(draft) => draft,
        None => ScenarioDraft {
            name: args.name,
            principal: args.principal,
            annual_rate_pct: args.rate,
            term_months: args.term,
        },
    };

    let mut book = ScenarioBook::new();
    let scenario = book.add_draft(draft)?.clone();
    debug!(scenario = %scenario.name, term = scenario.term_months, "building schedule");

    let output = schedule::build_schedule(&scenario)?;
    if !args.formatted {
        return Ok(serde_json::to_value(output)?);
    }

    let table = presentation::amortization_table(&scenario.name, &output.result);
    let mut value = serde_json::to_value(&output)?;
    value["result"] = serde_json::json!({
        "scenario": table.scenario,
        "monthly_payment": presentation::format_currency(output.result.monthly_payment),
        "total_interest": presentation::format_currency(output.result.total_interest),
        "total_paid": presentation::format_currency(output.result.total_paid),
        "rows": table.rows,
    });
    Ok(value)
}
