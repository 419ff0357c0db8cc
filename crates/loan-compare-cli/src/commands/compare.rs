use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use loan_compare_core::pipeline;
use loan_compare_core::presentation::{self, EMPTY_STATE_MESSAGE};
use loan_compare_core::scenario::defaults;
use loan_compare_core::types::ComputationOutput;
use loan_compare_core::{LoanCompareError, ScenarioBook, ScenarioDraft};

use crate::input;
use crate::input::scenario_arg;

/// Arguments for multi-scenario comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON input file: {"income": ..., "scenarios": [...]}
    #[arg(long)]
    pub input: Option<String>,

    /// Scenario as "name,principal,rate,term" (repeatable; blank fields take defaults)
    #[arg(long = "scenario", value_name = "ENTRY")]
    pub scenarios: Vec<String>,

    /// Monthly income (default 1,500,000)
    #[arg(long)]
    pub income: Option<Decimal>,

    #[command(flatten)]
    pub sections: ReportSections,
}

/// Which parts of the report to include.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ReportSections {
    /// Emit raw decimals instead of the formatted report
    #[arg(long)]
    pub numeric: bool,

    /// Include balance and cumulative-interest chart series
    #[arg(long)]
    pub charts: bool,

    /// Include the full amortization table of every scenario
    #[arg(long)]
    pub schedules: bool,
}

#[derive(Debug, Deserialize)]
struct CompareInput {
    #[serde(default)]
    income: Option<Decimal>,
    #[serde(default)]
    scenarios: Vec<ScenarioDraft>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (drafts, income) = match input::load::<CompareInput>(args.input.as_deref())? {
        Some(data) => (data.scenarios, data.income.or(args.income)),
        None => {
            let drafts = args
                .scenarios
                .iter()
                .map(|entry| scenario_arg::parse_scenario(entry))
                .collect::<Result<Vec<_>, _>>()?;
            (drafts, args.income)
        }
    };

    let mut book = ScenarioBook::new();
    for draft in drafts {
        book.add_draft(draft)?;
    }

    render(&book, income.unwrap_or(defaults::MONTHLY_INCOME), args.sections)
}

/// Run the full pipeline over `book` and shape it for output. An empty book
/// renders the informational prompt rather than failing.
pub fn render(
    book: &ScenarioBook,
    income: Decimal,
    sections: ReportSections,
) -> Result<Value, Box<dyn std::error::Error>> {
    let output = match pipeline::recompute(book.scenarios(), income) {
        Ok(output) => output,
        Err(LoanCompareError::EmptyScenarioSet) => {
            info!("no scenarios entered");
            return Ok(json!({ "info": EMPTY_STATE_MESSAGE, "scenarios": 0 }));
        }
        Err(e) => return Err(e.into()),
    };
    debug!(
        scenarios = book.len(),
        warnings = output.warnings.len(),
        "comparison ready"
    );

    if sections.numeric {
        return Ok(serde_json::to_value(output)?);
    }

    let report = presentation::build_report(&output.result);
    let mut value = serde_json::to_value(ComputationOutput {
        result: report,
        methodology: output.methodology,
        assumptions: output.assumptions,
        warnings: output.warnings,
        metadata: output.metadata,
    })?;

    if let Some(result) = value.get_mut("result").and_then(Value::as_object_mut) {
        if !sections.charts {
            result.remove("balance_chart");
            result.remove("interest_chart");
        }
        if !sections.schedules {
            result.remove("amortization_tables");
        }
    }
    Ok(value)
}
