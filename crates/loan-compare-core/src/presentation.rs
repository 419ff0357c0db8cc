//! Display-facing adapter. Turns the numeric comparison into labelled,
//! pre-formatted structures for tables, KPI cards and charts. Calculators
//! never call into this module.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::affordability::{AffordabilityAssessment, RiskTier};
use crate::pipeline::Comparison;
use crate::schedule::AmortizationSchedule;
use crate::summary::ScenarioSummary;
use crate::types::*;

/// Shown in place of the report when no scenarios have been entered.
pub const EMPTY_STATE_MESSAGE: &str = "Comienza agregando un crédito para ver la comparación.";

const MILLION: Decimal = dec!(1_000_000);
const THOUSAND: Decimal = dec!(1_000);

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub name: String,
    pub principal: String,
    pub annual_rate: String,
    pub term: String,
    pub monthly_payment: String,
    pub total_interest: String,
    pub total_paid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiBlock {
    pub income: String,
    pub highest_payment: String,
    pub highest_payment_scenario: String,
    pub debt_to_income: String,
    pub tier: RiskTier,
    pub tier_label: String,
    pub tier_color: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub period: u32,
    pub value: Money,
    /// Abbreviated axis label ($1.2M, $350K, $90).
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub scenario: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub caption: String,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedRow {
    pub period: u32,
    pub balance: String,
    pub cumulative_interest: String,
    pub payment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationTable {
    pub scenario: String,
    pub rows: Vec<FormattedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub kpis: KpiBlock,
    pub comparison: Vec<ComparisonRow>,
    pub cheapest: String,
    pub balance_chart: Chart,
    pub interest_chart: Chart,
    pub amortization_tables: Vec<AmortizationTable>,
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// `$1,234,567.89`, negatives as `-$12.50`.
pub fn format_currency(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

/// One decimal place, e.g. `30.0%`.
pub fn format_percent(pct: Percent) -> String {
    let rounded = pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", rounded)
}

/// Compact chart-axis label: `$X.XM` from one million, `$XK` from one
/// thousand, otherwise `$X`. Exact halves round to even (`$2.2M` for
/// 2,250,000).
pub fn format_axis(value: Money) -> String {
    if value >= MILLION {
        let m = (value / MILLION).round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven);
        format!("${:.1}M", m)
    } else if value >= THOUSAND {
        let k = (value / THOUSAND).round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
        format!("${:.0}K", k)
    } else {
        let v = value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
        format!("${:.0}", v)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn comparison_table(summaries: &[ScenarioSummary]) -> Vec<ComparisonRow> {
    summaries
        .iter()
        .map(|s| ComparisonRow {
            name: s.name.clone(),
            principal: format_currency(s.principal),
            annual_rate: format!("{}%", s.annual_rate_pct.normalize()),
            term: format!("{} meses", s.term_months),
            monthly_payment: format_currency(s.monthly_payment),
            total_interest: format_currency(s.total_interest),
            total_paid: format_currency(s.total_paid),
        })
        .collect()
}

pub fn kpis(assessment: &AffordabilityAssessment) -> KpiBlock {
    KpiBlock {
        income: format_currency(assessment.income),
        highest_payment: format_currency(assessment.max_monthly_payment),
        highest_payment_scenario: assessment.scenario_name.clone(),
        debt_to_income: format_percent(assessment.debt_to_income_pct),
        tier: assessment.tier,
        tier_label: assessment.tier.label().to_string(),
        tier_color: assessment.tier.color().to_string(),
        message: assessment.tier.message().to_string(),
    }
}

pub fn balance_series(scenario: &str, schedule: &AmortizationSchedule) -> ChartSeries {
    series(scenario, schedule, |row| row.balance)
}

pub fn interest_series(scenario: &str, schedule: &AmortizationSchedule) -> ChartSeries {
    series(scenario, schedule, |row| row.cumulative_interest)
}

fn series(
    scenario: &str,
    schedule: &AmortizationSchedule,
    value: impl Fn(&crate::schedule::AmortizationRow) -> Money,
) -> ChartSeries {
    ChartSeries {
        scenario: scenario.to_string(),
        points: schedule
            .rows
            .iter()
            .map(|row| {
                let v = value(row);
                SeriesPoint {
                    period: row.period,
                    value: v,
                    label: format_axis(v),
                }
            })
            .collect(),
    }
}

pub fn amortization_table(scenario: &str, schedule: &AmortizationSchedule) -> AmortizationTable {
    AmortizationTable {
        scenario: scenario.to_string(),
        rows: schedule
            .rows
            .iter()
            .map(|row| FormattedRow {
                period: row.period,
                balance: format_currency(row.balance),
                cumulative_interest: format_currency(row.cumulative_interest),
                payment: format_currency(row.payment),
            })
            .collect(),
    }
}

pub fn build_report(comparison: &Comparison) -> Report {
    let balance = comparison
        .schedules
        .iter()
        .map(|s| balance_series(&s.name, &s.schedule))
        .collect();
    let interest = comparison
        .schedules
        .iter()
        .map(|s| interest_series(&s.name, &s.schedule))
        .collect();

    Report {
        kpis: kpis(&comparison.assessment),
        comparison: comparison_table(&comparison.summaries),
        cheapest: comparison.cheapest.clone(),
        balance_chart: Chart {
            title: "Comparación: ¿Qué tan rápido baja la deuda?".into(),
            x_label: "Meses".into(),
            y_label: "Saldo Pendiente".into(),
            caption: "Una curva más inclinada hacia abajo significa que amortizas más rápido."
                .into(),
            series: balance,
        },
        interest_chart: Chart {
            title: "Comparación: ¿Cuánto interés termino pagando?".into(),
            x_label: "Meses".into(),
            y_label: "Intereses Pagados Acumulados".into(),
            caption: "La línea más baja es la opción más barata en intereses totales.".into(),
            series: interest,
        },
        amortization_tables: comparison
            .schedules
            .iter()
            .map(|s| amortization_table(&s.name, &s.schedule))
            .collect(),
    }
}
