use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::summary::{self, ScenarioSummary};
use crate::types::*;
use crate::LoanCompareResult;

// ---------------------------------------------------------------------------
// Tier thresholds (debt-to-income, percent)
// ---------------------------------------------------------------------------

/// Highest ratio still considered healthy (inclusive).
pub const HEALTHY_MAX_PCT: Decimal = dec!(30);
/// Highest ratio still considered cautionary (inclusive); above is critical.
pub const CAUTION_MAX_PCT: Decimal = dec!(40);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Healthy,
    Caution,
    Critical,
}

impl RiskTier {
    /// Map a debt-to-income percentage to its tier. First match wins.
    pub fn from_ratio(ratio_pct: Percent) -> Self {
        if ratio_pct <= HEALTHY_MAX_PCT {
            Self::Healthy
        } else if ratio_pct <= CAUTION_MAX_PCT {
            Self::Caution
        } else {
            Self::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "SALUDABLE",
            Self::Caution => "PRECAUCIÓN",
            Self::Critical => "CRÍTICO",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Healthy => "green",
            Self::Caution => "orange",
            Self::Critical => "red",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Healthy => "Tus ingresos cubren cómodamente la cuota (menos del 30%).",
            Self::Caution => "La cuota representa entre el 30% y 40% de tus ingresos.",
            Self::Critical => {
                "¡Cuidado! La cuota supera el 40% de tus ingresos. Riesgo de sobreendeudamiento."
            }
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "HEALTHY"),
            Self::Caution => write!(f, "CAUTION"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub income: Money,
    /// Scenario carrying the highest monthly payment.
    pub scenario_name: String,
    pub max_monthly_payment: Money,
    pub debt_to_income_pct: Percent,
    pub tier: RiskTier,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Payment as a percentage of income. Zero income yields a ratio of 0; a
/// ratio too large to represent saturates at `Decimal::MAX`.
pub fn debt_to_income(max_monthly_payment: Money, monthly_income: Money) -> Percent {
    if monthly_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    percent_of(max_monthly_payment, monthly_income).unwrap_or(Decimal::MAX)
}

pub fn classify(
    scenario_name: impl Into<String>,
    max_monthly_payment: Money,
    monthly_income: Money,
) -> AffordabilityAssessment {
    let ratio = debt_to_income(max_monthly_payment, monthly_income);
    AffordabilityAssessment {
        income: monthly_income,
        scenario_name: scenario_name.into(),
        max_monthly_payment,
        debt_to_income_pct: ratio,
        tier: RiskTier::from_ratio(ratio),
    }
}

/// Classify the heaviest scenario in `summaries` against `monthly_income`.
///
/// Scenarios are treated as alternatives: only the single highest payment is
/// tested, not the sum across scenarios.
pub fn assess(
    summaries: &[ScenarioSummary],
    monthly_income: Money,
) -> LoanCompareResult<AffordabilityAssessment> {
    let heaviest = summary::max_payment(summaries)?;
    Ok(classify(
        heaviest.name.clone(),
        heaviest.monthly_payment,
        monthly_income,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoanCompareError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tiny_income_saturates_to_critical() {
        let a = classify("A", dec!(88_848.79), dec!(0.0000000000000000000001));
        assert_eq!(a.debt_to_income_pct, Decimal::MAX);
        assert_eq!(a.tier, RiskTier::Critical);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::from_ratio(dec!(0)), RiskTier::Healthy);
        assert_eq!(RiskTier::from_ratio(dec!(30.0)), RiskTier::Healthy);
        assert_eq!(RiskTier::from_ratio(dec!(30.0001)), RiskTier::Caution);
        assert_eq!(RiskTier::from_ratio(dec!(40.0)), RiskTier::Caution);
        assert_eq!(RiskTier::from_ratio(dec!(40.0001)), RiskTier::Critical);
        assert_eq!(RiskTier::from_ratio(dec!(250)), RiskTier::Critical);
    }

    #[test]
    fn test_ratio_exactly_thirty() {
        let a = classify("A", dec!(450_000), dec!(1_500_000));
        assert_eq!(a.debt_to_income_pct, dec!(30));
        assert_eq!(a.tier, RiskTier::Healthy);
    }

    #[test]
    fn test_ratio_exactly_forty() {
        let a = classify("A", dec!(600_000), dec!(1_500_000));
        assert_eq!(a.debt_to_income_pct, dec!(40));
        assert_eq!(a.tier, RiskTier::Caution);
    }

    #[test]
    fn test_zero_income_falls_back_to_zero_ratio() {
        let a = classify("A", dec!(88_848.79), Decimal::ZERO);
        assert_eq!(a.debt_to_income_pct, Decimal::ZERO);
        assert_eq!(a.tier, RiskTier::Healthy);
    }

    #[test]
    fn test_reference_loan_is_healthy() {
        // 88,848.79 / 1,500,000 = 5.92%
        let a = classify("Opción 1", dec!(88_848.79), dec!(1_500_000));
        assert!((a.debt_to_income_pct - dec!(5.92)).abs() < dec!(0.01));
        assert_eq!(a.tier, RiskTier::Healthy);
    }

    #[test]
    fn test_assess_uses_heaviest_scenario() {
        let summaries = vec![
            summary_with_payment("light", dec!(100_000)),
            summary_with_payment("heavy", dec!(700_000)),
            summary_with_payment("mid", dec!(500_000)),
        ];
        let a = assess(&summaries, dec!(1_500_000)).unwrap();
        assert_eq!(a.scenario_name, "heavy");
        assert_eq!(a.max_monthly_payment, dec!(700_000));
        assert_eq!(a.tier, RiskTier::Critical);
    }

    #[test]
    fn test_assess_empty() {
        assert!(matches!(
            assess(&[], dec!(1_500_000)),
            Err(LoanCompareError::EmptyScenarioSet)
        ));
    }

    #[test]
    fn test_tier_serialization() {
        let json = serde_json::to_string(&RiskTier::Caution).unwrap();
        assert_eq!(json, "\"CAUTION\"");
        assert_eq!(RiskTier::Critical.to_string(), "CRITICAL");
        assert_eq!(RiskTier::Healthy.label(), "SALUDABLE");
        assert_eq!(RiskTier::Critical.color(), "red");
    }

    fn summary_with_payment(name: &str, payment: Money) -> ScenarioSummary {
        ScenarioSummary {
            name: name.into(),
            principal: dec!(1_000_000),
            annual_rate_pct: dec!(12),
            term_months: 12,
            monthly_payment: payment,
            total_interest: Decimal::ZERO,
            total_paid: dec!(1_000_000),
        }
    }
}
