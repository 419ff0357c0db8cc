use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanCompareError;
use crate::types::{Money, Percent};
use crate::LoanCompareResult;

/// Defaults and lower bounds used by the input-collection surface.
pub mod defaults {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    pub const PRINCIPAL: Decimal = dec!(1_000_000);
    pub const PRINCIPAL_MIN: Decimal = dec!(1_000);
    pub const PRINCIPAL_STEP: Decimal = dec!(10_000);

    pub const ANNUAL_RATE_PCT: Decimal = dec!(12.0);
    pub const ANNUAL_RATE_PCT_MIN: Decimal = dec!(0.1);
    pub const ANNUAL_RATE_PCT_STEP: Decimal = dec!(0.1);

    pub const TERM_MONTHS: u32 = 12;
    pub const TERM_MONTHS_MIN: u32 = 1;

    pub const MONTHLY_INCOME: Decimal = dec!(1_500_000);
    pub const MONTHLY_INCOME_STEP: Decimal = dec!(50_000);

    /// Label prefix for auto-numbered scenarios ("Opción 1", "Opción 2", ...).
    pub const NAME_PREFIX: &str = "Opción";
}

/// One loan option entered by the user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanScenario {
    pub name: String,
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub term_months: u32,
}

impl LoanScenario {
    pub fn new(
        name: impl Into<String>,
        principal: Money,
        annual_rate_pct: Percent,
        term_months: u32,
    ) -> Self {
        Self {
            name: name.into(),
            principal,
            annual_rate_pct,
            term_months,
        }
    }
}

/// Partially filled scenario as captured from a form, flags or a session
/// line. Missing fields fall back to [`defaults`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_rate_pct: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
}

impl ScenarioDraft {
    /// Fill defaults and enforce the input-surface bounds.
    ///
    /// `default_name` is used when the draft carries no name or a blank one.
    pub fn finalize(self, default_name: &str) -> LoanCompareResult<LoanScenario> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => default_name.to_string(),
        };
        let scenario = LoanScenario {
            name,
            principal: self.principal.unwrap_or(defaults::PRINCIPAL),
            annual_rate_pct: self.annual_rate_pct.unwrap_or(defaults::ANNUAL_RATE_PCT),
            term_months: self.term_months.unwrap_or(defaults::TERM_MONTHS),
        };
        validate_entry(&scenario)?;
        Ok(scenario)
    }
}

/// Bounds enforced where scenarios are collected. The calculator itself only
/// needs a positive principal, a non-negative rate and at least one period.
pub fn validate_entry(scenario: &LoanScenario) -> LoanCompareResult<()> {
    if scenario.principal < defaults::PRINCIPAL_MIN {
        return Err(LoanCompareError::InvalidInput {
            field: "principal".into(),
            reason: format!("Loan amount must be at least {}", defaults::PRINCIPAL_MIN),
        });
    }
    if scenario.annual_rate_pct < defaults::ANNUAL_RATE_PCT_MIN {
        return Err(LoanCompareError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: format!(
                "Annual rate must be at least {}%",
                defaults::ANNUAL_RATE_PCT_MIN
            ),
        });
    }
    if scenario.term_months < defaults::TERM_MONTHS_MIN {
        return Err(LoanCompareError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }
    Ok(())
}

/// Monthly income must be zero or positive.
pub fn validate_income(income: Money) -> LoanCompareResult<()> {
    if income < Decimal::ZERO {
        return Err(LoanCompareError::InvalidInput {
            field: "income".into(),
            reason: "Monthly income cannot be negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_draft_takes_defaults() {
        let s = ScenarioDraft::default().finalize("Opción 1").unwrap();
        assert_eq!(s.name, "Opción 1");
        assert_eq!(s.principal, dec!(1_000_000));
        assert_eq!(s.annual_rate_pct, dec!(12.0));
        assert_eq!(s.term_months, 12);
    }

    #[test]
    fn test_blank_name_uses_default() {
        let draft = ScenarioDraft {
            name: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(draft.finalize("Opción 3").unwrap().name, "Opción 3");
    }

    #[test]
    fn test_name_is_trimmed() {
        let draft = ScenarioDraft {
            name: Some("  Banco A ".into()),
            ..Default::default()
        };
        assert_eq!(draft.finalize("Opción 1").unwrap().name, "Banco A");
    }

    #[test]
    fn test_principal_below_minimum_rejected() {
        let draft = ScenarioDraft {
            principal: Some(dec!(999.99)),
            ..Default::default()
        };
        match draft.finalize("x").unwrap_err() {
            LoanCompareError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_rate_below_minimum_rejected() {
        let draft = ScenarioDraft {
            annual_rate_pct: Some(dec!(0.05)),
            ..Default::default()
        };
        match draft.finalize("x").unwrap_err() {
            LoanCompareError::InvalidInput { field, .. } => assert_eq!(field, "annual_rate_pct"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_term_rejected() {
        let draft = ScenarioDraft {
            term_months: Some(0),
            ..Default::default()
        };
        assert!(draft.finalize("x").is_err());
    }

    #[test]
    fn test_negative_income_rejected() {
        assert!(validate_income(dec!(-1)).is_err());
        assert!(validate_income(Decimal::ZERO).is_ok());
    }
}
