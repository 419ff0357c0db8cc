use serde::{Deserialize, Serialize};

use crate::error::LoanCompareError;
use crate::scenario::{self, defaults, LoanScenario, ScenarioDraft};
use crate::schedule;
use crate::LoanCompareResult;

/// Ordered collection of scenarios entered during one run.
///
/// Position is identity: names may repeat, and removal is by index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioBook {
    scenarios: Vec<LoanScenario>,
}

impl ScenarioBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already-built scenario after checking input bounds.
    ///
    /// The scenario's schedule must also be computable, so a stored book
    /// always recomputes.
    pub fn add(&mut self, scenario: LoanScenario) -> LoanCompareResult<&LoanScenario> {
        scenario::validate_entry(&scenario)?;
        schedule::compute_schedule(
            scenario.principal,
            scenario.annual_rate_pct,
            scenario.term_months,
        )?;
        self.scenarios.push(scenario);
        Ok(&self.scenarios[self.scenarios.len() - 1])
    }

    /// Fill defaults (including the auto-numbered name) and append.
    pub fn add_draft(&mut self, draft: ScenarioDraft) -> LoanCompareResult<&LoanScenario> {
        let scenario = draft.finalize(&self.next_default_name())?;
        self.add(scenario)
    }

    /// Remove the scenario at `index`; later scenarios shift down by one.
    pub fn remove(&mut self, index: usize) -> LoanCompareResult<LoanScenario> {
        if index >= self.scenarios.len() {
            return Err(LoanCompareError::IndexOutOfRange {
                index,
                len: self.scenarios.len(),
            });
        }
        Ok(self.scenarios.remove(index))
    }

    pub fn clear(&mut self) {
        self.scenarios.clear();
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn scenarios(&self) -> &[LoanScenario] {
        &self.scenarios
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LoanScenario> {
        self.scenarios.iter()
    }

    pub fn next_default_name(&self) -> String {
        format!("{} {}", defaults::NAME_PREFIX, self.scenarios.len() + 1)
    }
}

impl From<Vec<LoanScenario>> for ScenarioBook {
    fn from(scenarios: Vec<LoanScenario>) -> Self {
        Self { scenarios }
    }
}

impl<'a> IntoIterator for &'a ScenarioBook {
    type Item = &'a LoanScenario;
    type IntoIter = std::slice::Iter<'a, LoanScenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::recompute;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn named(name: &str) -> ScenarioDraft {
        ScenarioDraft {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_names_are_numbered() {
        let mut book = ScenarioBook::new();
        assert_eq!(book.next_default_name(), "Opción 1");
        book.add_draft(ScenarioDraft::default()).unwrap();
        book.add_draft(ScenarioDraft::default()).unwrap();
        let names: Vec<&str> = book.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Opción 1", "Opción 2"]);
    }

    #[test]
    fn test_remove_shifts_indices() {
        let mut book = ScenarioBook::new();
        for n in ["A", "B", "C", "D"] {
            book.add_draft(named(n)).unwrap();
        }
        let removed = book.remove(1).unwrap();
        assert_eq!(removed.name, "B");
        let names: Vec<&str> = book.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "D"]);
        assert_eq!(book.scenarios()[1].name, "C");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut book = ScenarioBook::new();
        book.add_draft(named("A")).unwrap();
        match book.remove(1).unwrap_err() {
            LoanCompareError::IndexOutOfRange { index, len } => {
                assert_eq!(index, 1);
                assert_eq!(len, 1);
            }
            other => panic!("Expected IndexOutOfRange, got {other:?}"),
        }
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut book = ScenarioBook::new();
        book.add_draft(named("A")).unwrap();
        book.clear();
        assert!(book.is_empty());
        assert_eq!(book.next_default_name(), "Opción 1");
    }

    #[test]
    fn test_invalid_entry_not_added() {
        let mut book = ScenarioBook::new();
        let draft = ScenarioDraft {
            principal: Some(dec!(10)),
            ..Default::default()
        };
        assert!(book.add_draft(draft).is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_unschedulable_entry_not_added() {
        let mut book = ScenarioBook::new();
        book.add_draft(named("A")).unwrap();
        let draft = ScenarioDraft {
            name: Some("B".into()),
            principal: Some(dec!(1_000_000)),
            annual_rate_pct: Some(dec!(1000)),
            term_months: Some(120),
        };
        assert!(matches!(
            book.add_draft(draft),
            Err(LoanCompareError::Overflow { .. })
        ));
        assert_eq!(book.len(), 1);
        assert!(recompute(book.scenarios(), dec!(1_500_000)).is_ok());
    }

    #[test]
    fn test_recompute_after_removal_has_no_stale_entries() {
        let mut book = ScenarioBook::new();
        book.add_draft(ScenarioDraft {
            name: Some("Banco A".into()),
            principal: Some(dec!(1_000_000)),
            ..Default::default()
        })
        .unwrap();
        book.add_draft(ScenarioDraft {
            name: Some("Banco B".into()),
            principal: Some(dec!(9_000_000)),
            ..Default::default()
        })
        .unwrap();

        let before = recompute(book.scenarios(), dec!(1_500_000)).unwrap();
        assert_eq!(before.result.assessment.scenario_name, "Banco B");

        book.remove(1).unwrap();
        let after = recompute(book.scenarios(), dec!(1_500_000)).unwrap();
        assert_eq!(after.result.summaries.len(), 1);
        assert_eq!(after.result.schedules.len(), 1);
        assert_eq!(after.result.assessment.scenario_name, "Banco A");
    }
}
