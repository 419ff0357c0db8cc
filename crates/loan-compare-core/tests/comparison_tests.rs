use loan_compare_core::affordability::{self, RiskTier};
use loan_compare_core::pipeline;
use loan_compare_core::presentation;
use loan_compare_core::schedule;
use loan_compare_core::summary;
use loan_compare_core::{LoanCompareError, LoanScenario, ScenarioBook, ScenarioDraft};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Schedule tests
// ===========================================================================

#[test]
fn test_reference_loan_schedule() {
    // 1,000,000 at 12% over 12 months: 1% per month
    let s = schedule::compute_schedule(dec!(1_000_000), dec!(12), 12).unwrap();

    // Level payment ≈ 88,848.79
    assert!((s.monthly_payment - dec!(88_848.79)).abs() < dec!(0.01));

    // Total interest ≈ 66,185.46
    assert!((s.total_interest - dec!(66_185.46)).abs() < dec!(0.01));

    // Last row closes the loan
    let last = s.rows.last().unwrap();
    assert_eq!(last.period, 12);
    assert_eq!(last.balance, Decimal::ZERO);
    assert_eq!(last.cumulative_interest, s.total_interest);

    // Cumulative interest is monotonic
    for pair in s.rows.windows(2) {
        assert!(pair[1].cumulative_interest > pair[0].cumulative_interest);
    }
}

#[test]
fn test_long_mortgage_closes_exactly() {
    let s = schedule::compute_schedule(dec!(350_000), dec!(6.75), 360).unwrap();
    assert_eq!(s.rows.len(), 360);
    assert_eq!(s.rows[359].balance, Decimal::ZERO);

    let paid: Decimal = s.rows.iter().map(|r| r.payment).sum();
    let expected = dec!(350_000) + s.total_interest;
    assert!((paid - expected).abs() <= expected * dec!(0.000001));
}

#[test]
fn test_zero_rate_schedule_has_no_interest() {
    let s = schedule::compute_schedule(dec!(120_000), Decimal::ZERO, 24).unwrap();
    assert!(s.rows.iter().all(|r| r.payment == dec!(5_000)));
    assert!(s.rows.iter().all(|r| r.cumulative_interest.is_zero()));
    assert_eq!(s.total_paid, dec!(120_000));
}

// ===========================================================================
// Aggregation + affordability
// ===========================================================================

fn three_banks() -> Vec<LoanScenario> {
    vec![
        LoanScenario::new("Banco A", dec!(1_000_000), dec!(12), 12),
        LoanScenario::new("Banco B", dec!(1_000_000), dec!(14.5), 18),
        LoanScenario::new("Banco C", dec!(1_500_000), dec!(11), 24),
    ]
}

#[test]
fn test_summaries_follow_input_order() {
    let out = pipeline::recompute(&three_banks(), dec!(1_500_000)).unwrap();
    let names: Vec<&str> = out.result.summaries.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Banco A", "Banco B", "Banco C"]);

    for s in &out.result.summaries {
        assert_eq!(s.total_paid, s.principal + s.total_interest);
    }
}

#[test]
fn test_max_payment_matches_argmax() {
    let out = pipeline::recompute(&three_banks(), dec!(1_500_000)).unwrap();
    let heaviest = summary::max_payment(&out.result.summaries).unwrap();
    assert_eq!(out.result.assessment.scenario_name, heaviest.name);
    assert_eq!(out.result.assessment.max_monthly_payment, heaviest.monthly_payment);
    for s in &out.result.summaries {
        assert!(s.monthly_payment <= heaviest.monthly_payment);
    }
}

#[test]
fn test_identical_scenarios_report_first() {
    let scenarios = vec![
        LoanScenario::new("Primero", dec!(2_000_000), dec!(12), 12),
        LoanScenario::new("Segundo", dec!(2_000_000), dec!(12), 12),
    ];
    let out = pipeline::recompute(&scenarios, dec!(1_500_000)).unwrap();
    assert_eq!(out.result.assessment.scenario_name, "Primero");
}

#[test]
fn test_tier_table() {
    let income = dec!(1_000_000);
    let cases = [
        (dec!(300_000), RiskTier::Healthy),
        (dec!(300_001), RiskTier::Caution),
        (dec!(400_000), RiskTier::Caution),
        (dec!(400_001), RiskTier::Critical),
    ];
    for (payment, tier) in cases {
        let a = affordability::classify("x", payment, income);
        assert_eq!(a.tier, tier, "payment {payment}");
    }
    assert_eq!(affordability::classify("x", dec!(1), Decimal::ZERO).tier, RiskTier::Healthy);
}

// ===========================================================================
// Session flow
// ===========================================================================

#[test]
fn test_session_add_remove_recompute() {
    let mut book = ScenarioBook::new();
    for (name, principal) in [("A", dec!(1_000_000)), ("B", dec!(5_000_000)), ("C", dec!(2_000_000))] {
        book.add_draft(ScenarioDraft {
            name: Some(name.into()),
            principal: Some(principal),
            ..Default::default()
        })
        .unwrap();
    }

    // B is ~444K/month against 1.5M income => 29.6%
    let out = pipeline::recompute(book.scenarios(), dec!(1_500_000)).unwrap();
    assert_eq!(out.result.assessment.scenario_name, "B");
    assert_eq!(out.result.assessment.tier, RiskTier::Healthy);

    book.remove(1).unwrap();
    assert_eq!(book.scenarios()[1].name, "C");

    let out = pipeline::recompute(book.scenarios(), dec!(1_500_000)).unwrap();
    assert_eq!(out.result.summaries.len(), 2);
    assert_eq!(out.result.assessment.scenario_name, "C");

    book.clear();
    assert!(matches!(
        pipeline::recompute(book.scenarios(), dec!(1_500_000)),
        Err(LoanCompareError::EmptyScenarioSet)
    ));
}

#[test]
fn test_report_formats_reference_loan() {
    let scenarios = vec![LoanScenario::new("Opción 1", dec!(1_000_000), dec!(12), 12)];
    let out = pipeline::recompute(&scenarios, dec!(1_500_000)).unwrap();
    let report = presentation::build_report(&out.result);

    let row = &report.comparison[0];
    assert_eq!(row.monthly_payment, "$88,848.79");
    assert_eq!(row.total_interest, "$66,185.46");
    assert_eq!(row.total_paid, "$1,066,185.46");
    assert_eq!(report.kpis.debt_to_income, "5.9%");
    assert_eq!(report.kpis.tier_label, "SALUDABLE");
    assert_eq!(report.balance_chart.series[0].points[0].label, "$921K");
}
