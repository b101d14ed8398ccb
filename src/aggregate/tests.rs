#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::CoercionFailure;

fn exp(id: i64, date: &str, category: &str, amount: Decimal) -> Expense {
    Expense::new(id, date.into(), category.into(), amount)
}

fn broken(id: i64, date: &str, category: &str) -> Expense {
    Expense {
        id,
        date: date.into(),
        category: category.into(),
        amount: Err(CoercionFailure { raw: "twelve".into() }),
    }
}

fn period(month: u32, year: i32) -> Period {
    Period::new(month, year).unwrap()
}

fn sample_ledger() -> Vec<Expense> {
    vec![
        exp(1, "2024-03-05", "Transport", dec!(40)),
        exp(2, "2024-04-01", "Transport", dec!(60)),
        exp(3, "2024-03-31", "Food & Drinks", dec!(12.50)),
        exp(4, "2023-03-15", "Food & Drinks", dec!(99)),
        exp(5, "2024-02-29", "Others", dec!(3)),
        exp(6, "2023-12-31", "Utilities", dec!(20)),
        exp(7, "2024-01-01", "Utilities", dec!(25)),
    ]
}

// ── filter_by_period ──────────────────────────────────────────

#[test]
fn test_filter_by_period_month_and_year_must_match() {
    let ledger = sample_ledger();
    let ids: Vec<i64> = filter_by_period(&ledger, period(3, 2024))
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_filter_by_period_year_boundary() {
    let ledger = sample_ledger();
    let dec_ids: Vec<i64> = filter_by_period(&ledger, period(12, 2023))
        .iter()
        .map(|e| e.id)
        .collect();
    let jan_ids: Vec<i64> = filter_by_period(&ledger, period(1, 2024))
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(dec_ids, vec![6]);
    assert_eq!(jan_ids, vec![7]);
}

#[test]
fn test_filter_by_period_ignores_storage_order() {
    let mut ledger = sample_ledger();
    ledger.reverse();
    let mut ids: Vec<i64> = filter_by_period(&ledger, period(3, 2024))
        .iter()
        .map(|e| e.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_filter_by_period_partitions_ledger() {
    let ledger = sample_ledger();
    let mut seen: Vec<i64> = Vec::new();
    for year in 2023..=2024 {
        for month in 1..=12 {
            for e in filter_by_period(&ledger, period(month, year)) {
                seen.push(e.id);
            }
        }
    }
    seen.sort();
    // every record exactly once
    assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_filter_by_period_skips_undated() {
    let ledger = vec![
        exp(1, "not a date", "Food", dec!(5)),
        exp(2, "2024-03-10", "Food", dec!(5)),
    ];
    let got = filter_by_period(&ledger, period(3, 2024));
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].id, 2);
}

// ── summarize / compute_balance ───────────────────────────────

#[test]
fn test_summarize_empty_is_zero() {
    let none: Vec<Expense> = Vec::new();
    assert_eq!(summarize(&none).total_spend, Decimal::ZERO);
}

#[test]
fn test_summarize_order_independent() {
    let mut ledger = sample_ledger();
    let forward = summarize(&ledger).total_spend;
    ledger.reverse();
    let backward = summarize(&ledger).total_spend;
    assert_eq!(forward, backward);
    assert_eq!(forward, dec!(259.50));
}

#[test]
fn test_summarize_skips_malformed_amount() {
    let ledger = vec![
        exp(1, "2024-03-01", "Food", dec!(10)),
        broken(2, "2024-03-02", "Food"),
        exp(3, "2024-03-03", "Food", dec!(2.25)),
    ];
    assert_eq!(summarize(&ledger).total_spend, dec!(12.25));
}

#[test]
fn test_summarize_huge_stored_amounts_do_not_overflow() {
    let huge = dec!(50000000000000000000000000000);
    let ledger = vec![
        exp(1, "2024-03-01", "Food", huge),
        exp(2, "2024-03-02", "Food", huge),
        exp(3, "2024-03-03", "Rent", dec!(1)),
    ];
    let in_period = filter_by_period(&ledger, period(3, 2024));
    assert_eq!(
        summarize(in_period.iter().copied()).total_spend,
        huge + dec!(1)
    );

    let grouped = group_by_category(&ledger);
    assert_eq!(grouped.get("Food"), Some(&huge));
    assert_eq!(grouped.get("Rent"), Some(&dec!(1)));

    let dash = build_dashboard(&ledger, &BudgetMap::defaults(), dec!(1500), period(3, 2024));
    assert!(dash.is_overspent());
}

#[test]
fn test_classify_extreme_values_saturate() {
    let reading = classify_budget_status(Decimal::MIN, Decimal::MAX);
    assert_eq!(reading.status, BudgetStatus::Overspending);
    assert_eq!(reading.remaining, Decimal::MIN);
}

#[test]
fn test_compute_balance_can_go_negative() {
    assert_eq!(compute_balance(dec!(1500), dec!(40)), dec!(1460));
    assert_eq!(compute_balance(dec!(100), dec!(130.50)), dec!(-30.50));
}

// ── group_by_category ─────────────────────────────────────────

#[test]
fn test_group_by_category_keeps_orphans() {
    let ledger = vec![
        exp(1, "2024-03-01", "Food", dec!(10)),
        exp(2, "2024-03-02", "Food", dec!(5)),
        exp(3, "2024-03-03", "Misc", dec!(3)),
    ];
    let grouped = group_by_category(&ledger);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped["Food"], dec!(15));
    assert_eq!(grouped["Misc"], dec!(3));
}

#[test]
fn test_group_by_category_excludes_malformed() {
    let ledger = vec![
        exp(1, "2024-03-01", "Food", dec!(10)),
        broken(2, "2024-03-02", "Food"),
        broken(3, "2024-03-02", "Ghost"),
    ];
    let grouped = group_by_category(&ledger);
    assert_eq!(grouped["Food"], dec!(10));
    assert!(!grouped.contains_key("Ghost"));
}

// ── classify_budget_status ────────────────────────────────────

#[test]
fn test_classify_critical() {
    let r = classify_budget_status(dec!(100), dec!(95));
    assert_eq!(r.remaining, dec!(5));
    assert_eq!(r.status, BudgetStatus::Critical);
}

#[test]
fn test_classify_overspending() {
    let r = classify_budget_status(dec!(100), dec!(110));
    assert_eq!(r.remaining, dec!(-10));
    assert_eq!(r.status, BudgetStatus::Overspending);
}

#[test]
fn test_classify_normal() {
    let r = classify_budget_status(dec!(100), dec!(40));
    assert_eq!(r.remaining, dec!(60));
    assert_eq!(r.status, BudgetStatus::Normal);
}

#[test]
fn test_classify_moderate() {
    let r = classify_budget_status(dec!(100), dec!(55));
    assert_eq!(r.remaining, dec!(45));
    assert_eq!(r.status, BudgetStatus::Moderate);
}

#[test]
fn test_classify_zero_budget() {
    let r = classify_budget_status(Decimal::ZERO, Decimal::ZERO);
    assert_eq!(r.remaining, Decimal::ZERO);
    assert_eq!(r.status, BudgetStatus::Normal);

    let r = classify_budget_status(Decimal::ZERO, dec!(0.01));
    assert_eq!(r.status, BudgetStatus::Overspending);
}

#[test]
fn test_classify_threshold_ties() {
    // remaining == 10% of budget is not below it
    assert_eq!(
        classify_budget_status(dec!(100), dec!(90)).status,
        BudgetStatus::Moderate
    );
    // remaining == 50% of budget is not below it
    assert_eq!(
        classify_budget_status(dec!(100), dec!(50)).status,
        BudgetStatus::Normal
    );
    // spent exactly the budget
    assert_eq!(
        classify_budget_status(dec!(100), dec!(100)).status,
        BudgetStatus::Critical
    );
}

#[test]
fn test_status_display() {
    assert_eq!(BudgetStatus::Overspending.to_string(), "OVERSPENDING");
    assert_eq!(BudgetStatus::Critical.as_str(), "CRITICAL");
}

// ── build_budget_tracker_report ───────────────────────────────

#[test]
fn test_tracker_one_row_per_budget_in_order() {
    let budgets = BudgetMap::defaults();
    let ledger = vec![
        exp(1, "2024-03-01", "Transport", dec!(95)),
        exp(2, "2024-03-02", "Pets", dec!(500)),
    ];
    let rows = build_budget_tracker_report(&budgets, &ledger);
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].category, "Food & Drinks");
    assert_eq!(rows[0].spent, Decimal::ZERO);
    assert_eq!(rows[0].status, BudgetStatus::Normal);
    assert_eq!(rows[1].category, "Transport");
    assert_eq!(rows[1].spent, dec!(95));
    assert_eq!(rows[1].remaining, dec!(5));
    assert_eq!(rows[1].status, BudgetStatus::Critical);
    assert!(rows.iter().all(|r| r.category != "Pets"));
}

#[test]
fn test_tracker_row_is_over() {
    let mut budgets = BudgetMap::new();
    budgets.insert("Food".into(), dec!(10));
    let ledger = vec![exp(1, "2024-03-01", "Food", dec!(12))];
    let rows = build_budget_tracker_report(&budgets, &ledger);
    assert!(rows[0].is_over());
    assert_eq!(rows[0].status, BudgetStatus::Overspending);
}

// ── build_dashboard ───────────────────────────────────────────

#[test]
fn test_dashboard_end_to_end() {
    let ledger = vec![
        exp(1, "2024-03-05", "Transport", dec!(40)),
        exp(2, "2024-04-01", "Transport", dec!(60)),
    ];
    let mut budgets = BudgetMap::new();
    budgets.insert("Transport".into(), dec!(100));

    let dash = build_dashboard(&ledger, &budgets, dec!(1500), period(3, 2024));
    assert_eq!(dash.expenses.len(), 1);
    assert_eq!(dash.expenses[0].id, 1);
    assert_eq!(dash.total_spend, dec!(40));
    assert_eq!(dash.balance, dec!(1460));
    assert!(!dash.is_overspent());
    assert_eq!(dash.tracker.len(), 1);
    assert_eq!(dash.tracker[0].remaining, dec!(60));
    assert_eq!(dash.tracker[0].status, BudgetStatus::Normal);
}

#[test]
fn test_dashboard_expenses_newest_first() {
    let ledger = vec![
        exp(10, "2024-03-02", "Food", dec!(1)),
        exp(11, "2024-03-20", "Food", dec!(1)),
        exp(12, "2024-03-02", "Food", dec!(1)),
    ];
    let dash = build_dashboard(&ledger, &BudgetMap::new(), dec!(10), period(3, 2024));
    let ids: Vec<i64> = dash.expenses.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![11, 12, 10]);
}

#[test]
fn test_dashboard_chart_placeholder_when_empty() {
    let dash = build_dashboard(&[], &BudgetMap::defaults(), dec!(1500), period(3, 2024));
    assert_eq!(
        dash.chart_data(),
        vec![(NO_EXPENSES_LABEL.to_string(), Decimal::ONE)]
    );
    assert_eq!(dash.total_spend, Decimal::ZERO);
    assert_eq!(dash.balance, dec!(1500));
}

#[test]
fn test_dashboard_overspent() {
    let ledger = vec![exp(1, "2024-03-05", "Food", dec!(20))];
    let dash = build_dashboard(&ledger, &BudgetMap::new(), dec!(10), period(3, 2024));
    assert!(dash.is_overspent());
    assert_eq!(dash.balance, dec!(-10));
    assert_eq!(dash.chart_data(), vec![("Food".to_string(), dec!(20))]);
}
