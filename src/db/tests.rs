#![allow(clippy::unwrap_used)]

use super::*;
use crate::error::CoercionFailure;
use rust_decimal_macros::dec;

fn sample_expenses() -> Vec<Expense> {
    vec![
        Expense::new(1709600000000, "2024-03-05".into(), "Transport".into(), dec!(40)),
        Expense::new(1711929600000, "2024-04-01".into(), "Transport".into(), dec!(60.5)),
        Expense::new(1711929600001, "2024-04-01".into(), "Pets".into(), dec!(7.25)),
    ]
}

// ── Defaults ──────────────────────────────────────────────────

#[test]
fn test_fresh_database_defaults() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.load_all_expenses().unwrap().is_empty());
    assert_eq!(db.load_budgets().unwrap(), BudgetMap::defaults());
    assert_eq!(db.load_total_budget().unwrap(), dec!(1500.00));
    assert_eq!(db.stored_period().unwrap(), None);
}

#[test]
fn test_open_on_disk_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.save_all_expenses(&sample_expenses()).unwrap();
        db.save_total_budget(dec!(900)).unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.load_all_expenses().unwrap(), sample_expenses());
    assert_eq!(db.load_total_budget().unwrap(), dec!(900));
    assert_eq!(db.get_expense_count().unwrap(), 3);
}

// ── Expenses ──────────────────────────────────────────────────

#[test]
fn test_expenses_roundtrip() {
    let mut db = Database::open_in_memory().unwrap();
    db.save_all_expenses(&sample_expenses()).unwrap();
    let loaded = db.load_all_expenses().unwrap();
    assert_eq!(loaded, sample_expenses());
}

#[test]
fn test_save_all_expenses_replaces() {
    let mut db = Database::open_in_memory().unwrap();
    db.save_all_expenses(&sample_expenses()).unwrap();
    let only = vec![Expense::new(5, "2024-05-01".into(), "Food".into(), dec!(1))];
    db.save_all_expenses(&only).unwrap();
    assert_eq!(db.load_all_expenses().unwrap(), only);
}

#[test]
fn test_save_all_expenses_rounds_to_cents() {
    let mut db = Database::open_in_memory().unwrap();
    let e = Expense::new(1, "2024-05-01".into(), "Food".into(), dec!(3.14159));
    db.save_all_expenses(&[e]).unwrap();
    let loaded = db.load_all_expenses().unwrap();
    assert_eq!(loaded[0].amount, Ok(dec!(3.14)));
}

#[test]
fn test_duplicate_id_rolls_back() {
    let mut db = Database::open_in_memory().unwrap();
    db.save_all_expenses(&sample_expenses()).unwrap();

    let dupes = vec![
        Expense::new(9, "2024-05-01".into(), "Food".into(), dec!(1)),
        Expense::new(9, "2024-05-02".into(), "Food".into(), dec!(2)),
    ];
    assert!(db.save_all_expenses(&dupes).is_err());
    // previous ledger still intact
    assert_eq!(db.load_all_expenses().unwrap(), sample_expenses());
}

#[test]
fn test_malformed_amount_loads_as_failure() {
    let mut db = Database::open_in_memory().unwrap();
    db.save_all_expenses(&sample_expenses()).unwrap();
    db.conn
        .execute("UPDATE expenses SET amount = 'oops' WHERE id = 1709600000000", [])
        .unwrap();

    let loaded = db.load_all_expenses().unwrap();
    assert_eq!(loaded.len(), 3);
    let bad = loaded.iter().find(|e| e.id == 1709600000000).unwrap();
    assert_eq!(bad.amount, Err(CoercionFailure { raw: "oops".into() }));

    // saving again keeps the raw text rather than dropping the record
    db.save_all_expenses(&loaded).unwrap();
    let again = db.load_all_expenses().unwrap();
    assert_eq!(again, loaded);
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_budgets_replace_wholesale() {
    let mut db = Database::open_in_memory().unwrap();
    let mut budgets = BudgetMap::new();
    budgets.insert("Rent".into(), dec!(800));
    budgets.insert("Books".into(), dec!(45.5));
    db.save_budgets(&budgets).unwrap();

    let loaded = db.load_budgets().unwrap();
    assert_eq!(loaded, budgets);
    assert!(!loaded.contains("Food & Drinks"));
    let order: Vec<&str> = loaded.categories().collect();
    assert_eq!(order, vec!["Rent", "Books"]);
}

#[test]
fn test_empty_budgets_stay_empty() {
    let mut db = Database::open_in_memory().unwrap();
    db.save_budgets(&BudgetMap::new()).unwrap();
    assert!(db.load_budgets().unwrap().is_empty());
}

#[test]
fn test_budgets_rounded_on_save() {
    let mut db = Database::open_in_memory().unwrap();
    let mut budgets = BudgetMap::new();
    budgets.insert("Food".into(), dec!(10.555));
    db.save_budgets(&budgets).unwrap();
    assert_eq!(db.load_budgets().unwrap().get("Food"), Some(dec!(10.56)));
}

// ── Total budget ──────────────────────────────────────────────

#[test]
fn test_total_budget_rounded() {
    let mut db = Database::open_in_memory().unwrap();
    db.save_total_budget(dec!(1234.567)).unwrap();
    assert_eq!(db.load_total_budget().unwrap(), dec!(1234.57));
}

#[test]
fn test_total_budget_unreadable_falls_back() {
    let db = Database::open_in_memory().unwrap();
    db.set_setting("total_budget", "lots").unwrap();
    assert_eq!(db.load_total_budget().unwrap(), DEFAULT_TOTAL_BUDGET);
}

// ── Selected period ───────────────────────────────────────────

#[test]
fn test_first_read_persists_current_period() {
    let mut db = Database::open_in_memory().unwrap();
    let period = db.load_selected_period().unwrap();
    assert_eq!(period, Period::current());
    assert_eq!(db.stored_period().unwrap(), Some(period));
}

#[test]
fn test_selected_period_roundtrip() {
    let mut db = Database::open_in_memory().unwrap();
    let period = Period::new(3, 2024).unwrap();
    db.save_selected_period(period).unwrap();
    assert_eq!(db.load_selected_period().unwrap(), period);
}

#[test]
fn test_invalid_stored_period_reinitialised() {
    let mut db = Database::open_in_memory().unwrap();
    db.set_setting("selected_month", "13").unwrap();
    db.set_setting("selected_year", "2024").unwrap();
    assert_eq!(db.stored_period().unwrap(), None);
    assert_eq!(db.load_selected_period().unwrap(), Period::current());
}
