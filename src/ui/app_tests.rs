#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::error::ValidationError;

fn period() -> Period {
    Period::new(3, 2024).unwrap()
}

fn logged_out() -> App {
    App::new(period())
}

// ── Login ─────────────────────────────────────────────────────

#[test]
fn test_credentials_match() {
    assert!(credentials_match("student", "123"));
    assert!(credentials_match("  student ", " 123"));
    assert!(!credentials_match("student", "1234"));
    assert!(!credentials_match("Student", "123"));
    assert!(!credentials_match("", ""));
}

#[test]
fn test_app_starts_on_login() {
    let app = logged_out();
    assert_eq!(app.screen, Screen::Login);
    assert!(app.running);
    assert!(!app.login_failed);
}

#[test]
fn test_submit_login_success_opens_dashboard() {
    let mut app = logged_out();
    app.login_username = "student".into();
    app.login_password = "123".into();
    assert!(app.submit_login());
    assert_eq!(app.screen, Screen::Dashboard);
    assert!(app.login_password.is_empty());
    assert_eq!(app.status_message, "Welcome, student");
}

#[test]
fn test_submit_login_failure_stays_on_login() {
    let mut app = logged_out();
    app.login_username = "student".into();
    app.login_password = "nope".into();
    assert!(!app.submit_login());
    assert_eq!(app.screen, Screen::Login);
    assert!(app.login_failed);
    assert!(app.login_password.is_empty());
    assert_eq!(app.login_field, LoginField::Password);
}

#[test]
fn test_logout_resets_form() {
    let mut app = logged_out();
    app.login_username = "student".into();
    app.login_password = "123".into();
    app.submit_login();
    app.logout();
    assert_eq!(app.screen, Screen::Login);
    assert!(app.login_username.is_empty());
    assert_eq!(app.login_field, LoginField::Username);
    assert!(app.status_message.is_empty());
}

// ── Screens ───────────────────────────────────────────────────

#[test]
fn test_login_not_a_tab() {
    assert!(!Screen::all().contains(&Screen::Login));
    assert_eq!(Screen::all().len(), 3);
}

#[test]
fn test_login_field_toggles() {
    assert_eq!(LoginField::Username.other(), LoginField::Password);
    assert_eq!(LoginField::Password.other(), LoginField::Username);
}

#[test]
fn test_screen_cycle_wraps() {
    assert_eq!(Screen::Dashboard.cycle(1), Screen::Expenses);
    assert_eq!(Screen::Budgets.cycle(1), Screen::Dashboard);
    assert_eq!(Screen::Dashboard.cycle(-1), Screen::Budgets);
    assert_eq!(Screen::Expenses.cycle(-1), Screen::Dashboard);
    assert_eq!(Screen::Login.cycle(1), Screen::Login);
}

#[test]
fn test_list_cursor_follows_screen() {
    let mut app = logged_out();
    assert!(app.list_cursor().is_none());

    app.screen = Screen::Dashboard;
    assert!(app.list_cursor().is_none());

    app.screen = Screen::Budgets;
    app.budget_index = 2;
    let (index, _, len) = app.list_cursor().unwrap();
    assert_eq!(*index, 2);
    assert_eq!(len, app.dashboard.tracker.len());

    app.screen = Screen::Expenses;
    let (index, scroll, _) = app.list_cursor().unwrap();
    *index = 4;
    *scroll = 1;
    assert_eq!((app.expense_index, app.expense_scroll), (4, 1));
}

// ── Refresh ───────────────────────────────────────────────────

#[test]
fn test_refresh_all_builds_dashboard_from_store() {
    let mut db = Database::open_in_memory().unwrap();
    db.save_selected_period(period()).unwrap();
    db.save_all_expenses(&[
        Expense::new(1, "2024-03-05".into(), "Transport".into(), dec!(40)),
        Expense::new(2, "2024-03-20".into(), "Food & Drinks".into(), dec!(190)),
        Expense::new(3, "2024-04-01".into(), "Transport".into(), dec!(999)),
    ])
    .unwrap();

    let mut app = logged_out();
    app.refresh_all(&mut db).unwrap();

    assert_eq!(app.expense_count, 3);
    assert_eq!(app.dashboard.total_spend, dec!(230));
    assert_eq!(app.dashboard.balance, dec!(1270));
    assert_eq!(app.dashboard.expenses.len(), 2);
    assert_eq!(app.selected_expense().map(|e| e.id), Some(2));
    assert_eq!(app.budgets, BudgetMap::defaults());
}

#[test]
fn test_refresh_all_clamps_selection() {
    let mut db = Database::open_in_memory().unwrap();
    db.save_selected_period(period()).unwrap();
    db.save_all_expenses(&[Expense::new(
        1,
        "2024-03-05".into(),
        "Transport".into(),
        dec!(40),
    )])
    .unwrap();

    let mut app = logged_out();
    app.expense_index = 5;
    app.budget_index = 50;
    app.refresh_all(&mut db).unwrap();
    assert_eq!(app.expense_index, 0);
    assert_eq!(app.budget_index, BudgetMap::defaults().len() - 1);
}

// ── Editing / errors ──────────────────────────────────────────

#[test]
fn test_begin_edit_prefills() {
    let mut app = logged_out();
    app.begin_edit(EditTarget::TotalBudget, "1500.00".into());
    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.edit_target, Some(EditTarget::TotalBudget));
    assert_eq!(app.command_input, "1500.00");
}

#[test]
fn test_absorb_validation_goes_to_status() {
    let mut app = logged_out();
    let result: Result<(), LedgerError> = Err(ValidationError::MissingField("date").into());
    assert_eq!(app.absorb(result).unwrap(), None);
    assert_eq!(app.status_message, "Please fill in the date field");
}

#[test]
fn test_absorb_storage_error_propagates() {
    let mut app = logged_out();
    let result: Result<(), LedgerError> = Err(anyhow::anyhow!("disk gone").into());
    assert!(app.absorb(result).is_err());
    assert!(app.status_message.is_empty());
}

#[test]
fn test_absorb_ok_passes_value() {
    let mut app = logged_out();
    assert_eq!(app.absorb(Ok::<_, LedgerError>(7)).unwrap(), Some(7));
}
