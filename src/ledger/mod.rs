//! User-facing mutations. Each one validates its whole input before touching
//! the store, so a rejected edit leaves persisted state as it was.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::db::{LedgerStore, PeriodStore};
use crate::error::{LedgerError, ValidationError};
use crate::models::{parse_amount, round_cents, BudgetMap, Expense, Period, DATE_FORMAT, MAX_AMOUNT};

/// Separates entries in the textual budget form.
pub(crate) const ENTRY_SEPARATOR: char = ';';

/// Parse an amount supplied by the user for `field`, within `0..=MAX_AMOUNT`.
pub(crate) fn parse_user_amount(field: &str, raw: &str) -> Result<Decimal, ValidationError> {
    let amount = parse_amount(raw).map_err(|_| ValidationError::InvalidAmount {
        field: field.to_string(),
        raw: raw.trim().to_string(),
    })?;
    check_amount_range(field, amount)?;
    Ok(amount)
}

fn check_amount_range(field: &str, amount: Decimal) -> Result<(), ValidationError> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
        });
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Timestamp-based id, bumped past the highest existing id if the clock
/// has not moved on.
pub(crate) fn next_expense_id(existing: &[Expense], now: DateTime<Utc>) -> i64 {
    let stamp = now.timestamp_millis();
    match existing.iter().map(|e| e.id).max() {
        Some(max) if max >= stamp => max + 1,
        _ => stamp,
    }
}

pub(crate) fn record_expense<S: LedgerStore>(
    store: &mut S,
    date: &str,
    category: &str,
    amount: &str,
    now: DateTime<Utc>,
) -> Result<Expense, LedgerError> {
    let (date, category, amount) = (date.trim(), category.trim(), amount.trim());
    if date.is_empty() {
        return Err(ValidationError::MissingField("date").into());
    }
    if category.is_empty() {
        return Err(ValidationError::MissingField("category").into());
    }
    if amount.is_empty() {
        return Err(ValidationError::MissingField("amount").into());
    }

    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;
    let amount = round_cents(parse_user_amount("amount", amount)?);

    let mut expenses = store.load_all_expenses()?;
    let expense = Expense::new(
        next_expense_id(&expenses, now),
        parsed.format(DATE_FORMAT).to_string(),
        category.to_string(),
        amount,
    );
    expenses.push(expense.clone());
    store.save_all_expenses(&expenses)?;

    tracing::info!(
        id = expense.id,
        date = %expense.date,
        category = %expense.category,
        %amount,
        "expense recorded"
    );
    Ok(expense)
}

/// Remove the expense with `id`. Returns `false`, writing nothing, when no
/// such expense exists.
pub(crate) fn delete_expense<S: LedgerStore>(store: &mut S, id: i64) -> Result<bool, LedgerError> {
    let mut expenses = store.load_all_expenses()?;
    let before = expenses.len();
    expenses.retain(|e| e.id != id);
    if expenses.len() == before {
        tracing::debug!(id, "delete skipped, no such expense");
        return Ok(false);
    }
    store.save_all_expenses(&expenses)?;
    tracing::info!(id, "expense deleted");
    Ok(true)
}

pub(crate) fn edit_total_budget<S: LedgerStore>(
    store: &mut S,
    raw: &str,
) -> Result<Decimal, LedgerError> {
    let amount = round_cents(parse_user_amount("total budget", raw)?);
    store.save_total_budget(amount)?;
    tracing::info!(%amount, "total budget updated");
    Ok(amount)
}

/// Parse `"Food & Drinks=200; Transport=100"` into a complete budget map.
/// The first bad entry rejects the whole input.
pub(crate) fn parse_budget_entries(input: &str) -> Result<BudgetMap, ValidationError> {
    let mut budgets = BudgetMap::new();
    for entry in input.split(ENTRY_SEPARATOR) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (name, raw) = entry
            .rsplit_once('=')
            .ok_or_else(|| ValidationError::MalformedEntry(entry.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MalformedEntry(entry.to_string()));
        }
        if budgets.contains(name) {
            return Err(ValidationError::DuplicateCategory(name.to_string()));
        }
        let limit = parse_user_amount(name, raw)?;
        budgets.insert(name.to_string(), limit);
    }
    Ok(budgets)
}

/// Inverse of [`parse_budget_entries`], used to pre-fill the editor.
pub(crate) fn format_budget_entries(budgets: &BudgetMap) -> String {
    budgets
        .iter()
        .map(|(name, limit)| format!("{name}={:.2}", limit))
        .collect::<Vec<_>>()
        .join(&format!("{ENTRY_SEPARATOR} "))
}

/// Replace the category budgets with `budgets`, which must be the complete
/// new map.
pub(crate) fn edit_budgets<S: LedgerStore>(
    store: &mut S,
    budgets: BudgetMap,
) -> Result<BudgetMap, LedgerError> {
    for (name, limit) in budgets.iter() {
        check_amount_range(name, limit)?;
    }
    let rounded: BudgetMap = budgets
        .iter()
        .map(|(name, limit)| (name.to_string(), round_cents(limit)))
        .collect();
    store.save_budgets(&rounded)?;
    tracing::info!(categories = rounded.len(), "category budgets replaced");
    Ok(rounded)
}

pub(crate) fn change_period<S: PeriodStore>(
    store: &mut S,
    period: Period,
) -> Result<Period, LedgerError> {
    store.save_selected_period(period)?;
    tracing::info!(%period, "selected period changed");
    Ok(period)
}
