//! Period-scoped aggregation over the expense ledger.
//!
//! Everything here is pure: callers load the ledger, budgets and period from
//! a store and pass them in. Amounts that failed to parse contribute nothing
//! to any sum, and neither does an amount that would overflow one.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{BudgetMap, Expense, Period};

/// Label used for the chart when a period has no spending.
pub(crate) const NO_EXPENSES_LABEL: &str = "No Expenses Recorded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BudgetStatus {
    Overspending,
    Critical,
    Moderate,
    Normal,
}

impl BudgetStatus {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Overspending => "OVERSPENDING",
            Self::Critical => "CRITICAL",
            Self::Moderate => "MODERATE",
            Self::Normal => "NORMAL",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StatusReading {
    pub(crate) status: BudgetStatus,
    pub(crate) remaining: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) total_spend: Decimal,
}

/// One row of the budget tracker table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetRow {
    pub(crate) category: String,
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) status: BudgetStatus,
}

impl BudgetRow {
    pub(crate) fn is_over(&self) -> bool {
        self.spent > self.budget
    }
}

/// Everything the dashboard shows for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Dashboard {
    pub(crate) period: Period,
    pub(crate) total_budget: Decimal,
    pub(crate) total_spend: Decimal,
    pub(crate) balance: Decimal,
    pub(crate) by_category: BTreeMap<String, Decimal>,
    /// Period expenses, newest first.
    pub(crate) expenses: Vec<Expense>,
    pub(crate) tracker: Vec<BudgetRow>,
}

impl Dashboard {
    pub(crate) fn is_overspent(&self) -> bool {
        self.balance < Decimal::ZERO
    }

    /// Chart series. A single placeholder slice stands in for an empty period.
    pub(crate) fn chart_data(&self) -> Vec<(String, Decimal)> {
        if self.by_category.is_empty() {
            return vec![(NO_EXPENSES_LABEL.to_string(), Decimal::ONE)];
        }
        self.by_category
            .iter()
            .map(|(name, amt)| (name.clone(), *amt))
            .collect()
    }
}

/// Expenses dated within `period`. Records whose date does not parse belong
/// to no period.
pub(crate) fn filter_by_period(expenses: &[Expense], period: Period) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|e| e.parsed_date().is_some_and(|d| period.contains(d)))
        .collect()
}

pub(crate) fn summarize<'a, I>(expenses: I) -> Summary
where
    I: IntoIterator<Item = &'a Expense>,
{
    Summary {
        total_spend: expenses.into_iter().fold(Decimal::ZERO, accumulate),
    }
}

/// Add the expense's spend to `total`, leaving `total` unchanged on overflow.
fn accumulate(total: Decimal, expense: &Expense) -> Decimal {
    let Some(amount) = expense.spend() else {
        return total;
    };
    total.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!(id = expense.id, %amount, "amount left out, sum would overflow");
        total
    })
}

/// Negative when the period is overspent.
pub(crate) fn compute_balance(total_budget: Decimal, total_spend: Decimal) -> Decimal {
    total_budget.saturating_sub(total_spend)
}

/// Spend per category, including categories with no configured budget.
pub(crate) fn group_by_category<'a, I>(expenses: I) -> BTreeMap<String, Decimal>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for expense in expenses.into_iter().filter(|e| e.spend().is_some()) {
        let total = totals.entry(expense.category.clone()).or_default();
        *total = accumulate(*total, expense);
    }
    totals
}

/// Tiers are checked in order and the first match wins, so a remaining
/// amount sitting exactly on a threshold falls into the next tier down.
pub(crate) fn classify_budget_status(budget: Decimal, spent: Decimal) -> StatusReading {
    let remaining = budget.saturating_sub(spent);
    let status = if remaining < Decimal::ZERO {
        BudgetStatus::Overspending
    } else if remaining < budget * Decimal::new(10, 2) {
        BudgetStatus::Critical
    } else if remaining < budget * Decimal::new(50, 2) {
        BudgetStatus::Moderate
    } else {
        BudgetStatus::Normal
    };
    StatusReading { status, remaining }
}

/// One row per budgeted category, in budget order. Spend in categories
/// without a budget is left out here.
pub(crate) fn build_budget_tracker_report<'a, I>(budgets: &BudgetMap, expenses: I) -> Vec<BudgetRow>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let spending = group_by_category(expenses);
    budgets
        .iter()
        .map(|(category, budget)| {
            let spent = spending.get(category).copied().unwrap_or(Decimal::ZERO);
            let reading = classify_budget_status(budget, spent);
            BudgetRow {
                category: category.to_string(),
                budget,
                spent,
                remaining: reading.remaining,
                status: reading.status,
            }
        })
        .collect()
}

pub(crate) fn build_dashboard(
    ledger: &[Expense],
    budgets: &BudgetMap,
    total_budget: Decimal,
    period: Period,
) -> Dashboard {
    let in_period = filter_by_period(ledger, period);
    let total_spend = summarize(in_period.iter().copied()).total_spend;

    let mut expenses: Vec<Expense> = in_period.iter().map(|e| (*e).clone()).collect();
    expenses.sort_by(|a, b| {
        b.parsed_date()
            .cmp(&a.parsed_date())
            .then_with(|| b.id.cmp(&a.id))
    });

    Dashboard {
        period,
        total_budget,
        total_spend,
        balance: compute_balance(total_budget, total_spend),
        by_category: group_by_category(in_period.iter().copied()),
        tracker: build_budget_tracker_report(budgets, in_period.iter().copied()),
        expenses,
    }
}

#[cfg(test)]
mod tests;
