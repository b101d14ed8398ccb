use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{Datelike, Local, Utc};

use super::app::{App, EditTarget, InputMode, PendingAction, Screen};
use crate::db::{Database, LedgerStore};
use crate::ledger;
use crate::models::Period;
use crate::ui::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit PocketBudget", cmd_quit, r);
    register_command!("quit", "Quit PocketBudget", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Record expense (e.g. :add 2024-03-05 12.50 Food & Drinks)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Record expense (e.g. :a 2024-03-05 12.50 Transport)",
        cmd_add,
        r
    );
    register_command!(
        "delete",
        "Delete selected expense, or by id (e.g. :delete 1709600000000)",
        cmd_delete,
        r
    );
    register_command!(
        "total",
        "Edit total budget (e.g. :total 1500)",
        cmd_total,
        r
    );
    register_command!(
        "edit-budgets",
        "Replace all category budgets (e.g. :edit-budgets Food=200; Rent=500)",
        cmd_edit_budgets,
        r
    );
    register_command!(
        "eb",
        "Replace all category budgets",
        cmd_edit_budgets,
        r
    );
    register_command!(
        "period",
        "Select month (e.g. :period 2024-03 or :period 3)",
        cmd_period,
        r
    );
    register_command!("p", "Select month (e.g. :p 2024-03)", cmd_period, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("logout", "Return to the login screen", cmd_logout, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

/// Apply the editor line to whatever it was opened for.
pub(crate) fn submit_edit(app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let input = std::mem::take(&mut app.command_input);
    app.input_mode = InputMode::Normal;
    match app.edit_target.take() {
        Some(EditTarget::TotalBudget) => apply_total(&input, app, db),
        Some(EditTarget::Budgets) => apply_budgets(&input, app, db),
        None => Ok(()),
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1)
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_all(db)
}

fn cmd_expenses(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh_all(db)
}

fn cmd_budgets(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    app.refresh_all(db)
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_logout(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.logout();
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    // <date> <amount> <category...>
    let mut parts = args.splitn(3, ' ');
    let date = parts.next().unwrap_or("");
    let amount = parts.next().unwrap_or("");
    let category = parts.next().unwrap_or("");

    let result = ledger::record_expense(db, date, category, amount, Utc::now());
    if let Some(expense) = app.absorb(result)? {
        app.refresh_all(db)?;
        let amount = expense.spend().map(format_amount).unwrap_or_default();
        let in_view = expense.parsed_date().is_some_and(|d| app.period.contains(d));
        let budgeted = app.budgets.categories().any(|c| c == expense.category);
        let note = if !in_view {
            format!(" (outside {})", app.period.label())
        } else if !budgeted {
            " (no budget for this category)".to_string()
        } else {
            String::new()
        };
        app.set_status(format!(
            "Recorded {amount} for {}{note}",
            expense.category
        ));
    }
    Ok(())
}

fn cmd_delete(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if !args.is_empty() {
        let Ok(id) = args.parse::<i64>() else {
            app.set_status(format!("Invalid expense id: {args}"));
            return Ok(());
        };
        let deleted = ledger::delete_expense(db, id);
        if let Some(deleted) = app.absorb(deleted)? {
            app.refresh_all(db)?;
            app.set_status(if deleted {
                format!("Deleted expense {id}")
            } else {
                format!("No expense with id {id}")
            });
        }
        return Ok(());
    }

    if app.screen != Screen::Expenses || app.dashboard.expenses.is_empty() {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    }

    if let Some(expense) = app.selected_expense() {
        let amount = expense
            .spend()
            .map(format_amount)
            .unwrap_or_else(|| expense.amount_text());
        let label = format!("{} {} on {}", amount, expense.category, expense.date);
        let id = expense.id;
        app.confirm_message = format!("Delete {label}?");
        app.pending_action = Some(PendingAction::DeleteExpense { id, label });
        app.input_mode = InputMode::Confirm;
    }

    Ok(())
}

fn cmd_total(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        let current = db.load_total_budget()?;
        app.begin_edit(EditTarget::TotalBudget, format!("{current:.2}"));
        return Ok(());
    }
    apply_total(args, app, db)
}

fn cmd_edit_budgets(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        let current = db.load_budgets()?;
        app.begin_edit(EditTarget::Budgets, ledger::format_budget_entries(&current));
        return Ok(());
    }
    apply_budgets(args, app, db)
}

fn cmd_period(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let this_year = Local::now().year();
    if args.is_empty() {
        let years = Period::picker_years(this_year);
        let (newest, oldest) = (years.first(), years.last());
        app.set_status(format!(
            "Showing {}. Use :period YYYY-MM ({}-{}) or :period <month>",
            app.period.label(),
            oldest.unwrap_or(&this_year),
            newest.unwrap_or(&this_year),
        ));
        return Ok(());
    }

    let parsed = Period::parse_selection(args).map_err(Into::into);
    if let Some(period) = app.absorb(parsed)? {
        select_period(app, db, period)?;
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let next = app.period.next();
    select_period(app, db, next)
}

fn cmd_prev_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let prev = app.period.prev();
    select_period(app, db, prev)
}

// ── Shared helpers ───────────────────────────────────────────

fn apply_total(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let result = ledger::edit_total_budget(db, input);
    if let Some(amount) = app.absorb(result)? {
        app.refresh_all(db)?;
        app.set_status(format!(
            "Total budget has been updated to {}",
            format_amount(amount)
        ));
    }
    Ok(())
}

fn apply_budgets(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let parsed = ledger::parse_budget_entries(input).map_err(Into::into);
    let Some(budgets) = app.absorb(parsed)? else {
        return Ok(());
    };
    let result = ledger::edit_budgets(db, budgets);
    if let Some(saved) = app.absorb(result)? {
        app.refresh_all(db)?;
        app.screen = Screen::Budgets;
        app.set_status(format!(
            "Budget changes saved ({} categories)",
            saved.len()
        ));
    }
    Ok(())
}

fn select_period(app: &mut App, db: &mut Database, period: Period) -> anyhow::Result<()> {
    let result = ledger::change_period(db, period);
    if let Some(period) = app.absorb(result)? {
        app.expense_index = 0;
        app.expense_scroll = 0;
        app.refresh_all(db)?;
        app.set_status(format!("Showing {}", period.label()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
