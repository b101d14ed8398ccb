use anyhow::Result;
use chrono::Utc;

use crate::aggregate::{build_dashboard, Dashboard};
use crate::db::{Database, LedgerStore, PeriodStore};
use crate::error::LedgerError;
use crate::ledger;
use crate::models::Period;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], db),
        "delete" | "del" => cli_delete(&args[2..], db),
        "total" => cli_total(&args[2..], db),
        "budgets" => cli_budgets(&args[2..], db),
        "period" => cli_period(&args[2..], db),
        "summary" | "s" => cli_summary(&args[2..], db),
        "list" | "ls" => cli_list(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("pocketbudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("PocketBudget - monthly expenses against a budget, stored locally");
    println!();
    println!("Usage: pocketbudget [command]");
    println!();
    println!("Commands:");
    println!("  (none)                             Launch interactive dashboard");
    println!("  add <YYYY-MM-DD> <amount> <category...>");
    println!("                                     Record an expense");
    println!("  delete <id>                        Delete an expense by id");
    println!("  total <amount>                     Set the total monthly budget");
    println!("  budgets \"<Name>=<amount>; ...\"     Replace all category budgets");
    println!("  budgets                            Show category budgets");
    println!("  period <YYYY-MM>                   Select the month to report on");
    println!("  summary [YYYY-MM]                  Print the budget summary");
    println!("  list [YYYY-MM]                     List expenses for a month");
    println!("  --help, -h                         Show this help");
    println!("  --version, -V                      Show version");
}

/// Validation failures become a plain message; storage failures keep their context.
fn reject<T>(result: std::result::Result<T, LedgerError>) -> Result<T> {
    match result {
        Ok(v) => Ok(v),
        Err(LedgerError::Invalid(e)) => anyhow::bail!("{e}"),
        Err(LedgerError::Storage(e)) => Err(e),
    }
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: pocketbudget add <YYYY-MM-DD> <amount> <category...>");
    }
    let category = args[2..].join(" ");
    let expense = reject(ledger::record_expense(
        db,
        &args[0],
        &category,
        &args[1],
        Utc::now(),
    ))?;
    println!(
        "Recorded {} for {} on {} (id {})",
        expense.spend().map(format_amount).unwrap_or_default(),
        expense.category,
        expense.date,
        expense.id
    );
    Ok(())
}

fn cli_delete(args: &[String], db: &mut Database) -> Result<()> {
    let Some(raw) = args.first() else {
        anyhow::bail!("Usage: pocketbudget delete <id>");
    };
    let id: i64 = raw
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid expense id: {raw}"))?;
    if reject(ledger::delete_expense(db, id))? {
        println!("Deleted expense {id}");
    } else {
        println!("No expense with id {id}");
    }
    Ok(())
}

fn cli_total(args: &[String], db: &mut Database) -> Result<()> {
    let Some(raw) = args.first() else {
        println!("Total budget: {}", format_amount(db.load_total_budget()?));
        return Ok(());
    };
    let amount = reject(ledger::edit_total_budget(db, raw))?;
    println!("Total budget has been updated to {}", format_amount(amount));
    Ok(())
}

fn cli_budgets(args: &[String], db: &mut Database) -> Result<()> {
    if args.is_empty() {
        let budgets = db.load_budgets()?;
        if budgets.is_empty() {
            println!("No category budgets");
        }
        for (name, limit) in budgets.iter() {
            println!("  {name:<24} {:>14}", format_amount(limit));
        }
        return Ok(());
    }

    let input = args.join(" ");
    let budgets = reject(ledger::parse_budget_entries(&input).map_err(Into::into))?;
    let saved = reject(ledger::edit_budgets(db, budgets))?;
    println!("Budget changes saved ({} categories)", saved.len());
    Ok(())
}

fn cli_period(args: &[String], db: &mut Database) -> Result<()> {
    let Some(raw) = args.first() else {
        let period = db.load_selected_period()?;
        println!("Selected period: {} ({period})", period.label());
        return Ok(());
    };
    let period = reject(Period::parse_selection(raw).map_err(Into::into))?;
    reject(ledger::change_period(db, period))?;
    println!("Showing {}", period.label());
    Ok(())
}

/// The period named on the command line, or the saved one.
fn resolve_period(args: &[String], db: &mut Database) -> Result<Period> {
    match args.first().filter(|a| !a.starts_with('-')) {
        Some(raw) => reject(Period::parse_selection(raw).map_err(Into::into)),
        None => db.load_selected_period(),
    }
}

fn load_dashboard(args: &[String], db: &mut Database) -> Result<Dashboard> {
    let period = resolve_period(args, db)?;
    let ledger = db.load_all_expenses()?;
    let budgets = db.load_budgets()?;
    let total_budget = db.load_total_budget()?;
    Ok(build_dashboard(&ledger, &budgets, total_budget, period))
}

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let d = load_dashboard(args, db)?;

    println!("PocketBudget, {}", d.period.label());
    println!("{}", "─".repeat(56));
    println!("  Total Budget:  {}", format_amount(d.total_budget));
    println!("  Total Spend:   {}", format_amount(d.total_spend));
    println!(
        "  Balance:       {}{}",
        format_amount(d.balance),
        if d.is_overspent() { "  (overspent)" } else { "" }
    );
    println!("  Expenses:      {}", d.expenses.len());

    if !d.tracker.is_empty() {
        println!();
        println!("Budget Tracker:");
        println!(
            "  {:<20} {:>14} {:>14} {:>14}  Status",
            "Category", "Budget", "Spent", "Remaining"
        );
        for row in &d.tracker {
            println!(
                "  {:<20} {:>14} {:>14} {:>14}  {}",
                row.category,
                format_amount(row.budget),
                format_amount(row.spent),
                format_amount(row.remaining),
                row.status
            );
        }
    }

    let unbudgeted: Vec<_> = d
        .by_category
        .iter()
        .filter(|(name, _)| !d.tracker.iter().any(|r| &r.category == *name))
        .collect();
    if !unbudgeted.is_empty() {
        println!();
        println!("Spending without a budget:");
        for (name, amount) in unbudgeted {
            println!("  {name:<20} {:>14}", format_amount(*amount));
        }
    }

    Ok(())
}

fn cli_list(args: &[String], db: &mut Database) -> Result<()> {
    let d = load_dashboard(args, db)?;
    if d.expenses.is_empty() {
        println!("No expenses recorded for {}", d.period.label());
        return Ok(());
    }

    println!(
        "{:<15} {:<12} {:<24} {:>14}",
        "ID", "Date", "Category", "Amount"
    );
    println!("{}", "─".repeat(68));
    for e in &d.expenses {
        let amount = e
            .spend()
            .map(format_amount)
            .unwrap_or_else(|| format!("? {}", e.amount_text()));
        println!("{:<15} {:<12} {:<24} {:>14}", e.id, e.date, e.category, amount);
    }
    Ok(())
}
