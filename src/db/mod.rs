mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::Path;

use crate::models::*;

/// Default overall monthly ceiling when none has been saved.
pub(crate) const DEFAULT_TOTAL_BUDGET: Decimal = Decimal::from_parts(150000, 0, 0, false, 2);

/// Durable ledger, category budgets and total budget.
/// Every save replaces the stored value wholesale.
pub(crate) trait LedgerStore {
    fn load_all_expenses(&self) -> Result<Vec<Expense>>;
    fn save_all_expenses(&mut self, expenses: &[Expense]) -> Result<()>;
    fn load_budgets(&self) -> Result<BudgetMap>;
    fn save_budgets(&mut self, budgets: &BudgetMap) -> Result<()>;
    fn load_total_budget(&self) -> Result<Decimal>;
    fn save_total_budget(&mut self, amount: Decimal) -> Result<()>;
}

/// Durable (month, year) the dashboard is scoped to.
pub(crate) trait PeriodStore {
    /// The saved period, if one has been saved and is readable.
    fn stored_period(&self) -> Result<Option<Period>>;
    fn save_selected_period(&mut self, period: Period) -> Result<()>;

    /// Saved period, or the current month persisted on first read.
    fn load_selected_period(&mut self) -> Result<Period> {
        if let Some(period) = self.stored_period()? {
            return Ok(period);
        }
        let period = Period::current();
        self.save_selected_period(period)?;
        tracing::info!(%period, "initialised selected period");
        Ok(period)
    }
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Settings ──────────────────────────────────────────────

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    pub(crate) fn get_expense_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }
}

impl LedgerStore for Database {
    fn load_all_expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, date, category, amount FROM expenses ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            let amount_str: String = row.get(3)?;
            Ok(Expense {
                id: row.get(0)?,
                date: row.get(1)?,
                category: row.get(2)?,
                amount: parse_amount(&amount_str),
            })
        })?;
        let expenses = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        for e in expenses.iter().filter(|e| e.amount.is_err()) {
            tracing::warn!(id = e.id, raw = %e.amount_text(), "stored amount is not a number");
        }
        Ok(expenses)
    }

    fn save_all_expenses(&mut self, expenses: &[Expense]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM expenses", [])?;
        for e in expenses {
            let amount = match &e.amount {
                Ok(a) => round_cents(*a).to_string(),
                Err(failure) => failure.raw.clone(),
            };
            tx.execute(
                "INSERT INTO expenses (id, date, category, amount) VALUES (?1, ?2, ?3, ?4)",
                params![e.id, e.date, e.category, amount],
            )
            .with_context(|| format!("Failed to save expense {}", e.id))?;
        }
        tx.commit()?;
        Ok(())
    }

    fn load_budgets(&self) -> Result<BudgetMap> {
        if self.get_setting(schema::KEY_BUDGETS_SAVED)?.is_none() {
            return Ok(BudgetMap::defaults());
        }
        let mut stmt = self
            .conn
            .prepare("SELECT name, limit_amount FROM category_budgets ORDER BY position")?;
        let rows = stmt.query_map([], |row| {
            let name: String = row.get(0)?;
            let amt_str: String = row.get(1)?;
            Ok((name, amt_str))
        })?;

        let mut budgets = BudgetMap::new();
        for row in rows {
            let (name, amt_str) = row?;
            match parse_amount(&amt_str) {
                Ok(limit) => budgets.insert(name, limit),
                Err(e) => tracing::warn!(category = %name, "skipping budget: {e}"),
            }
        }
        Ok(budgets)
    }

    fn save_budgets(&mut self, budgets: &BudgetMap) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM category_budgets", [])?;
        for (position, (name, limit)) in budgets.iter().enumerate() {
            tx.execute(
                "INSERT INTO category_budgets (position, name, limit_amount) VALUES (?1, ?2, ?3)",
                params![position as i64, name, round_cents(limit).to_string()],
            )?;
        }
        tx.execute(
            "INSERT INTO settings (key, value) VALUES (?1, '1')
             ON CONFLICT(key) DO NOTHING",
            params![schema::KEY_BUDGETS_SAVED],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn load_total_budget(&self) -> Result<Decimal> {
        let Some(raw) = self.get_setting(schema::KEY_TOTAL_BUDGET)? else {
            return Ok(DEFAULT_TOTAL_BUDGET);
        };
        match parse_amount(&raw) {
            Ok(total) => Ok(total),
            Err(e) => {
                tracing::warn!("stored total budget unreadable, using default: {e}");
                Ok(DEFAULT_TOTAL_BUDGET)
            }
        }
    }

    fn save_total_budget(&mut self, amount: Decimal) -> Result<()> {
        self.set_setting(schema::KEY_TOTAL_BUDGET, &round_cents(amount).to_string())
    }
}

impl PeriodStore for Database {
    fn stored_period(&self) -> Result<Option<Period>> {
        let month = self
            .get_setting(schema::KEY_SELECTED_MONTH)?
            .and_then(|m| m.parse::<u32>().ok());
        let year = self
            .get_setting(schema::KEY_SELECTED_YEAR)?
            .and_then(|y| y.parse::<i32>().ok());
        Ok(match (month, year) {
            (Some(month), Some(year)) => Period::new(month, year).ok(),
            _ => None,
        })
    }

    fn save_selected_period(&mut self, period: Period) -> Result<()> {
        let tx = self.conn.transaction()?;
        for (key, value) in [
            (schema::KEY_SELECTED_MONTH, period.month().to_string()),
            (schema::KEY_SELECTED_YEAR, period.year().to_string()),
        ] {
            tx.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
