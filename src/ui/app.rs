use anyhow::Result;
use rust_decimal::Decimal;

use crate::aggregate::{build_dashboard, Dashboard};
use crate::db::{Database, LedgerStore, PeriodStore};
use crate::error::LedgerError;
use crate::models::{BudgetMap, Expense, Period};

/// Fixed pair checked before the dashboard opens. This only gates
/// navigation; the data file is not protected by it.
pub(crate) const LOGIN_USERNAME: &str = "student";
pub(crate) const LOGIN_PASSWORD: &str = "123";

pub(crate) fn credentials_match(username: &str, password: &str) -> bool {
    username.trim() == LOGIN_USERNAME && password.trim() == LOGIN_PASSWORD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Login,
    Dashboard,
    Expenses,
    Budgets,
}

impl Screen {
    /// Screens reachable from the tab bar once logged in.
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses, Self::Budgets]
    }

    /// The tab `step` places along, wrapping at either end. Login has no neighbours.
    pub(crate) fn cycle(self, step: isize) -> Screen {
        let tabs = Self::all();
        match tabs.iter().position(|s| *s == self) {
            Some(i) => tabs[(i as isize + step).rem_euclid(tabs.len() as isize) as usize],
            None => self,
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "Login"),
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Budgets => write!(f, "Budgets"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// What the editor line is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditTarget {
    TotalBudget,
    Budgets,
}

impl EditTarget {
    pub(crate) fn prompt(&self) -> &'static str {
        match self {
            Self::TotalBudget => "total> ",
            Self::Budgets => "budgets> ",
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, label: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoginField {
    Username,
    Password,
}

impl LoginField {
    pub(crate) fn other(self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Username,
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Login
    pub(crate) login_username: String,
    pub(crate) login_password: String,
    pub(crate) login_field: LoginField,
    pub(crate) login_failed: bool,

    // Dashboard data, recomputed in full after every change
    pub(crate) period: Period,
    pub(crate) dashboard: Dashboard,
    pub(crate) budgets: BudgetMap,
    pub(crate) expense_count: i64,

    // Expenses list
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Budgets list
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Editing / confirmation
    pub(crate) edit_target: Option<EditTarget>,
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(period: Period) -> Self {
        Self {
            running: true,
            screen: Screen::Login,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            login_username: String::new(),
            login_password: String::new(),
            login_field: LoginField::Username,
            login_failed: false,

            period,
            dashboard: build_dashboard(&[], &BudgetMap::new(), Decimal::ZERO, period),
            budgets: BudgetMap::new(),
            expense_count: 0,

            expense_index: 0,
            expense_scroll: 0,

            budget_index: 0,
            budget_scroll: 0,

            edit_target: None,
            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Reload everything from the store and rebuild every view.
    pub(crate) fn refresh_all(&mut self, db: &mut Database) -> Result<()> {
        self.period = db.load_selected_period()?;
        let ledger = db.load_all_expenses()?;
        self.budgets = db.load_budgets()?;
        let total_budget = db.load_total_budget()?;
        self.expense_count = db.get_expense_count()?;
        self.dashboard = build_dashboard(&ledger, &self.budgets, total_budget, self.period);

        let len = self.dashboard.expenses.len();
        if self.expense_index >= len {
            self.expense_index = len.saturating_sub(1);
        }
        if self.budget_index >= self.dashboard.tracker.len() {
            self.budget_index = self.dashboard.tracker.len().saturating_sub(1);
        }
        Ok(())
    }

    /// Cursor, scroll offset and length of the list on screen, if it has one.
    pub(crate) fn list_cursor(&mut self) -> Option<(&mut usize, &mut usize, usize)> {
        match self.screen {
            Screen::Expenses => Some((
                &mut self.expense_index,
                &mut self.expense_scroll,
                self.dashboard.expenses.len(),
            )),
            Screen::Budgets => Some((
                &mut self.budget_index,
                &mut self.budget_scroll,
                self.dashboard.tracker.len(),
            )),
            Screen::Login | Screen::Dashboard => None,
        }
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.dashboard.expenses.get(self.expense_index)
    }

    pub(crate) fn submit_login(&mut self) -> bool {
        if credentials_match(&self.login_username, &self.login_password) {
            self.login_failed = false;
            self.login_password.clear();
            self.screen = Screen::Dashboard;
            self.set_status(format!("Welcome, {}", self.login_username.trim()));
            tracing::info!("dashboard unlocked");
            true
        } else {
            self.login_failed = true;
            self.login_password.clear();
            self.login_field = LoginField::Password;
            false
        }
    }

    pub(crate) fn logout(&mut self) {
        self.screen = Screen::Login;
        self.input_mode = InputMode::Normal;
        self.login_username.clear();
        self.login_password.clear();
        self.login_field = LoginField::Username;
        self.login_failed = false;
        self.status_message.clear();
    }

    pub(crate) fn begin_edit(&mut self, target: EditTarget, prefill: String) {
        self.edit_target = Some(target);
        self.command_input = prefill;
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Show validation failures on the status line; pass storage failures up.
    pub(crate) fn absorb<T>(&mut self, result: Result<T, LedgerError>) -> Result<Option<T>> {
        match result {
            Ok(v) => Ok(Some(v)),
            Err(LedgerError::Invalid(e)) => {
                self.set_status(e.to_string());
                Ok(None)
            }
            Err(LedgerError::Storage(e)) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
