mod amount;
mod budget;
mod expense;
mod period;

pub(crate) use amount::{parse_amount, round_cents, MAX_AMOUNT};
pub(crate) use budget::BudgetMap;
pub(crate) use expense::{Expense, DATE_FORMAT};
pub(crate) use period::Period;
