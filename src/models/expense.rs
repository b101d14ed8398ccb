use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::CoercionFailure;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded expense. Never edited in place: created by
/// `ledger::record_expense`, removed by `ledger::delete_expense`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Expense {
    pub(crate) id: i64,
    /// Format: "YYYY-MM-DD"
    pub(crate) date: String,
    pub(crate) category: String,
    /// `Err` when the stored text could not be read as a number.
    pub(crate) amount: Result<Decimal, CoercionFailure>,
}

impl Expense {
    pub(crate) fn new(id: i64, date: String, category: String, amount: Decimal) -> Self {
        Self {
            id,
            date,
            category,
            amount: Ok(amount),
        }
    }

    /// The amount, if it parsed.
    pub(crate) fn spend(&self) -> Option<Decimal> {
        self.amount.as_ref().ok().copied()
    }

    pub(crate) fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Text written to storage. Unparseable amounts keep their raw text.
    pub(crate) fn amount_text(&self) -> String {
        match &self.amount {
            Ok(a) => a.to_string(),
            Err(e) => e.raw.clone(),
        }
    }
}
