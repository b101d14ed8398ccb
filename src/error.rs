use thiserror::Error;

/// A user-supplied field was missing or malformed. The operation that raised
/// it has not touched persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid amount for {field}: '{raw}'")]
    InvalidAmount { field: String, raw: String },
    #[error("Amount for {field} cannot be negative")]
    NegativeAmount { field: String },
    #[error("Amount for {field} cannot exceed 999,999,999,999.99")]
    AmountTooLarge { field: String },
    #[error("Invalid budget entry '{0}', expected <category>=<amount>")]
    MalformedEntry(String),
    #[error("Duplicate budget category '{0}'")]
    DuplicateCategory(String),
    #[error("Invalid month {0}, expected 1-12")]
    InvalidMonth(u32),
    #[error("Invalid period '{0}', expected YYYY-MM")]
    InvalidPeriod(String),
    #[error("Year {year} is outside {oldest}-{newest}")]
    YearOutOfRange { year: i32, oldest: i32, newest: i32 },
}

/// A stored amount that does not read as a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{raw}' is not a number")]
pub(crate) struct CoercionFailure {
    pub(crate) raw: String,
}

#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
