pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS expenses (
    id        INTEGER PRIMARY KEY,
    date      TEXT NOT NULL,
    category  TEXT NOT NULL,
    amount    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);

CREATE TABLE IF NOT EXISTS category_budgets (
    position      INTEGER PRIMARY KEY,
    name          TEXT NOT NULL UNIQUE,
    limit_amount  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS settings (
    key    TEXT PRIMARY KEY,
    value  TEXT NOT NULL
);

"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];

pub(crate) const KEY_TOTAL_BUDGET: &str = "total_budget";
pub(crate) const KEY_SELECTED_MONTH: &str = "selected_month";
pub(crate) const KEY_SELECTED_YEAR: &str = "selected_year";
/// Set once the category budgets have been written at least once, so an
/// emptied map is not mistaken for a fresh database.
pub(crate) const KEY_BUDGETS_SAVED: &str = "budgets_saved";
