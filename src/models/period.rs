use chrono::{Datelike, Local, NaiveDate};

use crate::error::ValidationError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// How many years back the period picker reaches from the current year.
pub(crate) const PICKER_YEARS_BACK: i32 = 5;

/// A calendar (month, year) pair scoping which expenses count as current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub(crate) fn new(month: u32, year: i32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    pub(crate) fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub(crate) fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub(crate) fn month(&self) -> u32 {
        self.month
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub(crate) fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub(crate) fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub(crate) fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// e.g. "March 2024"
    pub(crate) fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    /// Parse a user selection against today's year. See [`Period::parse`].
    pub(crate) fn parse_selection(input: &str) -> Result<Self, ValidationError> {
        Self::parse(input, Local::now().year())
    }

    /// Parse "YYYY-MM", or a bare month number ("3", "03") taken in
    /// `current_year`. The year must be one the picker offers.
    pub(crate) fn parse(input: &str, current_year: i32) -> Result<Self, ValidationError> {
        let input = input.trim();
        let invalid = || ValidationError::InvalidPeriod(input.to_string());

        let (year, month) = match input.split_once('-') {
            Some((year, month)) if year.len() == 4 => (
                year.parse::<i32>().map_err(|_| invalid())?,
                month.parse::<u32>().map_err(|_| invalid())?,
            ),
            None if input.len() <= 2 => (current_year, input.parse().map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };

        let oldest = current_year - PICKER_YEARS_BACK;
        if !(oldest..=current_year).contains(&year) {
            return Err(ValidationError::YearOutOfRange {
                year,
                oldest,
                newest: current_year,
            });
        }
        Self::new(month, year)
    }

    /// Years offered by the period picker, newest first.
    pub(crate) fn picker_years(current_year: i32) -> Vec<i32> {
        (current_year - PICKER_YEARS_BACK..=current_year)
            .rev()
            .collect()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
