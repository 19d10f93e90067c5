//! Calendar month a budget covers.

use std::str::FromStr;

use chrono::{Datelike, Month, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::BudgetError;

/// Earliest year a budget may cover.
pub const MIN_YEAR: i32 = 1;
/// Latest year a budget may cover.
pub const MAX_YEAR: i32 = 9999;

/// A year and month, stored as the first day of that month.
///
/// Ordering is calendar ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "NaiveDate", into = "NaiveDate")]
pub struct BudgetPeriod(NaiveDate);

impl BudgetPeriod {
    /// Creates the period for `year`-`month`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` for a month outside 1..=12 and `InvalidYear`
    /// for a year outside 1..=9999.
    pub fn new(year: i32, month: u32) -> Result<Self, BudgetError> {
        if !(1..=12).contains(&month) {
            return Err(BudgetError::InvalidMonth(month.to_string()));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(BudgetError::InvalidYear(year.to_string()));
        }

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| BudgetError::InvalidYear(year.to_string()))
    }

    /// Parses a year string and a month given as an English name (`"March"`,
    /// `"mar"`) or a number (`"3"`).
    ///
    /// # Errors
    ///
    /// Returns `InvalidYear` or `InvalidMonth` when either part does not parse.
    pub fn parse(year: &str, month: &str) -> Result<Self, BudgetError> {
        let year_num: i32 = year
            .trim()
            .parse()
            .map_err(|_| BudgetError::InvalidYear(year.to_string()))?;

        let month = month.trim();
        let month_num = match month.parse::<u32>() {
            Ok(number) => number,
            Err(_) => Month::from_str(month)
                .map_err(|_| BudgetError::InvalidMonth(month.to_string()))?
                .number_from_month(),
        };

        Self::new(year_num, month_num)
    }

    /// The period containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month number, 1..=12.
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// English month name, e.g. `"February"`.
    #[must_use]
    pub fn month_name(self) -> &'static str {
        u8::try_from(self.month())
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("", |m| m.name())
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Number of days in the month, leap years included.
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if NaiveDate::from_ymd_opt(self.year(), 2, 29).is_some() => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// The following month.
    ///
    /// # Errors
    ///
    /// Returns `PeriodOverflow` after December of the last supported year.
    pub fn next(self) -> Result<Self, BudgetError> {
        self.0
            .checked_add_months(Months::new(1))
            .filter(|date| date.year() <= MAX_YEAR)
            .map(Self)
            .ok_or_else(|| BudgetError::PeriodOverflow(self.to_string()))
    }

    /// The date for `day` within this month.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDay` when the month has no such day (e.g. April 31).
    pub fn date_for_day(self, day: u32) -> Result<NaiveDate, BudgetError> {
        self.0
            .with_day(day)
            .ok_or(BudgetError::InvalidDay {
                year: self.year(),
                month: self.month(),
                day,
            })
    }

    /// The date for `day` within this month, clamped to the month's last day.
    ///
    /// Day 31 in February becomes the 28th (29th in leap years).
    #[must_use]
    pub fn clamped_date(self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.days_in_month());
        self.0.with_day(day).unwrap_or(self.0)
    }

    /// Moves `date` into this month, keeping its day-of-month where possible.
    #[must_use]
    pub fn reanchor(self, date: NaiveDate) -> NaiveDate {
        self.clamped_date(date.day())
    }

    /// Returns true if `date` falls within this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::containing(date) == self
    }
}

impl From<NaiveDate> for BudgetPeriod {
    fn from(date: NaiveDate) -> Self {
        Self::containing(date)
    }
}

impl From<BudgetPeriod> for NaiveDate {
    fn from(period: BudgetPeriod) -> Self {
        period.0
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
