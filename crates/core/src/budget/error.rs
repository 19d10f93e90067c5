//! Budget validation errors.

use shelf_shared::Amount;
use thiserror::Error;

/// Errors raised by budget domain rules, before anything touches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Month outside 1..=12 or an unknown month name.
    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    /// Year that cannot be represented as a budget period.
    #[error("Invalid year: {0}")]
    InvalidYear(String),

    /// Day that does not exist in the budget's month.
    #[error("Day {day} does not exist in {year}-{month:02}")]
    InvalidDay {
        /// Budget year.
        year: i32,
        /// Budget month.
        month: u32,
        /// Requested day of month.
        day: u32,
    },

    /// Category label is empty after trimming.
    #[error("Label must not be empty")]
    EmptyLabel,

    /// Text field exceeds its maximum length.
    #[error("{field} exceeds {max} characters")]
    FieldTooLong {
        /// Field name.
        field: &'static str,
        /// Maximum number of characters.
        max: usize,
    },

    /// Planned amount is negative.
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    /// Amount magnitude exceeds the accepted maximum.
    #[error("{field} must not exceed {max} in magnitude")]
    AmountTooLarge {
        /// Field name.
        field: &'static str,
        /// Largest accepted magnitude.
        max: Amount,
    },

    /// The month after the period cannot be represented.
    #[error("No month after {0}")]
    PeriodOverflow(String),
}
