//! Input rules shared by every create and edit operation.

use shelf_shared::Amount;

use super::error::BudgetError;

/// Maximum length of a category label.
pub const LABEL_MAX_LEN: usize = 100;
/// Maximum length of a transaction source.
pub const SOURCE_MAX_LEN: usize = 100;
/// Maximum length of a transaction description.
pub const DESCRIPTION_MAX_LEN: usize = 200;
/// Largest magnitude any single amount may have (100 billion major units).
///
/// Keeps every stored figure far enough from the `i64` bounds that budget
/// totals stay exact.
pub const AMOUNT_MAX: Amount = Amount::from_minor(10_000_000_000_000);

/// Trims a category label and checks it is non-empty and short enough.
pub fn validate_label(label: &str) -> Result<String, BudgetError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(BudgetError::EmptyLabel);
    }
    validate_length("label", trimmed, LABEL_MAX_LEN)?;
    Ok(trimmed.to_string())
}

/// Checks a free-text field against its maximum length (in characters).
pub fn validate_length(field: &'static str, value: &str, max: usize) -> Result<(), BudgetError> {
    if value.chars().count() > max {
        return Err(BudgetError::FieldTooLong { field, max });
    }
    Ok(())
}

/// Rejects amounts whose magnitude exceeds [`AMOUNT_MAX`].
pub fn validate_amount(field: &'static str, amount: Amount) -> Result<(), BudgetError> {
    if amount.saturating_abs() > AMOUNT_MAX {
        return Err(BudgetError::AmountTooLarge {
            field,
            max: AMOUNT_MAX,
        });
    }
    Ok(())
}

/// Rejects negative or oversized planned amounts (income, monthly category amount).
pub fn validate_planned_amount(field: &'static str, amount: Amount) -> Result<(), BudgetError> {
    if amount.is_negative() {
        return Err(BudgetError::NegativeAmount(field));
    }
    validate_amount(field, amount)
}
