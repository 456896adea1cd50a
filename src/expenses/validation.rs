//! Form field validation
//!
//! Runs before any store call. Every problem is reported, not just the first.

use chrono::NaiveDate;
use thiserror::Error;

use super::model::{Amount, ExpenseDraft};

pub const LABEL_EMPTY: &str = "Label cannot be empty";
pub const AMOUNT_NOT_NUMBER: &str = "Amount must be a valid number";
pub const AMOUNT_NOT_POSITIVE: &str = "Amount must be positive";
pub const AMOUNT_TOO_LARGE: &str = "Amount is too large";
pub const DATE_INVALID: &str = "Invalid date format (expected YYYY-MM-DD)";

/// Date format accepted in the date field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One or more rejected fields, as human-readable messages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.join("\n"))]
pub struct ValidationErrors(Vec<&'static str>);

impl ValidationErrors {
    pub fn messages(&self) -> &[&'static str] {
        &self.0
    }
}

/// Check raw form input and turn it into a draft.
///
/// The label is trimmed and the amount rounded to cents. The date must be
/// exactly `YYYY-MM-DD`.
pub fn validate_fields(label: &str, amount: &str, date: &str) -> Result<ExpenseDraft, ValidationErrors> {
    let mut errors = Vec::new();

    let label = label.trim();
    if label.is_empty() {
        errors.push(LABEL_EMPTY);
    }

    let amount = match parse_amount(amount) {
        Ok(amount) => Some(amount),
        Err(message) => {
            errors.push(message);
            None
        }
    };

    let date = match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(DATE_INVALID);
            None
        }
    };

    match (amount, date) {
        (Some(amount), Some(date)) if errors.is_empty() => Ok(ExpenseDraft {
            label: label.to_string(),
            amount,
            date,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

fn parse_amount(raw: &str) -> Result<Amount, &'static str> {
    let value: f64 = raw.trim().parse().map_err(|_| AMOUNT_NOT_NUMBER)?;
    if !value.is_finite() {
        return Err(AMOUNT_NOT_NUMBER);
    }
    if value <= 0.0 {
        return Err(AMOUNT_NOT_POSITIVE);
    }
    let cents = (value * 100.0).round();
    if cents > Amount::MAX.cents() as f64 {
        return Err(AMOUNT_TOO_LARGE);
    }
    if cents < 1.0 {
        // Rounds to 0.00 in the column
        return Err(AMOUNT_NOT_POSITIVE);
    }
    Ok(Amount::from_cents(cents as i64))
}
