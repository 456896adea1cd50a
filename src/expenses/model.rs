//! Expense records

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed-point money amount with two decimals, stored as cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);
    /// Largest value of a `DECIMAL(10, 2)` column
    pub const MAX: Amount = Amount(99_999_999_99);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Amount::saturating_add)
    }
}

/// A stored expense row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u32,
    pub label: String,
    pub amount: Amount,
    pub date: NaiveDate,
}

/// Validated field values, ready to insert or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub label: String,
    pub amount: Amount,
    pub date: NaiveDate,
}

impl ExpenseDraft {
    pub(crate) fn into_expense(self, id: u32) -> Expense {
        Expense {
            id,
            label: self.label,
            amount: self.amount,
            date: self.date,
        }
    }
}
