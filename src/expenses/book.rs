//! Expense book: the form-level service used by any frontend
//!
//! Wraps a store with the current row selection and search filter. Field
//! validation always happens before the store is touched.

use std::io::Write;

use thiserror::Error;

use super::export::write_csv;
use super::model::{Amount, Expense};
use super::store::{ExpenseStore, StoreError};
use super::validation::{ValidationErrors, validate_fields};

#[derive(Debug, Error)]
pub enum BookError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("Please select an expense.")]
    SelectionRequired,
    #[error("No expense with id {0}")]
    NotFound(u32),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Form state over an expense store
#[derive(Debug)]
pub struct ExpenseBook<S> {
    store: S,
    selected: Option<u32>,
    search: String,
}

impl<S: ExpenseStore> ExpenseBook<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            selected: None,
            search: String::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Id of the selected row, if any
    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Validate and insert a new expense
    pub fn add(&mut self, label: &str, amount: &str, date: &str) -> Result<Expense, BookError> {
        let draft = validate_fields(label, amount, date)?;
        let expense = self.store.add(draft)?;
        self.selected = None;
        log::info!("Added expense {} ({} on {})", expense.id, expense.amount, expense.date);
        Ok(expense)
    }

    /// Select a row; the returned record fills the form fields
    pub fn select(&mut self, id: u32) -> Result<Expense, BookError> {
        let expense = self.store.get(id)?.ok_or(BookError::NotFound(id))?;
        self.selected = Some(id);
        log::debug!("Selected expense {}", id);
        Ok(expense)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Overwrite the selected row with validated fields
    pub fn update(&mut self, label: &str, amount: &str, date: &str) -> Result<Expense, BookError> {
        let id = self.selected.ok_or(BookError::SelectionRequired)?;
        let draft = validate_fields(label, amount, date)?;
        let expense = draft.clone().into_expense(id);
        let found = self.store.update(id, draft)?;
        self.selected = None;
        if !found {
            return Err(BookError::NotFound(id));
        }
        log::info!("Updated expense {}", id);
        Ok(expense)
    }

    /// Remove the selected row and return its id
    pub fn delete(&mut self) -> Result<u32, BookError> {
        let id = self.selected.ok_or(BookError::SelectionRequired)?;
        let found = self.store.delete(id)?;
        self.selected = None;
        if !found {
            return Err(BookError::NotFound(id));
        }
        log::info!("Deleted expense {}", id);
        Ok(id)
    }

    /// Filter rows by a case-insensitive substring of any column.
    ///
    /// The term is used as typed; surrounding spaces are part of it.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_lowercase();
    }

    /// Rows matching the search term, in store order
    pub fn expenses(&self) -> Result<Vec<Expense>, BookError> {
        let mut rows = self.store.list()?;
        if !self.search.is_empty() {
            rows.retain(|e| matches_search(e, &self.search));
        }
        Ok(rows)
    }

    /// Sum over every row, ignoring the search filter
    pub fn total(&self) -> Result<Amount, BookError> {
        Ok(self.store.total()?)
    }

    /// Write every row as CSV; returns the number of rows written
    pub fn export_csv<W: Write>(&self, out: W) -> Result<usize, BookError> {
        let rows = self.store.list()?;
        write_csv(out, &rows)?;
        log::info!("Exported {} expenses", rows.len());
        Ok(rows.len())
    }
}

fn matches_search(expense: &Expense, term: &str) -> bool {
    expense.id.to_string().contains(term)
        || expense.label.to_lowercase().contains(term)
        || expense.amount.to_string().contains(term)
        || expense.date.to_string().contains(term)
}
