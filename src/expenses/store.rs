//! Expense table storage
//!
//! One table: `id` (auto-generated), `label`, `amount`, `date`. Every
//! mutating call commits immediately.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{Amount, Expense, ExpenseDraft};
use crate::persistence::{self, PersistError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("expense ids exhausted")]
    IdsExhausted,
}

/// Storage for expense rows
pub trait ExpenseStore {
    /// Insert a row and return it with its new id
    fn add(&mut self, draft: ExpenseDraft) -> Result<Expense, StoreError>;

    /// All rows, newest date first (ties: newest id first)
    fn list(&self) -> Result<Vec<Expense>, StoreError>;

    fn get(&self, id: u32) -> Result<Option<Expense>, StoreError>;

    /// Replace a row's fields; false if no such row
    fn update(&mut self, id: u32, draft: ExpenseDraft) -> Result<bool, StoreError>;

    /// Remove a row; false if no such row
    fn delete(&mut self, id: u32) -> Result<bool, StoreError>;

    /// Sum of all amounts
    fn total(&self) -> Result<Amount, StoreError>;
}

/// In-memory expense table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStore {
    /// Next id to hand out; ids are never reused
    next_id: u32,
    rows: Vec<Expense>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Repair a table whose counter lags its rows (hand-edited files)
    fn normalize(&mut self) {
        let max_id = self.rows.iter().map(|e| e.id).max().unwrap_or(0);
        if self.next_id <= max_id {
            self.next_id = max_id.saturating_add(1);
        }
        self.next_id = self.next_id.max(1);
    }
}

impl ExpenseStore for MemoryStore {
    fn add(&mut self, draft: ExpenseDraft) -> Result<Expense, StoreError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        let expense = draft.into_expense(id);
        self.rows.push(expense.clone());
        Ok(expense)
    }

    fn list(&self) -> Result<Vec<Expense>, StoreError> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    fn get(&self, id: u32) -> Result<Option<Expense>, StoreError> {
        Ok(self.rows.iter().find(|e| e.id == id).cloned())
    }

    fn update(&mut self, id: u32, draft: ExpenseDraft) -> Result<bool, StoreError> {
        match self.rows.iter_mut().find(|e| e.id == id) {
            Some(row) => {
                *row = draft.into_expense(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&mut self, id: u32) -> Result<bool, StoreError> {
        let before = self.rows.len();
        self.rows.retain(|e| e.id != id);
        Ok(self.rows.len() != before)
    }

    fn total(&self) -> Result<Amount, StoreError> {
        Ok(self.rows.iter().map(|e| e.amount).sum())
    }
}

/// Expense table kept in a JSON file.
///
/// Each change is applied to a copy, written out, and only then becomes the
/// current table, so a failed write leaves both file and memory unchanged.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    table: MemoryStore,
}

impl JsonFileStore {
    /// Open `path`; a missing file is an empty table
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut table = persistence::load_json::<MemoryStore>(&path)?.unwrap_or_default();
        table.normalize();
        log::info!("Opened expense table {} ({} rows)", path.display(), table.len());
        Ok(Self { path, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn commit<T>(&mut self, change: impl FnOnce(&mut MemoryStore) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let mut next = self.table.clone();
        let result = change(&mut next)?;
        persistence::save_json(&self.path, &next)?;
        self.table = next;
        log::debug!("Committed expense table ({} rows)", self.table.len());
        Ok(result)
    }
}

impl ExpenseStore for JsonFileStore {
    fn add(&mut self, draft: ExpenseDraft) -> Result<Expense, StoreError> {
        self.commit(|table| table.add(draft))
    }

    fn list(&self) -> Result<Vec<Expense>, StoreError> {
        self.table.list()
    }

    fn get(&self, id: u32) -> Result<Option<Expense>, StoreError> {
        self.table.get(id)
    }

    fn update(&mut self, id: u32, draft: ExpenseDraft) -> Result<bool, StoreError> {
        if self.table.get(id)?.is_none() {
            return Ok(false);
        }
        self.commit(|table| table.update(id, draft))
    }

    fn delete(&mut self, id: u32) -> Result<bool, StoreError> {
        if self.table.get(id)?.is_none() {
            return Ok(false);
        }
        self.commit(|table| table.delete(id))
    }

    fn total(&self) -> Result<Amount, StoreError> {
        self.table.total()
    }
}
