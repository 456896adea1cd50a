//! Personal expense book
//!
//! - `model`: rows and fixed-point amounts
//! - `validation`: form field checks
//! - `store`: table storage (in memory or a JSON file)
//! - `book`: selection/search-aware service for frontends
//! - `export`: CSV output

pub mod book;
pub mod export;
pub mod model;
pub mod store;
pub mod validation;

pub use book::{BookError, ExpenseBook};
pub use export::write_csv;
pub use model::{Amount, Expense, ExpenseDraft};
pub use store::{ExpenseStore, JsonFileStore, MemoryStore, StoreError};
pub use validation::{ValidationErrors, validate_fields};
