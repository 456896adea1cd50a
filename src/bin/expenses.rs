//! Expense book command line
//!
//! One action per invocation against a JSON-backed expense table.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use road_hopper::expenses::validation::DATE_FORMAT;
use road_hopper::expenses::{BookError, Expense, ExpenseBook, ExpenseStore, JsonFileStore};

#[derive(Parser)]
#[command(author, version, about = "Track personal expenses", long_about = None)]
struct Cli {
    /// Expense table file
    #[arg(long, default_value = "expenses.json")]
    store: PathBuf,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Record a new expense
    Add {
        #[arg(long)]
        label: String,
        #[arg(long)]
        amount: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Show expenses, newest first
    List {
        /// Case-insensitive filter over every column
        #[arg(long)]
        search: Option<String>,
    },
    /// Replace every field of an expense
    Update {
        id: u32,
        #[arg(long)]
        label: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        date: String,
    },
    /// Remove an expense (asks first)
    Delete {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Sum of all expenses
    Total,
    /// Write all expenses to a CSV file
    Export { path: PathBuf },
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let store = JsonFileStore::open(cli.store.clone())
        .with_context(|| format!("opening expense table {}", cli.store.display()))?;
    let mut book = ExpenseBook::new(store);

    match run(&mut book, cli.cmd) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(BookError::Validation(errors)) => {
            for message in errors.messages() {
                eprintln!("{message}");
            }
            Ok(ExitCode::FAILURE)
        }
        Err(e @ (BookError::NotFound(_) | BookError::SelectionRequired)) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn run(book: &mut ExpenseBook<JsonFileStore>, cmd: Cmd) -> Result<(), BookError> {
    match cmd {
        Cmd::Add { label, amount, date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive().format(DATE_FORMAT).to_string());
            let expense = book.add(&label, &amount, &date)?;
            println!("Added #{}", expense.id);
        }
        Cmd::List { search } => {
            book.set_search(search.as_deref().unwrap_or(""));
            print_table(&book.expenses()?);
        }
        Cmd::Update {
            id,
            label,
            amount,
            date,
        } => {
            book.select(id)?;
            let expense = book.update(&label, &amount, &date)?;
            println!("Updated #{}", expense.id);
        }
        Cmd::Delete { id, yes } => {
            let stdin = io::stdin();
            match delete_expense(book, id, yes, stdin.lock(), io::stdout())? {
                Some(id) => println!("Deleted #{id}"),
                None => println!("Kept #{id}"),
            }
        }
        Cmd::Total => println!("Total: {}", book.total()?),
        Cmd::Export { path } => {
            let file = File::create(&path)?;
            let rows = book.export_csv(BufWriter::new(file))?;
            println!("Exported {rows} expenses to {}", path.display());
        }
    }
    Ok(())
}

/// Select `id`, confirm unless `yes`, then delete it.
///
/// Returns the deleted id, or None if the user declined.
fn delete_expense<S: ExpenseStore>(
    book: &mut ExpenseBook<S>,
    id: u32,
    yes: bool,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<Option<u32>, BookError> {
    let expense = book.select(id)?;
    let prompt = format!("Delete #{} {} ({} on {})?", expense.id, expense.label, expense.amount, expense.date);
    if !yes && !confirm(input, &mut out, &prompt)? {
        book.clear_selection();
        return Ok(None);
    }
    Ok(Some(book.delete()?))
}

/// Ask a y/N question; anything but `y`/`yes` (including end of input) is no
fn confirm(mut input: impl BufRead, out: &mut impl Write, prompt: &str) -> io::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_table(rows: &[Expense]) {
    let width = rows.iter().map(|e| e.label.chars().count()).max().unwrap_or(0).max(5);
    println!("{:>5}  {:<10}  {:>12}  {:<width$}", "ID", "Date", "Amount", "Label");
    for e in rows {
        println!(
            "{:>5}  {:<10}  {:>12}  {:<width$}",
            e.id,
            e.date.format(DATE_FORMAT).to_string(),
            e.amount.to_string(),
            e.label
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use road_hopper::expenses::MemoryStore;

    fn book_with_coffee() -> (ExpenseBook<MemoryStore>, u32) {
        let mut book = ExpenseBook::new(MemoryStore::new());
        let id = book.add("Coffee", "3.50", "2024-01-15").unwrap().id;
        (book, id)
    }

    #[test]
    fn test_declined_delete_keeps_row() {
        for answer in ["n\n", "\n", "", "maybe\n"] {
            let (mut book, id) = book_with_coffee();
            let mut out = Vec::new();
            let deleted = delete_expense(&mut book, id, false, answer.as_bytes(), &mut out).unwrap();
            assert_eq!(deleted, None);
            assert_eq!(book.store().len(), 1);
            assert_eq!(book.selected(), None);
            let prompt = String::from_utf8(out).unwrap();
            assert!(prompt.starts_with(&format!("Delete #{id} Coffee (3.50 on 2024-01-15)?")));
            assert!(prompt.ends_with("[y/N] "));
        }
    }

    #[test]
    fn test_confirmed_delete_removes_row() {
        let (mut book, id) = book_with_coffee();
        let deleted = delete_expense(&mut book, id, false, "Y\n".as_bytes(), Vec::new()).unwrap();
        assert_eq!(deleted, Some(id));
        assert!(book.store().is_empty());
    }

    #[test]
    fn test_yes_flag_skips_prompt() {
        let (mut book, id) = book_with_coffee();
        let mut out = Vec::new();
        assert_eq!(delete_expense(&mut book, id, true, io::empty(), &mut out).unwrap(), Some(id));
        assert!(out.is_empty());
        assert!(book.store().is_empty());
    }

    #[test]
    fn test_unknown_id_is_not_prompted() {
        let (mut book, id) = book_with_coffee();
        let mut out = Vec::new();
        let err = delete_expense(&mut book, id + 1, false, "y\n".as_bytes(), &mut out).unwrap_err();
        assert!(matches!(err, BookError::NotFound(_)));
        assert!(out.is_empty());
        assert_eq!(book.store().len(), 1);
    }
}
