//! CSV export

use std::io::{self, Write};

use super::model::Expense;

pub const CSV_HEADER: [&str; 4] = ["ID", "Label", "Amount", "Date"];

/// Write a header row and one row per expense, in the given order
pub fn write_csv<W: Write>(mut out: W, expenses: &[Expense]) -> io::Result<()> {
    write_record(&mut out, CSV_HEADER.iter().map(|s| s.to_string()))?;
    for e in expenses {
        write_record(
            &mut out,
            [e.id.to_string(), e.label.clone(), e.amount.to_string(), e.date.to_string()].into_iter(),
        )?;
    }
    out.flush()
}

fn write_record<W: Write>(out: &mut W, fields: impl Iterator<Item = String>) -> io::Result<()> {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.write_all(b",")?;
        }
        out.write_all(quote(&field).as_bytes())?;
    }
    out.write_all(b"\r\n")
}

/// Quote a field if it holds a separator, quote or line break
fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expenses::model::Amount;
    use chrono::NaiveDate;

    #[test]
    fn test_csv_layout() {
        let rows = vec![
            Expense {
                id: 2,
                label: "Coffee".into(),
                amount: Amount::from_cents(350),
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            },
            Expense {
                id: 1,
                label: "Books, \"used\"".into(),
                amount: Amount::from_cents(1200),
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            },
        ];
        let mut out = Vec::new();
        write_csv(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "ID,Label,Amount,Date\r\n2,Coffee,3.50,2024-01-15\r\n1,\"Books, \"\"used\"\"\",12.00,2024-01-02\r\n"
        );
    }

    #[test]
    fn test_empty_export_has_header() {
        let mut out = Vec::new();
        write_csv(&mut out, &[]).unwrap();
        assert_eq!(out, b"ID,Label,Amount,Date\r\n");
    }
}
