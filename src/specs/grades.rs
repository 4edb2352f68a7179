// src/specs/grades.rs
//! Grade histogram page.
//!
//! A page with grades carries three tables; the third is the histogram with a
//! header row, a `Karakter` column and the student count in the first column
//! after it. A page with no tables means no grades were given for that
//! course and exam period.

use scraper::Html;
use tracing::debug;

use crate::core::html::{select, table_rows};
use crate::core::sanitize::capitalize;
use crate::error::{Error, Result};
use crate::store::Record;

const GRADE_TABLE_INDEX: usize = 2;
const GRADE_COLUMN: &str = "Karakter";

/// Site grade label (capitalized) → quantity.
pub fn parse_histogram(url: &str, body: &str) -> Result<Record> {
    let doc = Html::parse_document(body);
    let tables = select(&doc, "table");

    let Some(table) = tables.get(GRADE_TABLE_INDEX) else {
        debug!(%url, tables = tables.len(), "no grade table");
        return Ok(Record::new());
    };

    let record = extract(&table_rows(*table));
    if record.is_empty() {
        return Err(Error::format_changed(url, "grade table present but no grades extracted"));
    }
    Ok(record)
}

fn extract(rows: &[Vec<String>]) -> Record {
    let mut out = Record::new();
    let Some((header, data)) = rows.split_first() else {
        return out;
    };
    let Some(label_col) = header.iter().position(|h| h.eq_ignore_ascii_case(GRADE_COLUMN)) else {
        return out;
    };
    // first column that is not the label column
    let qty_col = if label_col == 0 { 1 } else { 0 };

    for row in data {
        let (Some(label), Some(qty)) = (row.get(label_col), row.get(qty_col)) else {
            continue;
        };
        if let Some(n) = leading_count(qty) {
            out.insert(capitalize(label), n.to_string());
        }
    }
    out
}

fn leading_count(cell: &str) -> Option<u32> {
    let digits: String = cell.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
