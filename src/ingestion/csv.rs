//! CSV ingestion implementation.
//!
//! Operates on already-decoded text (see [`crate::ingestion::decode`]). The
//! header row defines the column set; every cell comes in as
//! [`Value::Utf8`] (empty cells as [`Value::Null`]) and is retyped later by
//! the enrichment pass.

use crate::error::IngestResult;
use crate::types::{DataType, Field, Schema, TicketTable, Value};

/// Parse decoded CSV text into a [`TicketTable`].
///
/// Rules:
///
/// - The first row is the header row.
/// - Double quote is the quote character.
/// - Structurally malformed data rows (reader errors, or a field count that
///   does not match the header) are skipped individually, never fatal; the
///   returned count says how many were dropped.
pub fn parse_csv_text(text: &str) -> IngestResult<(TicketTable, usize)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .quote(b'"')
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr.headers()?.clone();
    let schema = Schema::new(
        headers
            .iter()
            .map(|h| Field::new(h.trim(), DataType::Utf8))
            .collect(),
    );

    let mut rows: Vec<Vec<Value>> = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if record.len() != headers.len() {
            skipped += 1;
            continue;
        }

        let row = record.iter().map(cell_value).collect();
        rows.push(row);
    }

    Ok((TicketTable::new(schema, rows), skipped))
}

fn cell_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Value::Null
    } else {
        Value::Utf8(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_become_null() {
        let (table, skipped) = parse_csv_text("a,b\n1,\n").unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(table.rows[0], vec![Value::Utf8("1".into()), Value::Null]);
    }

    #[test]
    fn rows_with_wrong_field_count_are_skipped() {
        let (table, skipped) = parse_csv_text("a,b\n1,2\n1,2,3\n4,5\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn quoted_delimiters_are_preserved() {
        let (table, _) = parse_csv_text("a,b\n\"x, y\",2\n").unwrap();
        assert_eq!(table.rows[0][0], Value::Utf8("x, y".into()));
    }
}
