//! Excel ingestion implementation.
//!
//! Uploaded workbook bytes are materialized to a transient file (calamine
//! wants a path), read from the first sheet, and the transient file is
//! removed again whether or not the read succeeds — `NamedTempFile` deletes
//! on drop.

use std::io::Write;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{IngestError, IngestResult};
use crate::types::{DataType, Field, Schema, TicketTable, Value};

/// Ingest spreadsheet bytes into a [`TicketTable`].
///
/// Behavior:
/// - Reads the first sheet in the workbook.
/// - The first non-empty row is the header row.
/// - Cells come in as [`Value::Utf8`] (empty cells as [`Value::Null`]); the
///   enrichment pass retypes them later. Date cells are rendered in a format
///   the timestamp parser understands.
///
/// `suffix` is the original file extension (`.xlsx`/`.xls`), used to name the
/// transient file so the workbook opener picks the right format.
pub fn parse_excel_bytes(bytes: &[u8], suffix: &str) -> IngestResult<TicketTable> {
    let mut tmp = tempfile::Builder::new()
        .prefix("demand-upload-")
        .suffix(suffix)
        .tempfile()?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    read_workbook(tmp.path())
}

fn read_workbook(path: &Path) -> IngestResult<TicketTable> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::Parse {
            message: "workbook has no sheets".to_string(),
        })?;
    let range = workbook.worksheet_range(&sheet)?;

    let header_row_idx = range
        .rows()
        .position(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .ok_or_else(|| IngestError::Parse {
            message: format!("sheet '{sheet}' has no non-empty rows (no header row found)"),
        })?;
    let headers: Vec<String> = range
        .rows()
        .nth(header_row_idx)
        .map(|row| row.iter().map(cell_to_header_string).collect())
        .unwrap_or_default();

    let schema = Schema::new(
        headers
            .iter()
            .map(|h| Field::new(h.trim(), DataType::Utf8))
            .collect(),
    );

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (idx, row) in range.rows().enumerate() {
        if idx <= header_row_idx {
            continue;
        }
        let out_row = (0..headers.len())
            .map(|col| cell_value(row.get(col).unwrap_or(&Data::Empty)))
            .collect();
        rows.push(out_row);
    }

    Ok(TicketTable::new(schema, rows))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(c: &Data) -> Value {
    match c {
        Data::Empty => Value::Null,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Null
            } else {
                Value::Utf8(trimmed.to_owned())
            }
        }
        Data::Int(i) => Value::Utf8(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 => Value::Utf8((*f as i64).to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Value::Utf8(naive.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Value::Null,
        },
        other => Value::Utf8(other.to_string()),
    }
}
