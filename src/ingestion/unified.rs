//! Unified parse entrypoint.
//!
//! [`parse_bytes`] turns raw upload bytes of a declared [`FileFormat`] into a
//! fully enriched [`TicketTable`]: decode (CSV) or workbook read (Excel),
//! then column rename, then the enrichment pipeline. Failures come back as
//! explicit [`crate::error::IngestError`] values — never a partially enriched
//! table — and parsing identical bytes twice yields identical tables.

use std::path::Path;

use crate::error::{IngestError, IngestResult};
use crate::ingestion::{columns, csv, decode, enrich, excel};
use crate::types::TicketTable;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-separated values.
    Csv,
    /// Excel workbook (OOXML).
    Xlsx,
    /// Legacy Excel workbook.
    Xls,
}

impl FileFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            _ => None,
        }
    }

    /// Determine the format from a file name, rejecting unknown extensions
    /// before anything is read.
    pub fn from_file_name(name: &str) -> IngestResult<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        Self::from_extension(extension).ok_or_else(|| IngestError::UnsupportedFormat {
            extension: extension.to_owned(),
        })
    }

    /// Suffix for the transient file Excel bytes are materialized to.
    pub(crate) fn temp_suffix(self) -> &'static str {
        match self {
            Self::Csv => ".csv",
            Self::Xlsx => ".xlsx",
            Self::Xls => ".xls",
        }
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// The enriched ticket table.
    pub table: TicketTable,
    /// Structurally malformed CSV rows that were skipped (always 0 for
    /// Excel). Informational, never an error.
    pub skipped_rows: usize,
}

/// Parse raw upload bytes into an enriched [`TicketTable`].
pub fn parse_bytes(bytes: &[u8], format: FileFormat) -> IngestResult<ParseOutput> {
    let (mut table, skipped_rows) = match format {
        FileFormat::Csv => {
            let (text, _encoding) = decode::decode_csv_bytes(bytes);
            csv::parse_csv_text(&text)?
        }
        FileFormat::Xlsx | FileFormat::Xls => {
            (excel::parse_excel_bytes(bytes, format.temp_suffix())?, 0)
        }
    };

    columns::rename_columns(&mut table);
    enrich::enrich(&mut table);

    Ok(ParseOutput {
        table,
        skipped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_dispatch_by_extension() {
        assert_eq!(FileFormat::from_extension("CSV"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_extension("xlsx"), Some(FileFormat::Xlsx));
        assert_eq!(FileFormat::from_extension("xls"), Some(FileFormat::Xls));
        assert_eq!(FileFormat::from_extension("txt"), None);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = FileFormat::from_file_name("notes.txt").unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedFormat { ref extension } if extension == "txt"
        ));
    }
}
