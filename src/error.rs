use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Error type returned by ingestion and session operations.
///
/// This is a single error enum shared across CSV and Excel ingestion and the
/// session manager. Every variant renders a human-readable message; nothing in
/// the crate panics past this boundary.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Excel ingestion error.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV reader error (header read / reader setup; malformed data rows are
    /// skipped, not surfaced here).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The file extension is not one of the supported formats.
    #[error("unsupported file format '.{extension}' (expected .csv, .xlsx or .xls)")]
    UnsupportedFormat { extension: String },

    /// The content was structurally unreadable (empty workbook, no header
    /// row, etc.).
    #[error("parse failure: {message}")]
    Parse { message: String },
}
