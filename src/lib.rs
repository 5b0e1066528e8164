//! `demand-ingest` is the ingestion core of a demand-ticket dashboard: it
//! turns uploaded CSV/Excel files into an in-memory, enriched
//! [`types::TicketTable`] and manages the session-scoped "current dataset"
//! plus a bounded load history.
//!
//! The primary entrypoint is [`session::Session`], which dispatches by file
//! extension (`.csv`, `.xlsx`, `.xls`), de-duplicates repeat uploads by
//! content hash, and owns all state transitions. The normalizer underneath
//! ([`ingestion`]) can also be used directly.
//!
//! ## What ingestion does
//!
//! - **CSV**: text decoding over an ordered candidate list (UTF-8, UTF-8 with
//!   BOM, Latin-1) with a lossy fallback — encoding ambiguity never fails a
//!   load; malformed rows are skipped individually and counted.
//! - **Excel**: bytes go through a transient workbook file, read from the
//!   first sheet; the transient file is always cleaned up.
//! - **Normalization**: known column labels are renamed to canonical field
//!   names; responsible-party identities (often e-mail local parts) become
//!   display names; creation/modification timestamps are parsed (unparsable
//!   values become null); year/month/month-abbreviation/day/hour columns are
//!   derived from the creation timestamp; revision counts coerce to integers.
//!
//! ## Quick example
//!
//! ```no_run
//! use demand_ingest::session::{LoadOutcome, Session};
//!
//! # fn main() -> Result<(), demand_ingest::IngestError> {
//! let mut session = Session::new();
//! match session.load_from_path("demandas.csv")? {
//!     LoadOutcome::Loaded(summary) => println!("loaded {} rows", summary.rows),
//!     LoadOutcome::AlreadyLoaded => println!("no change"),
//! }
//!
//! let table = session.current_table().expect("just loaded");
//! println!("columns: {:?}", table.schema.field_names().collect::<Vec<_>>());
//! # Ok(())
//! # }
//! ```
//!
//! Uploads de-duplicate against the *currently loaded* dataset only:
//!
//! ```no_run
//! use demand_ingest::session::{LoadOutcome, Session};
//!
//! # fn main() -> Result<(), demand_ingest::IngestError> {
//! let bytes = std::fs::read("demandas.csv")?;
//! let mut session = Session::new();
//! session.load_from_upload(&bytes, "demandas.csv")?;
//! // Same bytes again: a no-op, history stays unchanged.
//! assert!(matches!(
//!     session.load_from_upload(&bytes, "demandas.csv")?,
//!     LoadOutcome::AlreadyLoaded
//! ));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: the data normalizer (decode, parse, rename, enrich) plus
//!   content hashing and load-event observers
//! - [`session`]: session state, load orchestration, bounded history
//! - [`types`]: schema + in-memory ticket table types
//! - [`error`]: the crate-wide error type
//!
//! The presentation layer (charts, rankings, layout) is an external consumer:
//! it reads the current and filtered tables from the session, applies
//! user-selected filters via [`types::TicketTable::filter_rows`] +
//! [`session::Session::set_filtered`], and must key any memoized aggregates
//! on [`session::Session::generation`].

pub mod error;
pub mod ingestion;
pub mod session;
pub mod types;

pub use error::{IngestError, IngestResult};
