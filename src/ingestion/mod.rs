//! The Data Normalizer: raw upload bytes in, enriched [`crate::types::TicketTable`] out.
//!
//! Most callers go through [`parse_bytes`] (from [`unified`]) which:
//!
//! - decodes CSV text over an ordered encoding candidate list ([`decode`])
//! - parses CSV ([`csv`]) or Excel via a transient workbook file ([`excel`])
//! - renames known columns to canonical names ([`columns`])
//! - derives display names, timestamps, temporal fields and revision counts
//!   ([`enrich`])
//!
//! [`hash::content_hash`] provides the content fingerprint the session layer
//! uses for duplicate detection, and [`observability`] the load-event
//! reporting hooks.

pub mod columns;
pub mod csv;
pub mod decode;
pub mod enrich;
pub mod excel;
pub mod hash;
pub mod observability;
pub mod unified;

pub use hash::content_hash;
pub use observability::{CompositeObserver, LoadContext, LoadObserver, LoadStats, StdErrObserver};
pub use unified::{parse_bytes, FileFormat, ParseOutput};
