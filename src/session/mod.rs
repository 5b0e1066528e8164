//! Ingestion session manager.
//!
//! A [`Session`] is the single owned aggregate behind the dashboard: the
//! current [`TicketTable`], its filtered derivative, the active file's
//! identity, the last-update timestamp and a bounded load history. It
//! mediates between file sources (local paths, uploaded bytes) and the
//! normalizer in [`crate::ingestion`], and prevents redundant reprocessing of
//! unchanged uploads via the content hash.
//!
//! There is exactly one writer: every operation takes `&mut self` and runs to
//! completion, so state transitions appear atomic to any reader. The
//! [`Session::generation`] counter increments on every transition (including
//! [`Session::clear_all`]); downstream consumers that memoize charts or
//! aggregates must key their caches on it.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::{IngestError, IngestResult};
use crate::ingestion::{self, content_hash, FileFormat, LoadContext, LoadObserver, LoadStats};
use crate::types::TicketTable;

/// Maximum number of retained history entries; the oldest is evicted first.
pub const HISTORY_CAPACITY: usize = 10;

/// Where the active file's bytes came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FileSource {
    /// Read from a local filesystem path.
    Path(PathBuf),
    /// Supplied as uploaded bytes.
    Upload,
}

/// Identity of the currently loaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFile {
    /// File name as selected/uploaded.
    pub name: String,
    /// Origin of the bytes.
    pub source: FileSource,
    /// Content hash of the raw bytes (see [`content_hash`]).
    pub content_hash: String,
}

/// One history entry per successful ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadRecord {
    /// File name of the ingested file.
    pub file_name: String,
    /// Rows in the resulting table.
    pub rows: usize,
    /// Content hash of the ingested bytes.
    pub content_hash: String,
    /// Human-readable load timestamp.
    pub loaded_at: String,
}

/// Summary returned for a completed load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// File name of the ingested file.
    pub file_name: String,
    /// Rows in the resulting table.
    pub rows: usize,
    /// Malformed CSV rows skipped during parsing.
    pub skipped_rows: usize,
}

/// Outcome of a load request that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was parsed and is now the current dataset.
    Loaded(LoadSummary),
    /// The upload's bytes match the currently loaded dataset; nothing was
    /// reprocessed and the history is unchanged. Not an error.
    AlreadyLoaded,
}

struct CurrentDataset {
    table: TicketTable,
    filtered: TicketTable,
    file: ActiveFile,
    loaded_at: DateTime<Local>,
}

/// Session state for one dashboard user.
///
/// Created empty; populated by the first successful load; replaced wholesale
/// on each subsequent one. Pass it explicitly to every operation — it is
/// deliberately not a global.
#[derive(Default)]
pub struct Session {
    current: Option<CurrentDataset>,
    history: VecDeque<LoadRecord>,
    generation: u64,
    observer: Option<Arc<dyn LoadObserver>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("loaded", &self.current.is_some())
            .field("history_len", &self.history.len())
            .field("generation", &self.generation)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session that reports load events to `observer`.
    pub fn with_observer(observer: Arc<dyn LoadObserver>) -> Self {
        Self {
            observer: Some(observer),
            ..Self::default()
        }
    }

    /// Load a file from a local filesystem path.
    ///
    /// The extension is checked before any read; unsupported extensions are
    /// rejected without touching the filesystem. On read or parse failure the
    /// session state is left untouched and the error is returned (its
    /// `Display` is the user-facing message).
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> IngestResult<LoadOutcome> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_owned();
        let format = FileFormat::from_file_name(&file_name)?;
        let ctx = LoadContext {
            file_name,
            format,
        };

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                let err = IngestError::Io(e);
                self.notify_failure(&ctx, &err);
                return Err(err);
            }
        };

        let hash = content_hash(&bytes);
        self.parse_and_commit(ctx, &bytes, hash, FileSource::Path(path.to_path_buf()))
    }

    /// Load user-supplied upload bytes.
    ///
    /// Before parsing, the content hash is compared against the currently
    /// loaded dataset's hash; on a match the call is a
    /// [`LoadOutcome::AlreadyLoaded`] no-op that leaves state and history
    /// untouched. Only the current dataset is compared, not the history, so a
    /// file from two loads back is reprocessed.
    pub fn load_from_upload(&mut self, bytes: &[u8], file_name: &str) -> IngestResult<LoadOutcome> {
        let format = FileFormat::from_file_name(file_name)?;
        let ctx = LoadContext {
            file_name: file_name.to_owned(),
            format,
        };

        let hash = content_hash(bytes);
        if self
            .current
            .as_ref()
            .is_some_and(|c| c.file.content_hash == hash)
        {
            if let Some(obs) = &self.observer {
                obs.on_duplicate(&ctx);
            }
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        self.parse_and_commit(ctx, bytes, hash, FileSource::Upload)
    }

    /// Drop the current dataset, filtered derivative, file identity,
    /// timestamp and history as one unit, and bump the generation so
    /// downstream memoized results are invalidated.
    pub fn clear_all(&mut self) {
        self.current = None;
        self.history.clear();
        self.generation += 1;
    }

    /// The most recent `n` load records (at most [`HISTORY_CAPACITY`]),
    /// newest first. Read-only.
    pub fn history(&self, n: usize) -> Vec<&LoadRecord> {
        self.history.iter().rev().take(n).collect()
    }

    /// The current ticket table, if a dataset is loaded.
    pub fn current_table(&self) -> Option<&TicketTable> {
        self.current.as_ref().map(|c| &c.table)
    }

    /// The filtered derivative of the current table. Starts as a full copy on
    /// every load; the presentation layer replaces it via
    /// [`Session::set_filtered`].
    pub fn filtered_table(&self) -> Option<&TicketTable> {
        self.current.as_ref().map(|c| &c.filtered)
    }

    /// Replace the filtered derivative. Returns `false` (and changes nothing)
    /// when no dataset is loaded.
    pub fn set_filtered(&mut self, table: TicketTable) -> bool {
        match &mut self.current {
            Some(current) => {
                current.filtered = table;
                true
            }
            None => false,
        }
    }

    /// Identity of the currently loaded file, if any.
    pub fn active_file(&self) -> Option<&ActiveFile> {
        self.current.as_ref().map(|c| &c.file)
    }

    /// When the current dataset was loaded, if any.
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.current.as_ref().map(|c| c.loaded_at)
    }

    /// Monotonic state-transition counter for downstream cache keys.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn notify_failure(&self, ctx: &LoadContext, error: &IngestError) {
        if let Some(obs) = &self.observer {
            obs.on_failure(ctx, error);
        }
    }

    fn parse_and_commit(
        &mut self,
        ctx: LoadContext,
        bytes: &[u8],
        hash: String,
        source: FileSource,
    ) -> IngestResult<LoadOutcome> {
        let output = match ingestion::parse_bytes(bytes, ctx.format) {
            Ok(output) => output,
            Err(err) => {
                self.notify_failure(&ctx, &err);
                return Err(err);
            }
        };

        let rows = output.table.row_count();
        let loaded_at = Local::now();

        // Build the full replacement before touching any field so the
        // transition is all-or-nothing.
        let next = CurrentDataset {
            filtered: output.table.clone(),
            table: output.table,
            file: ActiveFile {
                name: ctx.file_name.clone(),
                source,
                content_hash: hash.clone(),
            },
            loaded_at,
        };
        let record = LoadRecord {
            file_name: ctx.file_name.clone(),
            rows,
            content_hash: hash,
            loaded_at: loaded_at.format("%d/%m/%Y %H:%M:%S").to_string(),
        };

        self.current = Some(next);
        self.history.push_back(record);
        while self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.generation += 1;

        let stats = LoadStats {
            rows,
            skipped_rows: output.skipped_rows,
        };
        if let Some(obs) = &self.observer {
            obs.on_success(&ctx, stats);
        }

        Ok(LoadOutcome::Loaded(LoadSummary {
            file_name: ctx.file_name,
            rows,
            skipped_rows: output.skipped_rows,
        }))
    }
}
