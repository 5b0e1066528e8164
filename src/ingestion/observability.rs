use std::fmt;
use std::sync::Arc;

use crate::error::IngestError;

use super::unified::FileFormat;

/// Context about one load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// The uploaded/selected file name.
    pub file_name: String,
    /// Format used for parsing.
    pub format: FileFormat,
}

/// Minimal stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of ingested rows.
    pub rows: usize,
    /// Malformed CSV rows skipped during parsing.
    pub skipped_rows: usize,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or UI notifications.
pub trait LoadObserver: Send + Sync {
    /// Called when a load succeeds and session state has been replaced.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when a load fails (session state untouched).
    fn on_failure(&self, _ctx: &LoadContext, _error: &IngestError) {}

    /// Called when an upload matches the currently loaded content hash and is
    /// skipped as a no-op.
    fn on_duplicate(&self, _ctx: &LoadContext) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, error: &IngestError) {
        for o in &self.observers {
            o.on_failure(ctx, error);
        }
    }

    fn on_duplicate(&self, ctx: &LoadContext) {
        for o in &self.observers {
            o.on_duplicate(ctx);
        }
    }
}

/// Logs load events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl LoadObserver for StdErrObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        eprintln!(
            "[load][ok] format={:?} file={} rows={} skipped={}",
            ctx.format, ctx.file_name, stats.rows, stats.skipped_rows
        );
    }

    fn on_failure(&self, ctx: &LoadContext, error: &IngestError) {
        eprintln!(
            "[load][err] format={:?} file={} err={}",
            ctx.format, ctx.file_name, error
        );
    }

    fn on_duplicate(&self, ctx: &LoadContext) {
        eprintln!(
            "[load][skip] format={:?} file={} already loaded",
            ctx.format, ctx.file_name
        );
    }
}
