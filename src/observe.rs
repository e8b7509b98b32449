//! Pipeline observability.
//!
//! The pipeline is an unattended batch job: its only user-visible surface is
//! the stream of per-step outcomes reported here. Observers receive every
//! step success/failure with the table and phase involved; failures carry
//! the underlying error (which names the offending statement or URL).

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::EtlError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the step failed).
    Error,
    /// Critical error (configuration or infrastructure failures).
    Critical,
}

impl Default for Severity {
    /// The default alert threshold: only configuration/infrastructure
    /// failures page anyone.
    fn default() -> Self {
        Severity::Critical
    }
}

/// Which stage of an entity's load a report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Pulling raw data from a source collaborator.
    Extract,
    /// Running the entity cleaner.
    Clean,
    /// Table creation and row insertion.
    Load,
    /// Post-load alteration statements.
    Migrate,
    /// The final key-creation phase.
    Constraints,
}

/// Context about one pipeline step.
#[derive(Debug, Clone)]
pub struct StepContext {
    /// Destination table the step concerns.
    pub table: String,
    /// Stage within the entity's load.
    pub phase: Phase,
}

/// Minimal stats reported on step success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStats {
    /// Rows produced or written by the step.
    pub rows: usize,
}

/// Observer interface for pipeline outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called when a step succeeds.
    fn on_success(&self, _ctx: &StepContext, _stats: StepStats) {}

    /// Called when a step fails.
    fn on_failure(&self, _ctx: &StepContext, _severity: Severity, _error: &EtlError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &StepContext, severity: Severity, error: &EtlError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Classify an error for alerting purposes.
///
/// Configuration problems are critical: the step can never succeed without
/// operator action. Storage and network failures are errors; the next run
/// may succeed.
pub fn severity_for_error(e: &EtlError) -> Severity {
    match e {
        EtlError::Config { .. } | EtlError::UnknownTable { .. } => Severity::Critical,
        EtlError::Io(_) => Severity::Critical,
        EtlError::Storage { .. } => Severity::Error,
        EtlError::Network { .. } => Severity::Error,
        EtlError::Csv(_) | EtlError::Json(_) => Severity::Error,
        EtlError::SchemaMismatch { .. } => Severity::Error,
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
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

impl PipelineObserver for CompositeObserver {
    fn on_success(&self, ctx: &StepContext, stats: StepStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &StepContext, severity: Severity, error: &EtlError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &StepContext, severity: Severity, error: &EtlError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_success(&self, ctx: &StepContext, stats: StepStats) {
        eprintln!(
            "[etl][ok] phase={:?} table={} rows={}",
            ctx.phase, ctx.table, stats.rows
        );
    }

    fn on_failure(&self, ctx: &StepContext, severity: Severity, error: &EtlError) {
        eprintln!(
            "[etl][{:?}] phase={:?} table={} err={}",
            severity, ctx.phase, ctx.table, error
        );
    }

    fn on_alert(&self, ctx: &StepContext, severity: Severity, error: &EtlError) {
        eprintln!(
            "[ALERT][etl][{:?}] phase={:?} table={} err={}",
            severity, ctx.phase, ctx.table, error
        );
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_success(&self, ctx: &StepContext, stats: StepStats) {
        self.append_line(&format!(
            "{} ok phase={:?} table={} rows={}",
            unix_ts(),
            ctx.phase,
            ctx.table,
            stats.rows
        ));
    }

    fn on_failure(&self, ctx: &StepContext, severity: Severity, error: &EtlError) {
        self.append_line(&format!(
            "{} fail severity={:?} phase={:?} table={} err={}",
            unix_ts(),
            severity,
            ctx.phase,
            ctx.table,
            error
        ));
    }

    fn on_alert(&self, ctx: &StepContext, severity: Severity, error: &EtlError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} phase={:?} table={} err={}",
            unix_ts(),
            severity,
            ctx.phase,
            ctx.table,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
