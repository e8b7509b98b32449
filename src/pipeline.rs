//! The load orchestrator.
//!
//! For each entity: pull the raw table from its source collaborator, run the
//! entity cleaner, ensure the destination table exists (live metadata check
//! immediately before the write, never cached), insert every cleaned row,
//! then run the entity's migration statements. Execution is single-threaded
//! and strictly sequential; one entity finishes before the next begins.
//!
//! A full run ends with the constraint phase: dimension primary keys, then
//! fact-table foreign keys. Per-step failures are reported through the
//! observer and contained; sibling entities still proceed. The pipeline is
//! an unattended batch job; success is judged by inspecting the destination
//! schema afterwards.

use std::fmt;
use std::sync::Arc;

use crate::clean::{self, Entity};
use crate::error::{EtlError, EtlResult};
use crate::extract::TabularSource;
use crate::migrate;
use crate::observe::{
    Phase, PipelineObserver, Severity, StepContext, StepStats, severity_for_error,
};
use crate::storage::Storage;
use crate::types::DataSet;

/// Options controlling orchestration behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct PipelineOptions {
    /// Optional observer for step outcomes.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

/// Outcome counts for a full pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Entities whose load-and-migrate completed.
    pub entities_loaded: usize,
    /// Entities that failed or yielded no data.
    pub entities_failed: usize,
    /// Whether the final constraint phase completed.
    pub constraints_applied: bool,
}

/// Sequences extract → clean → load → migrate against one storage target.
pub struct Pipeline<'a> {
    storage: &'a dyn Storage,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    /// Create an orchestrator with default options.
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self::with_options(storage, PipelineOptions::default())
    }

    /// Create an orchestrator with explicit options.
    pub fn with_options(storage: &'a dyn Storage, options: PipelineOptions) -> Self {
        Self { storage, options }
    }

    /// Load one entity end to end. Returns the number of rows written.
    ///
    /// An unknown `table_name` is a fatal configuration error: nothing is
    /// cleaned and nothing is uploaded. A failed fetch yields an absent
    /// result; the entity's step is then reported as failed without
    /// touching storage. Errors returned here have already been reported
    /// through the observer; [`Pipeline::run`] contains them so sibling
    /// entities proceed.
    pub fn load_entity(&self, table_name: &str, source: &dyn TabularSource) -> EtlResult<u64> {
        let entity = match Entity::from_table_name(table_name) {
            Ok(e) => e,
            Err(e) => {
                self.report_failure(table_name, Phase::Clean, &e);
                return Err(e);
            }
        };

        let raw = match source.fetch() {
            Ok(ds) => ds,
            Err(e) => {
                self.report_failure(table_name, Phase::Extract, &e);
                DataSet::empty()
            }
        };
        if raw.is_shapeless() {
            let e = EtlError::SchemaMismatch {
                message: format!("source {} yielded no data", source.describe()),
            };
            self.report_failure(table_name, Phase::Extract, &e);
            return Err(e);
        }
        self.report_success(table_name, Phase::Extract, raw.row_count());

        let cleaned = clean::clean(entity, &raw);
        self.report_success(table_name, Phase::Clean, cleaned.row_count());

        // Live metadata check immediately before the write.
        let existing = match self.storage.table_names() {
            Ok(names) => names,
            Err(e) => {
                self.report_failure(table_name, Phase::Load, &e);
                return Err(e);
            }
        };
        if !existing.iter().any(|n| n == table_name) {
            if let Err(e) = self.storage.create_table(table_name, &cleaned.schema) {
                self.report_failure(table_name, Phase::Load, &e);
                return Err(e);
            }
        }

        let written = match self.storage.insert_rows(table_name, &cleaned) {
            Ok(n) => n,
            Err(e) => {
                self.report_failure(table_name, Phase::Load, &e);
                return Err(e);
            }
        };
        self.report_success(table_name, Phase::Load, written as usize);

        if let Err(e) = migrate::run_entity(self.storage, entity) {
            self.report_failure(table_name, Phase::Migrate, &e);
            return Err(e);
        }
        self.report_success(table_name, Phase::Migrate, written as usize);

        Ok(written)
    }

    /// Run a batch of entity loads in order, then the constraint phase.
    ///
    /// Callers supply jobs dimension-first (see [`Entity::ALL`]); the
    /// constraint phase always runs last, so every dimension primary key is
    /// attempted before any fact foreign key. Per-entity failures are
    /// contained; the run always proceeds to the next entity.
    pub fn run(&self, jobs: &[(&str, &dyn TabularSource)]) -> RunReport {
        let mut report = RunReport::default();

        for (table_name, source) in jobs {
            match self.load_entity(table_name, *source) {
                Ok(_) => report.entities_loaded += 1,
                Err(_) => report.entities_failed += 1,
            }
        }

        match migrate::run_constraints(self.storage) {
            Ok(()) => {
                report.constraints_applied = true;
                self.report_success("orders_table", Phase::Constraints, 0);
            }
            Err(e) => {
                self.report_failure("orders_table", Phase::Constraints, &e);
            }
        }

        report
    }

    fn report_success(&self, table: &str, phase: Phase, rows: usize) {
        if let Some(obs) = self.options.observer.as_ref() {
            let ctx = StepContext {
                table: table.to_string(),
                phase,
            };
            obs.on_success(&ctx, StepStats { rows });
        }
    }

    fn report_failure(&self, table: &str, phase: Phase, error: &EtlError) {
        if let Some(obs) = self.options.observer.as_ref() {
            let ctx = StepContext {
                table: table.to_string(),
                phase,
            };
            let severity = severity_for_error(error);
            obs.on_failure(&ctx, severity, error);
            if severity >= self.options.alert_at_or_above {
                obs.on_alert(&ctx, severity, error);
            }
        }
    }
}
