//! Relational storage seam.
//!
//! The pipeline only ever talks to storage through the [`Storage`] trait:
//! reflect current tables, create a table from a row shape, bulk-insert
//! record rows, execute alteration statements, and run select queries.
//! Backends:
//!
//! - [`postgres::PgStorage`] (feature `db_postgres`): the production target
//! - [`memory::MemoryStorage`]: in-memory tables plus a statement journal,
//!   used by tests and as a dry-run sink

pub mod memory;
#[cfg(feature = "db_postgres")]
pub mod postgres;

pub use memory::MemoryStorage;
#[cfg(feature = "db_postgres")]
pub use postgres::PgStorage;

use crate::error::EtlResult;
use crate::types::{DataSet, Schema};

/// Operations the pipeline needs from relational storage.
///
/// Implementations are expected to reflect live metadata in
/// [`Storage::table_names`] on every call; the orchestrator re-checks
/// existence immediately before each write rather than caching.
pub trait Storage {
    /// Names of the tables currently present.
    fn table_names(&self) -> EtlResult<Vec<String>>;

    /// Create an empty table shaped like `schema`.
    fn create_table(&self, name: &str, schema: &Schema) -> EtlResult<()>;

    /// Bulk-insert every row of `data` into `name`. Returns rows written.
    fn insert_rows(&self, name: &str, data: &DataSet) -> EtlResult<u64>;

    /// Execute a single alteration statement. Returns affected rows.
    fn execute(&self, sql: &str) -> EtlResult<u64>;

    /// Run a select query and materialize the result.
    fn query(&self, sql: &str) -> EtlResult<DataSet>;
}
