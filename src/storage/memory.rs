//! In-memory storage backend.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{EtlError, EtlResult};
use crate::types::{DataSet, Schema};

use super::Storage;

#[derive(Default)]
struct Inner {
    tables: BTreeMap<String, DataSet>,
    journal: Vec<String>,
    fail_when_contains: Vec<String>,
}

/// In-memory tables plus a journal of every executed statement.
///
/// Backs the migrator/orchestrator tests (the journal proves statement
/// ordering) and doubles as a dry-run sink. `fail_when_contains` lets a test
/// force a storage failure on the first statement containing a marker.
#[derive(Default)]
pub struct MemoryStorage {
    inner: Mutex<Inner>,
}

impl MemoryStorage {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table, e.g. a source table for extraction tests.
    pub fn with_table(self, name: &str, data: DataSet) -> Self {
        self.inner
            .lock()
            .expect("storage mutex poisoned")
            .tables
            .insert(name.to_string(), data);
        self
    }

    /// Make [`Storage::execute`] fail for statements containing `marker`.
    pub fn fail_when_contains(self, marker: &str) -> Self {
        self.inner
            .lock()
            .expect("storage mutex poisoned")
            .fail_when_contains
            .push(marker.to_string());
        self
    }

    /// Every statement passed to [`Storage::execute`], in order.
    pub fn journal(&self) -> Vec<String> {
        self.inner.lock().expect("storage mutex poisoned").journal.clone()
    }

    /// A stored table, if present.
    pub fn table(&self, name: &str) -> Option<DataSet> {
        self.inner
            .lock()
            .expect("storage mutex poisoned")
            .tables
            .get(name)
            .cloned()
    }
}

impl Storage for MemoryStorage {
    fn table_names(&self) -> EtlResult<Vec<String>> {
        let inner = self.inner.lock().expect("storage mutex poisoned");
        Ok(inner.tables.keys().cloned().collect())
    }

    fn create_table(&self, name: &str, schema: &Schema) -> EtlResult<()> {
        let mut inner = self.inner.lock().expect("storage mutex poisoned");
        inner
            .tables
            .insert(name.to_string(), DataSet::new(schema.clone(), Vec::new()));
        Ok(())
    }

    fn insert_rows(&self, name: &str, data: &DataSet) -> EtlResult<u64> {
        let mut inner = self.inner.lock().expect("storage mutex poisoned");
        let table = inner
            .tables
            .get_mut(name)
            .ok_or_else(|| EtlError::storage(name, "table does not exist"))?;
        table.rows.extend(data.rows.iter().cloned());
        Ok(data.rows.len() as u64)
    }

    fn execute(&self, sql: &str) -> EtlResult<u64> {
        let mut inner = self.inner.lock().expect("storage mutex poisoned");
        if let Some(marker) = inner
            .fail_when_contains
            .iter()
            .find(|m| sql.contains(m.as_str()))
            .cloned()
        {
            return Err(EtlError::storage(sql, format!("forced failure ({marker})")));
        }
        inner.journal.push(sql.to_string());
        Ok(0)
    }

    fn query(&self, sql: &str) -> EtlResult<DataSet> {
        // Only the shape the pipeline actually issues: SELECT * FROM <table>.
        let table = sql
            .trim()
            .strip_prefix("SELECT * FROM ")
            .map(str::trim)
            .ok_or_else(|| EtlError::storage(sql, "unsupported query shape"))?;
        self.table(table)
            .ok_or_else(|| EtlError::storage(table, "table does not exist"))
    }
}
