//! Source collaborators producing raw tables.
//!
//! Every source (legacy database tables, the card document extract, the
//! object-storage products CSV, the store HTTP APIs, the date JSON feed)
//! is consumed through one seam: [`TabularSource`]. Raw feeds are
//! stringly-typed; nothing here validates content, that is the cleaners'
//! job.
//!
//! Format adapters:
//!
//! - [`csv`]: delimited text into a raw [`crate::types::DataSet`]
//! - [`json`]: JSON record arrays into a raw [`crate::types::DataSet`]
//! - [`http`] (feature `http`): the remote collaborators from the source map

pub mod csv;
#[cfg(feature = "http")]
pub mod http;
pub mod json;

#[cfg(feature = "http")]
pub use http::{CsvHttpSource, JsonHttpSource, StoreApiSource};

use std::path::PathBuf;

use crate::error::EtlResult;
use crate::storage::Storage;
use crate::types::DataSet;

/// A collaborator that yields one raw table per fetch.
pub trait TabularSource {
    /// Human-readable identity for diagnostics (table name, URL, path).
    fn describe(&self) -> String;

    /// Pull the raw table.
    fn fetch(&self) -> EtlResult<DataSet>;
}

/// A table read from the source relational database.
pub struct SourceTable<'a> {
    storage: &'a dyn Storage,
    table: String,
}

impl<'a> SourceTable<'a> {
    /// Read `table` from `storage` on fetch.
    pub fn new(storage: &'a dyn Storage, table: impl Into<String>) -> Self {
        Self {
            storage,
            table: table.into(),
        }
    }
}

impl TabularSource for SourceTable<'_> {
    fn describe(&self) -> String {
        self.table.clone()
    }

    fn fetch(&self) -> EtlResult<DataSet> {
        self.storage.query(&format!("SELECT * FROM {}", self.table))
    }
}

/// A delimited-text extract on the local filesystem.
///
/// The card document's tabular extract arrives this way: the PDF itself is
/// parsed by an external collaborator, which hands over delimited text.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    /// Read the file at `path` on fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TabularSource for CsvFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> EtlResult<DataSet> {
        csv::dataset_from_csv_path(&self.path)
    }
}
