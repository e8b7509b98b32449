//! Raw CSV extraction.
//!
//! Unlike a schema-first reader, raw extraction takes the columns the file
//! declares: every header becomes a [`crate::types::DataType::Utf8`] field,
//! and empty cells become nulls. Type coercion is the cleaners' concern.

use std::path::Path;

use crate::error::EtlResult;
use crate::types::{DataSet, Schema, Value};

/// Read a CSV file into a raw, stringly-typed [`DataSet`].
///
/// The file must have a header row; the header names the output columns.
pub fn dataset_from_csv_path(path: impl AsRef<Path>) -> EtlResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    dataset_from_csv_reader(&mut rdr)
}

/// Read CSV text into a raw, stringly-typed [`DataSet`].
pub fn dataset_from_csv_str(text: &str) -> EtlResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    dataset_from_csv_reader(&mut rdr)
}

/// Read CSV data from an existing reader.
pub fn dataset_from_csv_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> EtlResult<DataSet> {
    let headers = rdr.headers()?.clone();
    let schema = Schema::all_utf8(&headers.iter().collect::<Vec<_>>());
    let width = schema.fields.len();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row: Vec<Value> = Vec::with_capacity(width);
        for i in 0..width {
            let raw = record.get(i).unwrap_or("").trim();
            row.push(if raw.is_empty() {
                Value::Null
            } else {
                Value::Utf8(raw.to_owned())
            });
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}
