//! Core data model types for the pipeline.
//!
//! Raw extracts, cleaned entities, and query results all share one in-memory
//! representation: a [`DataSet`] holding row-major [`Value`]s described by an
//! ordered, typed [`Schema`]. Raw feeds arrive stringly-typed ([`DataType::Utf8`]
//! throughout); the cleaners are what introduce real types.

/// Logical data type for a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the shape of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Create a schema where every column is [`DataType::Utf8`].
    ///
    /// This is the shape of raw extracts: typing happens during cleaning,
    /// not ingestion.
    pub fn all_utf8<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            fields: names
                .iter()
                .map(|n| Field::new(n.as_ref(), DataType::Utf8))
                .collect(),
        }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the string content, if this is a [`Value::Utf8`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The float content, if this is a [`Value::Float64`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer content, if this is a [`Value::Int64`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`]
/// fields. Cleaners consume and produce this type; storage backends insert it.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// An empty dataset with no columns.
    ///
    /// This is what a failed source fetch yields: no shape, no rows.
    pub fn empty() -> Self {
        Self {
            schema: Schema::new(Vec::new()),
            rows: Vec::new(),
        }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the dataset has no columns at all.
    pub fn is_shapeless(&self) -> bool {
        self.schema.fields.is_empty()
    }

    /// Returns the index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name)
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset by applying `mapper` to every row.
    ///
    /// The returned dataset preserves the original schema.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the
    /// schema field count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&[Value]) -> Vec<Value>,
    {
        let expected_len = self.schema.fields.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let out = mapper(row.as_slice());
                assert!(
                    out.len() == expected_len,
                    "mapped row length {} does not match schema length {}",
                    out.len(),
                    expected_len
                );
                out
            })
            .collect();

        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset by applying `mapper` to one column of every row.
    ///
    /// Rows are otherwise untouched. If `name` is not in the schema, the
    /// dataset is returned unchanged (raw feeds vary in shape).
    pub fn map_column<F>(&self, name: &str, mut mapper: F) -> Self
    where
        F: FnMut(&Value) -> Value,
    {
        let Some(idx) = self.schema.index_of(name) else {
            return self.clone();
        };
        self.map_rows(|row| {
            let mut out = row.to_vec();
            out[idx] = mapper(&row[idx]);
            out
        })
    }

    /// Create a new dataset without the named columns.
    ///
    /// Names not present in the schema are ignored.
    pub fn drop_columns(&self, names: &[&str]) -> Self {
        let keep: Vec<usize> = self
            .schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !names.contains(&f.name.as_str()))
            .map(|(i, _)| i)
            .collect();

        let schema = Schema::new(keep.iter().map(|&i| self.schema.fields[i].clone()).collect());
        let rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Self { schema, rows }
    }

    /// Create a new dataset without rows in which every cell is null.
    pub fn drop_fully_null_rows(&self) -> Self {
        self.filter_rows(|row| row.iter().any(|v| !v.is_null()))
    }

    /// Reduce (fold) all rows into an accumulator value.
    pub fn reduce_rows<A, F>(&self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, &[Value]) -> A,
    {
        self.rows
            .iter()
            .fold(init, |acc, row| reducer(acc, row.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSet, DataType, Field, Schema, Value};

    fn sample() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
            Field::new("score", DataType::Float64),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Utf8("a".to_string()), Value::Float64(1.0)],
                vec![Value::Null, Value::Null, Value::Null],
                vec![Value::Int64(3), Value::Utf8("c".to_string()), Value::Null],
            ],
        )
    }

    #[test]
    fn drop_columns_removes_named_and_ignores_unknown() {
        let ds = sample();
        let out = ds.drop_columns(&["score", "not_a_column"]);
        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["id", "name"]
        );
        assert_eq!(out.rows[0], vec![Value::Int64(1), Value::Utf8("a".to_string())]);
    }

    #[test]
    fn drop_fully_null_rows_keeps_partial_rows() {
        let ds = sample();
        let out = ds.drop_fully_null_rows();
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows[1][0], Value::Int64(3));
    }

    #[test]
    fn map_column_touches_only_target_column() {
        let ds = sample();
        let out = ds.map_column("name", |v| match v.as_str() {
            Some(s) => Value::Utf8(s.to_uppercase()),
            None => Value::Null,
        });
        assert_eq!(out.rows[0][1], Value::Utf8("A".to_string()));
        assert_eq!(out.rows[0][0], Value::Int64(1));
    }

    #[test]
    fn map_column_on_missing_column_is_identity() {
        let ds = sample();
        let out = ds.map_column("missing", |_| Value::Null);
        assert_eq!(out, ds);
    }

    #[test]
    fn empty_dataset_is_shapeless() {
        assert!(DataSet::empty().is_shapeless());
        assert!(!sample().is_shapeless());
    }
}
