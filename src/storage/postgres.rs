//! Postgres storage backend.
//!
//! Each trait call opens a short-lived client, runs its statement batch, and
//! drops the connection. Handles never outlive one entity's step. Table
//! reflection always hits the live catalog; nothing is cached.

use postgres::types::{ToSql, Type};
use postgres::{Client, NoTls, Row};

use crate::config::DbConfig;
use crate::error::{EtlError, EtlResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

use super::Storage;

/// Postgres-backed [`Storage`].
pub struct PgStorage {
    config: DbConfig,
}

impl PgStorage {
    /// Create a backend from credentials. No connection is made until the
    /// first operation.
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    fn connect(&self) -> EtlResult<Client> {
        Client::connect(&self.config.connection_string(), NoTls)
            .map_err(|e| EtlError::storage(format!("{}:{}", self.config.host, self.config.port), e))
    }
}

impl Storage for PgStorage {
    fn table_names(&self) -> EtlResult<Vec<String>> {
        let mut client = self.connect()?;
        let rows = client
            .query(
                "SELECT table_name FROM information_schema.tables WHERE table_schema = 'public'",
                &[],
            )
            .map_err(|e| EtlError::storage("information_schema.tables", e))?;
        Ok(rows.iter().map(|r| r.get::<_, String>(0)).collect())
    }

    fn create_table(&self, name: &str, schema: &Schema) -> EtlResult<()> {
        let columns: Vec<String> = schema
            .fields
            .iter()
            .map(|f| format!("{} {}", quote_ident(&f.name), sql_type(&f.data_type)))
            .collect();
        let sql = format!(
            "CREATE TABLE {} ({})",
            quote_ident(name),
            columns.join(", ")
        );
        let mut client = self.connect()?;
        client
            .batch_execute(&sql)
            .map_err(|e| EtlError::storage(sql.clone(), e))
    }

    fn insert_rows(&self, name: &str, data: &DataSet) -> EtlResult<u64> {
        if data.rows.is_empty() {
            return Ok(0);
        }
        let columns: Vec<String> = data
            .schema
            .fields
            .iter()
            .map(|f| quote_ident(&f.name))
            .collect();
        let placeholders: Vec<String> =
            (1..=columns.len()).map(|i| format!("${i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(name),
            columns.join(", "),
            placeholders.join(", ")
        );

        let mut client = self.connect()?;
        let stmt = client
            .prepare(&sql)
            .map_err(|e| EtlError::storage(sql.clone(), e))?;
        let mut written = 0u64;
        for row in &data.rows {
            let owned: Vec<Box<dyn ToSql + Sync>> = row.iter().map(to_sql_value).collect();
            let params: Vec<&(dyn ToSql + Sync)> =
                owned.iter().map(|p| p.as_ref()).collect();
            written += client
                .execute(&stmt, &params)
                .map_err(|e| EtlError::storage(format!("insert into {name}"), e))?;
        }
        Ok(written)
    }

    fn execute(&self, sql: &str) -> EtlResult<u64> {
        let mut client = self.connect()?;
        client
            .execute(sql, &[])
            .map_err(|e| EtlError::storage(sql, e))
    }

    fn query(&self, sql: &str) -> EtlResult<DataSet> {
        let mut client = self.connect()?;
        let rows = client.query(sql, &[]).map_err(|e| EtlError::storage(sql, e))?;
        Ok(dataset_from_rows(&rows))
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn sql_type(dt: &DataType) -> &'static str {
    match dt {
        DataType::Int64 => "BIGINT",
        DataType::Float64 => "DOUBLE PRECISION",
        DataType::Bool => "BOOLEAN",
        DataType::Utf8 => "TEXT",
    }
}

fn to_sql_value(v: &Value) -> Box<dyn ToSql + Sync> {
    match v {
        Value::Null => Box::new(Option::<String>::None),
        Value::Int64(i) => Box::new(*i),
        Value::Float64(f) => Box::new(*f),
        Value::Bool(b) => Box::new(*b),
        Value::Utf8(s) => Box::new(s.clone()),
    }
}

fn dataset_from_rows(rows: &[Row]) -> DataSet {
    let Some(first) = rows.first() else {
        return DataSet::empty();
    };

    let fields: Vec<Field> = first
        .columns()
        .iter()
        .map(|c| Field::new(c.name(), data_type_for(c.type_())))
        .collect();
    let schema = Schema::new(fields);

    let out_rows = rows
        .iter()
        .map(|row| {
            row.columns()
                .iter()
                .enumerate()
                .map(|(i, col)| read_value(row, i, col.type_()))
                .collect()
        })
        .collect();

    DataSet::new(schema, out_rows)
}

fn data_type_for(ty: &Type) -> DataType {
    if *ty == Type::INT2 || *ty == Type::INT4 || *ty == Type::INT8 {
        DataType::Int64
    } else if *ty == Type::FLOAT4 || *ty == Type::FLOAT8 {
        DataType::Float64
    } else if *ty == Type::BOOL {
        DataType::Bool
    } else {
        DataType::Utf8
    }
}

fn read_value(row: &Row, idx: usize, ty: &Type) -> Value {
    if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)
            .ok()
            .flatten()
            .map(|v| Value::Int64(v as i64))
            .unwrap_or(Value::Null)
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx)
            .ok()
            .flatten()
            .map(|v| Value::Int64(v as i64))
            .unwrap_or(Value::Null)
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx)
            .ok()
            .flatten()
            .map(Value::Int64)
            .unwrap_or(Value::Null)
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)
            .ok()
            .flatten()
            .map(|v| Value::Float64(v as f64))
            .unwrap_or(Value::Null)
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx)
            .ok()
            .flatten()
            .map(Value::Float64)
            .unwrap_or(Value::Null)
    } else if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(idx)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null)
    } else if *ty == Type::DATE {
        row.try_get::<_, Option<chrono::NaiveDate>>(idx)
            .ok()
            .flatten()
            .map(|d| Value::Utf8(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null)
    } else if *ty == Type::TIMESTAMP {
        row.try_get::<_, Option<chrono::NaiveDateTime>>(idx)
            .ok()
            .flatten()
            .map(|d| Value::Utf8(d.format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or(Value::Null)
    } else {
        row.try_get::<_, Option<String>>(idx)
            .ok()
            .flatten()
            .map(Value::Utf8)
            .unwrap_or(Value::Null)
    }
}
