//! `retail-etl` centralises multinational retail data from heterogeneous
//! sources into a Postgres star schema: five dimension tables
//! (`dim_users`, `dim_card_details`, `dim_store_details`, `dim_products`,
//! `dim_date_times`) and one fact table (`orders_table`).
//!
//! The primary entrypoint is [`pipeline::Pipeline`], which sequences
//! extract → clean → load → migrate per entity and finishes with the
//! constraint phase (dimension primary keys, then fact foreign keys).
//!
//! ## What flows through (per entity)
//!
//! 1. A source collaborator ([`extract::TabularSource`]) yields a raw,
//!    stringly-typed [`types::DataSet`]: a legacy database table, a
//!    document extract, a bucket CSV, or an HTTP API.
//! 2. The entity's cleaner ([`clean`]) applies its declarative column rules:
//!    each [`clean::ColumnRule`] pairs a field normalizer with a row policy
//!    for invalid cells (drop the row, null the cell, keep the raw value).
//! 3. The orchestrator checks live storage metadata, creates the destination
//!    table from the cleaned shape if absent, and bulk-inserts the rows.
//! 4. The migrator ([`migrate`]) tightens column types and, once every
//!    dimension is keyed, ties the fact table to them.
//!
//! ## Quick example: clean and load one entity
//!
//! ```rust
//! use retail_etl::clean::{self, Entity};
//! use retail_etl::extract::csv::dataset_from_csv_str;
//! use retail_etl::storage::{MemoryStorage, Storage};
//!
//! # fn main() -> Result<(), retail_etl::EtlError> {
//! let raw = dataset_from_csv_str(
//!     "date_of_birth,join_date,user_uuid\n\
//!      1979 February 01,2019-10-04,93caf182-e4e9-4c58-a977-9e12914b0899\n",
//! )?;
//! let cleaned = clean::clean(Entity::Users, &raw);
//! assert_eq!(cleaned.row_count(), 1);
//!
//! let storage = MemoryStorage::new();
//! storage.create_table("dim_users", &cleaned.schema)?;
//! storage.insert_rows("dim_users", &cleaned)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Quick example: a full run against Postgres
//!
//! Credentials come from a YAML file with five fixed keys; a missing key is
//! a fatal configuration error.
//!
//! ```no_run
//! use retail_etl::config::DbConfig;
//! use retail_etl::extract::{CsvFileSource, JsonHttpSource, SourceTable, TabularSource};
//! use retail_etl::pipeline::Pipeline;
//! use retail_etl::storage::PgStorage;
//!
//! # fn main() -> Result<(), retail_etl::EtlError> {
//! let source_db = PgStorage::new(DbConfig::from_yaml_path("source_creds.yaml")?);
//! let target = PgStorage::new(DbConfig::from_yaml_path("target_creds.yaml")?);
//!
//! let users = SourceTable::new(&source_db, "legacy_users");
//! let cards = CsvFileSource::new("card_details_extract.csv");
//! let dates = JsonHttpSource::new("https://data.example.com/date_details.json");
//!
//! let pipeline = Pipeline::new(&target);
//! let report = pipeline.run(&[
//!     ("dim_users", &users as &dyn TabularSource),
//!     ("dim_card_details", &cards),
//!     ("dim_date_times", &dates),
//! ]);
//! println!("loaded={} failed={}", report.entities_loaded, report.entities_failed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure policy
//!
//! Cell-level parse failures are never errors: normalizers yield nulls and
//! the entity's rules decide the row's fate. Step-level failures (storage,
//! network, configuration) are caught at the step, reported through the
//! [`observe::PipelineObserver`] with the offending statement/table/URL,
//! and contained; sibling entities still run. There is no retry logic
//! anywhere; the pipeline is judged by post-hoc inspection of the
//! destination schema.
//!
//! ## Modules
//!
//! - [`extract`]: source collaborators and raw CSV/JSON adapters
//! - [`normalize`]: cell-level field normalizers
//! - [`clean`]: per-entity cleaners over declarative column rules
//! - [`migrate`]: post-load type tightening and key creation
//! - [`storage`]: the relational seam and its backends
//! - [`pipeline`]: the sequential load orchestrator
//! - [`observe`]: step outcome reporting
//! - [`config`]: credential loading
//! - [`error`]: the error taxonomy

pub mod clean;
pub mod config;
pub mod error;
pub mod extract;
pub mod migrate;
pub mod normalize;
pub mod observe;
pub mod pipeline;
pub mod storage;
pub mod types;

pub use error::{EtlError, EtlResult};
