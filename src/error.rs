use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type EtlResult<T> = Result<T, EtlError>;

/// Error type shared across extraction, loading, and migration.
///
/// Parse/validation failures on individual cells are deliberately NOT errors:
/// field normalizers turn unparseable input into nulls and entity cleaners
/// apply their row policy (see [`crate::normalize`] and [`crate::clean`]).
/// This enum covers the failures that abort a pipeline step.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV extraction error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON extraction error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid or unreadable configuration (missing credential key, bad YAML).
    #[error("config error: {message}")]
    Config { message: String },

    /// A table name was requested that has no registered cleaning routine.
    ///
    /// This is a configuration error: no cleaning occurs and no upload is
    /// attempted for the table.
    #[error("no cleaning routine registered for table '{table}'")]
    UnknownTable { table: String },

    /// A storage operation failed. `context` names the offending statement
    /// or table so operators can locate the failure post-hoc.
    #[error("storage error on {context}: {message}")]
    Storage { context: String, message: String },

    /// A source fetch failed. Carries the URL involved.
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// The input does not have the shape the pipeline expects
    /// (missing columns, non-object JSON rows, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}

impl EtlError {
    /// Build a [`EtlError::Storage`] with statement/table context.
    pub fn storage(context: impl Into<String>, message: impl ToString) -> Self {
        EtlError::Storage {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Build a [`EtlError::Network`] carrying the URL involved.
    pub fn network(url: impl Into<String>, message: impl ToString) -> Self {
        EtlError::Network {
            url: url.into(),
            message: message.to_string(),
        }
    }
}
