/// Errors from guest store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A guest with the same derived id is already stored.
    #[error("Guest with id {id} already exists")]
    Conflict { id: String },

    /// No guest matches the requested id.
    #[error("Guest with id {id} was not found")]
    NotFound { id: String },

    /// The backing file was loaded without an `id` column, so rows cannot
    /// be addressed for deletion.
    #[error("store has no identity column")]
    MissingIdentityColumn,

    /// A row in the durable file holds a value the schema cannot default.
    #[error("invalid row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    /// The durable file could not be parsed or written as CSV.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error from the underlying file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A writer panicked while holding the store lock.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
