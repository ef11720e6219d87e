//! Store error types.

use thiserror::Error;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Write rejected by a column constraint (NOT NULL, datatype)
    #[error("{0}")]
    Constraint(String),

    /// Any other engine failure
    #[error("{0}")]
    Sqlite(rusqlite::Error),

    /// Store worker has shut down
    #[error("Store is unavailable")]
    Unavailable,
}

impl StoreError {
    /// Returns true if the store rejected the statement's values.
    pub fn is_constraint(&self) -> bool {
        matches!(self, StoreError::Constraint(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Constraint(message.clone().unwrap_or_else(|| err.to_string()))
            }
            _ => StoreError::Sqlite(err),
        }
    }
}
