//! Error types for sq-db

use thiserror::Error;

/// Store operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Failed to open the database (D001)
    #[error("[D001] failed to open database: {0}")]
    ConnectionError(String),

    /// Statement execution failed (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// user_version counter access failed (D003)
    #[error("[D003] failed to access user_version: {0}")]
    VersionCounter(String),

    /// Transaction begin/commit failed (D004)
    #[error("[D004] transaction failed: {0}")]
    Transaction(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}
