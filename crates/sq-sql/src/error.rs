//! Error types for sq-sql

use thiserror::Error;

/// Declarative migration script parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlError {
    /// Script is not one BEGIN TRANSACTION ... COMMIT block (S001)
    #[error("[S001] script is not wrapped in a transaction")]
    NotWrappedInTransaction,

    /// Script does not set PRAGMA user_version first or last (S002)
    #[error("[S002] missing PRAGMA user_version (must be the first or last statement of the transaction)")]
    MissingUserVersion,

    /// Declared user_version does not fit the 32-bit counter (S003)
    #[error("[S003] declared user_version is out of range")]
    VersionOutOfRange,
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
