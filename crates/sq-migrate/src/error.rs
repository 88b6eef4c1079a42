//! Error types for sq-migrate

use crate::script::Direction;
use sq_db::DbError;
use sq_sql::SqlError;
use thiserror::Error;

/// A migration script, or the discovered set of scripts, is malformed.
///
/// All of these are raised at discovery or validation time, before any
/// script has touched the store.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// Migrations directory could not be scanned (M001)
    #[error("[M001] failed to scan migrations directory {path}: {source}")]
    Scan {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Script file could not be read (M002)
    #[error("[M002] failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Declarative script text is malformed (M003)
    #[error("[M003] {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: SqlError,
    },

    /// Procedural script does not declare a user_version (M004)
    #[error("[M004] {path}: missing declared user_version")]
    MissingUserVersion { path: String },

    /// Procedural script has no main entry point (M005)
    #[error("[M005] {path}: missing 'main' entry point")]
    MissingMain { path: String },

    /// File name carries a sequence number outside the counter range (M006)
    #[error("[M006] invalid sequence number in {path}")]
    InvalidSequence { path: String },

    /// No migration scripts were found (M007)
    #[error("[M007] no migration scripts found")]
    NoScripts,

    /// Sequence 0 is reserved to mean "empty store" (M008)
    #[error("[M008] sequence 0 is not allowed: {path}")]
    SequenceZero { path: String },

    /// Two scripts in one direction share a sequence number (M009)
    #[error("[M009] duplicate sequence number {sequence} ({direction})")]
    DuplicateSequence { sequence: u32, direction: Direction },

    /// An up script has no down counterpart, or vice versa (M010)
    #[error("[M010] missing {missing} script for sequence {sequence}")]
    MissingPair { sequence: u32, missing: Direction },

    /// A script declares a version inconsistent with its chain position (M011)
    #[error("[M011] inconsistent user_version in {path}: declares {declared}, expected {expected}")]
    InconsistentVersion {
        path: String,
        declared: u32,
        expected: u32,
    },
}

/// Errors from one migrate run
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The chain could not be built; the store was not touched
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// Store-level failure outside a script step
    #[error(transparent)]
    Db(#[from] DbError),

    /// Requested version is outside the discovered chain (R001)
    #[error("[R001] no {direction} migration path from version {version}")]
    NoPath { version: u32, direction: Direction },

    /// Applying a script failed; the store stays at its pre-step version (R002)
    #[error("[R002] applying {path} (sequence {sequence}, {direction}) failed: {source}")]
    Apply {
        path: String,
        sequence: u32,
        direction: Direction,
        #[source]
        source: DbError,
    },
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
