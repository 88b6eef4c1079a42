//! Migration script model
//!
//! A script is an immutable value: where it came from, the sequence number
//! and direction parsed from its file name, the `user_version` it declares,
//! and an apply operation. Declarative SQL text and hosted procedural
//! scripts satisfy the same contract.

use crate::error::ScriptError;
use crate::host::{Bindings, MainFn};
use sq_db::{DbResult, SqliteStore};
use std::fmt;
use std::path::{Path, PathBuf};

/// Direction a script moves the schema in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Declarative SQL migration script.
///
/// The text is applied as one batch; the script's own BEGIN/COMMIT wrapper
/// makes the step atomic.
#[derive(Debug, Clone)]
pub struct SqlScript {
    path: PathBuf,
    sequence: u32,
    direction: Direction,
    user_version: u32,
    text: String,
}

impl SqlScript {
    /// Parse the script text and capture the version it declares.
    pub fn new(
        path: PathBuf,
        sequence: u32,
        direction: Direction,
        text: String,
    ) -> Result<Self, ScriptError> {
        let user_version =
            sq_sql::declared_user_version(&text).map_err(|source| ScriptError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self {
            path,
            sequence,
            direction,
            user_version,
            text,
        })
    }
}

/// Procedural migration script resolved through a [`crate::host::ScriptHost`].
#[derive(Clone)]
pub struct CodeScript {
    path: PathBuf,
    sequence: u32,
    direction: Direction,
    user_version: u32,
    main: MainFn,
}

impl CodeScript {
    /// Check the script's bindings and capture them.
    pub fn new(
        path: PathBuf,
        sequence: u32,
        direction: Direction,
        bindings: Bindings,
    ) -> Result<Self, ScriptError> {
        let user_version = bindings
            .user_version
            .ok_or_else(|| ScriptError::MissingUserVersion {
                path: path.display().to_string(),
            })?;
        let main = bindings.main.ok_or_else(|| ScriptError::MissingMain {
            path: path.display().to_string(),
        })?;
        Ok(Self {
            path,
            sequence,
            direction,
            user_version,
            main,
        })
    }
}

impl fmt::Debug for CodeScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeScript")
            .field("path", &self.path)
            .field("sequence", &self.sequence)
            .field("direction", &self.direction)
            .field("user_version", &self.user_version)
            .finish_non_exhaustive()
    }
}

/// A migration script of either kind
#[derive(Debug, Clone)]
pub enum Script {
    Sql(SqlScript),
    Code(CodeScript),
}

impl Script {
    /// Origin of the script inside the migrations directory
    pub fn path(&self) -> &Path {
        match self {
            Script::Sql(s) => &s.path,
            Script::Code(s) => &s.path,
        }
    }

    /// Sequence number parsed from the file name
    pub fn sequence(&self) -> u32 {
        match self {
            Script::Sql(s) => s.sequence,
            Script::Code(s) => s.sequence,
        }
    }

    /// Direction parsed from the file name
    pub fn direction(&self) -> Direction {
        match self {
            Script::Sql(s) => s.direction,
            Script::Code(s) => s.direction,
        }
    }

    /// Version the store is at immediately after this script applies
    pub fn user_version(&self) -> u32 {
        match self {
            Script::Sql(s) => s.user_version,
            Script::Code(s) => s.user_version,
        }
    }

    /// Apply the script to the store.
    ///
    /// Applies regardless of the store's current version; the runner decides
    /// whether this is the right step.
    pub fn apply(&self, store: &SqliteStore) -> DbResult<()> {
        match self {
            Script::Sql(s) => store.execute_batch(&s.text),
            Script::Code(s) => store.run_script(s.user_version, |conn| (s.main.as_ref())(conn)),
        }
    }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
