//! Restricted connection handle for procedural migration scripts

use crate::error::{DbError, DbResult};
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::{Connection, ToSql};
use std::panic::UnwindSafe;

/// Capability-limited handle passed to a procedural script's entry point.
///
/// Exposes exactly two operations: execute a statement and register a
/// custom SQL function. Transaction control stays with the runner; scripts
/// never see the raw connection.
pub struct ScriptConn<'a> {
    conn: &'a Connection,
}

impl<'a> ScriptConn<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Execute a single SQL statement, returning the number of affected rows
    pub fn execute(&self, sql: &str) -> DbResult<usize> {
        self.conn
            .execute(sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    /// Register a scalar SQL function callable from migration statements
    pub fn create_scalar_function<F, T>(&self, name: &str, n_args: i32, f: F) -> DbResult<()>
    where
        F: FnMut(&Context<'_>) -> rusqlite::Result<T> + Send + UnwindSafe + 'static,
        T: ToSql,
    {
        self.conn
            .create_scalar_function(name, n_args, FunctionFlags::SQLITE_UTF8, f)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }
}

#[cfg(test)]
#[path = "script_conn_test.rs"]
mod tests;
