//! SQLite store backend

use crate::error::{DbError, DbResult};
use crate::script_conn::ScriptConn;
use rusqlite::Connection;
use std::path::Path;

/// Handle to a single-file SQLite store.
///
/// The store is exclusively owned by the migration runner for the duration
/// of a run; no other writer is assumed to touch the `user_version` counter
/// while a migrate call is in progress.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file, creating it if it does not exist
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open an in-memory database
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create from a path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(Path::new(path))
        }
    }

    /// Read the persisted schema version counter
    pub fn user_version(&self) -> DbResult<u32> {
        self.conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .map_err(|e| DbError::VersionCounter(e.to_string()))
    }

    /// Set the persisted schema version counter
    pub fn set_user_version(&self, version: u32) -> DbResult<()> {
        self.conn
            .pragma_update(None, "user_version", version)
            .map_err(|e| DbError::VersionCounter(e.to_string()))
    }

    /// Execute a batch of SQL statements as-is.
    ///
    /// Declarative migration scripts carry their own BEGIN/COMMIT wrapper,
    /// so the batch is the atomic unit. A failing batch can leave its
    /// transaction open on the connection; it is rolled back here so the
    /// store stays at the last committed version.
    pub fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let result = self.conn.execute_batch(sql);
        if result.is_err() && !self.conn.is_autocommit() {
            let _ = self.conn.execute_batch("ROLLBACK");
        }
        result.map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Run a procedural migration body inside one transaction.
    ///
    /// Sets `user_version` to `version`, hands the restricted handle to
    /// `main`, and commits. If `main` fails, the transaction rolls back and
    /// the counter keeps its previous value.
    pub fn run_script<F>(&self, version: u32, main: F) -> DbResult<()>
    where
        F: FnOnce(&ScriptConn<'_>) -> DbResult<()>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| DbError::Transaction(e.to_string()))?;
        tx.pragma_update(None, "user_version", version)
            .map_err(|e| DbError::VersionCounter(e.to_string()))?;
        main(&ScriptConn::new(&self.conn))?;
        tx.commit().map_err(|e| DbError::Transaction(e.to_string()))
    }

    /// Check if a table exists
    pub fn table_exists(&self, name: &str) -> DbResult<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
                |row| row.get(0),
            )
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count > 0)
    }

    /// Execute a query and return its row count (for tests)
    pub fn query_count(&self, sql: &str) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| {
                row.get(0)
            })
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;
