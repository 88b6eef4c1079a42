//! sq-db - SQLite store layer for sqlstep
//!
//! This crate wraps rusqlite with the small surface migrations need: the
//! persisted `user_version` counter, batch execution, a per-script
//! transaction scope, and the restricted connection handle passed to
//! procedural migration scripts.

pub mod error;
pub mod script_conn;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use script_conn::ScriptConn;
pub use sqlite::SqliteStore;

// Procedural migration bodies see rusqlite types (function contexts, value
// conversions) at the ScriptConn surface, so the crate is re-exported for
// host applications.
pub use rusqlite;
