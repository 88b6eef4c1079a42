//! sq-migrate - incremental schema migrations for SQLite
//!
//! Migrations are applied incrementally: an initial schema (sequence 1) and
//! a series of up/down scripts, each declaring the `PRAGMA user_version` the
//! store is at after it runs. Scripts are discovered from a directory by
//! file name (`<sequence><anything>.<up|down>.<py|sql>`), validated into an
//! unambiguous chain, and applied one atomic step at a time until the store
//! reaches the requested version.
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> Result<(), sq_migrate::MigrateError> {
//! let version = sq_migrate::migrate(
//!     Path::new("db.sqlite3"),
//!     Path::new("migrations"),
//!     None, // latest
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! Procedural (`.py`) scripts are resolved through a [`ScriptHost`]: the
//! file marks the script's place in the chain, and the embedding
//! application registers the behavior behind it:
//!
//! ```no_run
//! use std::path::Path;
//! use sq_migrate::{Bindings, Migrator, Registry};
//!
//! # fn main() -> Result<(), sq_migrate::MigrateError> {
//! let mut registry = Registry::new();
//! registry.register(
//!     "2_add_value_column.up.py",
//!     Bindings::new().user_version(2).main(|db| {
//!         db.execute("ALTER TABLE Data ADD COLUMN value")?;
//!         Ok(())
//!     }),
//! );
//!
//! let version = Migrator::with_host(registry).migrate(
//!     Path::new("db.sqlite3"),
//!     Path::new("migrations"),
//!     None,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod checks;
pub mod discover;
pub mod error;
pub mod host;
pub mod runner;
pub mod script;

pub use chain::Chain;
pub use checks::check;
pub use discover::find_scripts;
pub use error::{MigrateError, MigrateResult, ScriptError};
pub use host::{Bindings, MainFn, Registry, ScriptHost};
pub use runner::Runner;
pub use script::{CodeScript, Direction, Script, SqlScript};

use sq_db::SqliteStore;
use std::path::Path;

/// Runs migration chains against a store, with a configurable host for
/// procedural scripts.
pub struct Migrator {
    host: Box<dyn ScriptHost>,
}

impl Default for Migrator {
    fn default() -> Self {
        Self {
            host: Box::new(Registry::new()),
        }
    }
}

impl Migrator {
    /// Migrator with no procedural scripts registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Migrator resolving procedural scripts through `host`
    pub fn with_host(host: impl ScriptHost + 'static) -> Self {
        Self {
            host: Box::new(host),
        }
    }

    /// Migrate the database at `db` to `version` (latest if `None`).
    ///
    /// The store file is only opened, and created if absent, after the
    /// script set validates; a broken chain never touches the database.
    pub fn migrate(
        &self,
        db: &Path,
        migrations: &Path,
        version: Option<u32>,
    ) -> MigrateResult<u32> {
        let (runner, target) = self.prepare(migrations, version)?;
        let store = SqliteStore::open(db)?;
        runner.migrate(&store, target)
    }

    /// Migrate an already-open store (e.g. in-memory) to `version`
    pub fn migrate_store(
        &self,
        store: &SqliteStore,
        migrations: &Path,
        version: Option<u32>,
    ) -> MigrateResult<u32> {
        let (runner, target) = self.prepare(migrations, version)?;
        runner.migrate(store, target)
    }

    fn prepare(&self, migrations: &Path, version: Option<u32>) -> MigrateResult<(Runner, u32)> {
        let scripts = discover::find_scripts(migrations, self.host.as_ref())?;
        let (up, down) = checks::check(scripts)?;
        let target =
            version.unwrap_or_else(|| up.last().map(Script::sequence).unwrap_or_default());
        Ok((Runner::new(up, down), target))
    }
}

/// Migrate the database at `db` to `version` (latest if `None`), using only
/// declarative scripts.
pub fn migrate(db: &Path, migrations: &Path, version: Option<u32>) -> MigrateResult<u32> {
    Migrator::new().migrate(db, migrations, version)
}
