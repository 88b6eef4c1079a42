//! Migration runner
//!
//! Walks the chain from the store's current `user_version` to a target
//! version, one script per step. The version is re-read before every step;
//! applying a script is the only thing that changes it. A step either
//! commits or rolls back whole, so a failure leaves the store at the last
//! committed version and halts the run.

use crate::chain::Chain;
use crate::error::{MigrateError, MigrateResult};
use crate::script::{Direction, Script};
use sq_db::SqliteStore;

/// Drives a store from its current version to a requested version
pub struct Runner {
    chain: Chain,
}

impl Runner {
    /// Assumes `up` and `down` have been checked and sorted.
    pub fn new(up: Vec<Script>, down: Vec<Script>) -> Self {
        Self {
            chain: Chain::build(up, down),
        }
    }

    fn step(&self, store: &SqliteStore, script: &Script) -> MigrateResult<()> {
        log::debug!(
            "applying {} ({} -> user_version {})",
            script.path().display(),
            script.direction(),
            script.user_version()
        );
        script.apply(store).map_err(|source| MigrateError::Apply {
            path: script.path().display().to_string(),
            sequence: script.sequence(),
            direction: script.direction(),
            source,
        })
    }

    /// Migrate up to `target`
    pub fn migrate_up(&self, store: &SqliteStore, target: u32) -> MigrateResult<u32> {
        loop {
            let current = store.user_version()?;
            if current >= target {
                break;
            }
            let script =
                self.chain
                    .next(current, Direction::Up)
                    .ok_or(MigrateError::NoPath {
                        version: current,
                        direction: Direction::Up,
                    })?;
            if script.user_version() > target {
                break;
            }
            self.step(store, script)?;
        }
        Ok(store.user_version()?)
    }

    /// Migrate down to `target`
    pub fn migrate_down(&self, store: &SqliteStore, target: u32) -> MigrateResult<u32> {
        loop {
            let current = store.user_version()?;
            if current <= target {
                break;
            }
            let script =
                self.chain
                    .next(current, Direction::Down)
                    .ok_or(MigrateError::NoPath {
                        version: current,
                        direction: Direction::Down,
                    })?;
            if script.user_version() < target {
                break;
            }
            self.step(store, script)?;
        }
        Ok(store.user_version()?)
    }

    /// Migrate to `target`, choosing the direction from the store's current
    /// version. Returns the version the store lands on.
    pub fn migrate(&self, store: &SqliteStore, target: u32) -> MigrateResult<u32> {
        let current = store.user_version()?;
        if current == target {
            return Ok(target);
        }
        if current < target {
            self.migrate_up(store, target)
        } else {
            self.migrate_down(store, target)
        }
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
