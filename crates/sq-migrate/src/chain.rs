//! Chain table: (version, direction) -> next script
//!
//! An explicit finite map built once per run from the validated, sorted
//! script lists. It is total over every version the chain can reach; a
//! lookup outside the chain returns `None` and the runner treats that as a
//! fatal condition rather than a silent no-op.

use crate::script::{Direction, Script};
use std::collections::HashMap;

/// Map from the store's observed version to the script that moves it one
/// step in a direction. Immutable for the lifetime of a run.
#[derive(Debug, Default)]
pub struct Chain {
    table: HashMap<(u32, Direction), Script>,
}

impl Chain {
    /// Build the table. Assumes `up` and `down` are checked and sorted.
    pub fn build(up: Vec<Script>, down: Vec<Script>) -> Self {
        let mut table = HashMap::new();

        // Up entries are keyed by the version they step from: 0 for the
        // first script, otherwise the previous script's sequence.
        let mut from = 0;
        for script in up {
            let sequence = script.sequence();
            table.insert((from, Direction::Up), script);
            from = sequence;
        }

        // Down entries are keyed by the version they step down from.
        for script in down {
            table.insert((script.sequence(), Direction::Down), script);
        }

        Self { table }
    }

    /// Script to run next from `version` in `direction`, if the chain
    /// reaches that version.
    pub fn next(&self, version: u32, direction: Direction) -> Option<&Script> {
        self.table.get(&(version, direction))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
#[path = "chain_test.rs"]
mod tests;
