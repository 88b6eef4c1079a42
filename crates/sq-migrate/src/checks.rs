//! Consistency checks on the discovered script set
//!
//! Together the checks make the chain a total function from
//! (version, direction) to the next script: the runner never searches or
//! guesses. They run in a fixed order and stop at the first failure, before
//! anything has touched the store.

use crate::error::ScriptError;
use crate::script::{Direction, Script};

fn check_not_empty(up: &[Script], down: &[Script]) -> Result<(), ScriptError> {
    if up.is_empty() || down.is_empty() {
        return Err(ScriptError::NoScripts);
    }
    Ok(())
}

/// Sequence 0 is reserved: user_version 0 means "empty store".
fn check_no_sequence_zero(up: &[Script]) -> Result<(), ScriptError> {
    if let Some(first) = up.first() {
        if first.sequence() == 0 {
            return Err(ScriptError::SequenceZero {
                path: first.path().display().to_string(),
            });
        }
    }
    Ok(())
}

fn check_unique_sequences(scripts: &[Script], direction: Direction) -> Result<(), ScriptError> {
    for pair in scripts.windows(2) {
        if pair[0].sequence() == pair[1].sequence() {
            return Err(ScriptError::DuplicateSequence {
                sequence: pair[0].sequence(),
                direction,
            });
        }
    }
    Ok(())
}

/// Each up script must have a down script at the same sequence and vice
/// versa. Assumes both slices are sorted. An unmatched tail on either side
/// is an error too; the first unmatched sequence is the one reported.
fn check_matching_pairs(up: &[Script], down: &[Script]) -> Result<(), ScriptError> {
    for i in 0..up.len().max(down.len()) {
        match (up.get(i), down.get(i)) {
            (Some(u), Some(d)) if u.sequence() != d.sequence() => {
                let (sequence, missing) = if u.sequence() < d.sequence() {
                    (u.sequence(), Direction::Down)
                } else {
                    (d.sequence(), Direction::Up)
                };
                return Err(ScriptError::MissingPair { sequence, missing });
            }
            (Some(u), None) => {
                return Err(ScriptError::MissingPair {
                    sequence: u.sequence(),
                    missing: Direction::Down,
                });
            }
            (None, Some(d)) => {
                return Err(ScriptError::MissingPair {
                    sequence: d.sequence(),
                    missing: Direction::Up,
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Up scripts declare their own sequence. Each down script declares the
/// version the store returns to: 0 for the first, otherwise the previous
/// down script's sequence.
fn check_declared_versions(up: &[Script], down: &[Script]) -> Result<(), ScriptError> {
    for script in up {
        if script.user_version() != script.sequence() {
            return Err(ScriptError::InconsistentVersion {
                path: script.path().display().to_string(),
                declared: script.user_version(),
                expected: script.sequence(),
            });
        }
    }

    let mut expected = 0;
    for script in down {
        if script.user_version() != expected {
            return Err(ScriptError::InconsistentVersion {
                path: script.path().display().to_string(),
                declared: script.user_version(),
                expected,
            });
        }
        expected = script.sequence();
    }
    Ok(())
}

/// Validate the discovered set and split it into version-sorted up and down
/// sequences.
pub fn check(scripts: Vec<Script>) -> Result<(Vec<Script>, Vec<Script>), ScriptError> {
    let mut up = Vec::new();
    let mut down = Vec::new();
    for script in scripts {
        match script.direction() {
            Direction::Up => up.push(script),
            Direction::Down => down.push(script),
        }
    }
    up.sort_by_key(Script::sequence);
    down.sort_by_key(Script::sequence);

    check_not_empty(&up, &down)?;
    check_no_sequence_zero(&up)?;
    check_unique_sequences(&up, Direction::Up)?;
    check_unique_sequences(&down, Direction::Down)?;
    check_matching_pairs(&up, &down)?;
    check_declared_versions(&up, &down)?;
    Ok((up, down))
}

#[cfg(test)]
#[path = "checks_test.rs"]
mod tests;
