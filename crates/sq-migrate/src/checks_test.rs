use super::*;
use crate::script::SqlScript;
use std::path::PathBuf;

fn script(sequence: u32, direction: Direction, declares: u32) -> Script {
    let text = format!(
        "BEGIN TRANSACTION;\n\
         PRAGMA user_version = {declares};\n\
         SELECT 1;\n\
         COMMIT;\n"
    );
    let path = PathBuf::from(format!("{sequence}_test.{direction}.sql"));
    Script::Sql(SqlScript::new(path, sequence, direction, text).unwrap())
}

fn up(sequence: u32) -> Script {
    script(sequence, Direction::Up, sequence)
}

/// Down script declaring the version below it in the chain.
fn down(sequence: u32) -> Script {
    script(sequence, Direction::Down, sequence - 1)
}

#[test]
fn test_check_splits_and_sorts() {
    let scripts = vec![up(2), down(1), up(1), down(2)];
    let (ups, downs) = check(scripts).unwrap();

    let up_seqs: Vec<u32> = ups.iter().map(Script::sequence).collect();
    let down_seqs: Vec<u32> = downs.iter().map(Script::sequence).collect();
    assert_eq!(up_seqs, vec![1, 2]);
    assert_eq!(down_seqs, vec![1, 2]);
}

#[test]
fn test_no_scripts() {
    assert!(matches!(check(vec![]), Err(ScriptError::NoScripts)));
}

#[test]
fn test_up_without_any_down() {
    let result = check(vec![up(1)]);
    assert!(matches!(result, Err(ScriptError::NoScripts)));
}

#[test]
fn test_sequence_zero_rejected() {
    let result = check(vec![script(0, Direction::Up, 0), script(0, Direction::Down, 0)]);
    assert!(matches!(result, Err(ScriptError::SequenceZero { .. })));
}

#[test]
fn test_duplicate_sequence() {
    let scripts = vec![up(1), up(1), down(1)];
    let result = check(scripts);
    assert!(matches!(
        result,
        Err(ScriptError::DuplicateSequence {
            sequence: 1,
            direction: Direction::Up,
        })
    ));
}

#[test]
fn test_missing_down_for_tail_sequence() {
    let scripts = vec![up(1), up(2), up(3), down(1), down(2)];
    let result = check(scripts);
    assert!(matches!(
        result,
        Err(ScriptError::MissingPair {
            sequence: 3,
            missing: Direction::Down,
        })
    ));
}

#[test]
fn test_missing_up_for_tail_sequence() {
    let scripts = vec![up(1), down(1), down(2)];
    let result = check(scripts);
    assert!(matches!(
        result,
        Err(ScriptError::MissingPair {
            sequence: 2,
            missing: Direction::Up,
        })
    ));
}

#[test]
fn test_mismatched_pair_cites_smaller_sequence() {
    let scripts = vec![up(1), up(3), down(1), down(2)];
    let result = check(scripts);
    assert!(matches!(
        result,
        Err(ScriptError::MissingPair {
            sequence: 2,
            missing: Direction::Up,
        })
    ));
}

#[test]
fn test_up_must_declare_own_sequence() {
    let scripts = vec![script(1, Direction::Up, 2), down(1)];
    let result = check(scripts);
    assert!(matches!(
        result,
        Err(ScriptError::InconsistentVersion {
            declared: 2,
            expected: 1,
            ..
        })
    ));
}

#[test]
fn test_first_down_must_declare_zero() {
    let scripts = vec![up(1), script(1, Direction::Down, 1)];
    let result = check(scripts);
    assert!(matches!(
        result,
        Err(ScriptError::InconsistentVersion {
            declared: 1,
            expected: 0,
            ..
        })
    ));
}

#[test]
fn test_down_must_declare_previous_sequence() {
    // The down script at 2 must return the store to version 1.
    let scripts = vec![up(1), up(2), down(1), script(2, Direction::Down, 2)];
    let result = check(scripts);
    assert!(matches!(
        result,
        Err(ScriptError::InconsistentVersion {
            declared: 2,
            expected: 1,
            ..
        })
    ));
}

#[test]
fn test_valid_chain_passes() {
    let scripts = vec![up(1), up(2), up(3), down(1), down(2), down(3)];
    let (ups, downs) = check(scripts).unwrap();
    assert_eq!(ups.len(), 3);
    assert_eq!(downs.len(), 3);
}
