use super::*;
use crate::host::Bindings;
use crate::script::{CodeScript, SqlScript};
use std::path::PathBuf;

fn up_script(sequence: u32) -> Script {
    let text = format!(
        "BEGIN TRANSACTION;\n\
         PRAGMA user_version = {sequence};\n\
         CREATE TABLE t{sequence} (x);\n\
         COMMIT;\n"
    );
    let path = PathBuf::from(format!("{sequence}_test.up.sql"));
    Script::Sql(SqlScript::new(path, sequence, Direction::Up, text).unwrap())
}

fn down_script(sequence: u32) -> Script {
    let declares = sequence - 1;
    let text = format!(
        "BEGIN TRANSACTION;\n\
         PRAGMA user_version = {declares};\n\
         DROP TABLE t{sequence};\n\
         COMMIT;\n"
    );
    let path = PathBuf::from(format!("{sequence}_test.down.sql"));
    Script::Sql(SqlScript::new(path, sequence, Direction::Down, text).unwrap())
}

fn runner(n: u32) -> Runner {
    Runner::new(
        (1..=n).map(up_script).collect(),
        (1..=n).map(down_script).collect(),
    )
}

#[test]
fn test_migrate_up_to_target() {
    let store = SqliteStore::in_memory().unwrap();
    let version = runner(3).migrate(&store, 3).unwrap();

    assert_eq!(version, 3);
    assert_eq!(store.user_version().unwrap(), 3);
    assert!(store.table_exists("t1").unwrap());
    assert!(store.table_exists("t2").unwrap());
    assert!(store.table_exists("t3").unwrap());
}

#[test]
fn test_migrate_stops_exactly_at_target() {
    let store = SqliteStore::in_memory().unwrap();
    let version = runner(3).migrate(&store, 2).unwrap();

    assert_eq!(version, 2);
    assert!(store.table_exists("t2").unwrap());
    assert!(!store.table_exists("t3").unwrap());
}

#[test]
fn test_migrate_is_idempotent() {
    let store = SqliteStore::in_memory().unwrap();
    let r = runner(2);

    assert_eq!(r.migrate(&store, 2).unwrap(), 2);
    assert_eq!(r.migrate(&store, 2).unwrap(), 2);
}

#[test]
fn test_migrate_down() {
    let store = SqliteStore::in_memory().unwrap();
    let r = runner(3);

    r.migrate(&store, 3).unwrap();
    let version = r.migrate(&store, 1).unwrap();

    assert_eq!(version, 1);
    assert!(store.table_exists("t1").unwrap());
    assert!(!store.table_exists("t2").unwrap());
    assert!(!store.table_exists("t3").unwrap());
}

#[test]
fn test_round_trip_restores_version() {
    let store = SqliteStore::in_memory().unwrap();
    let r = runner(2);

    assert_eq!(r.migrate(&store, 2).unwrap(), 2);
    assert_eq!(r.migrate(&store, 0).unwrap(), 0);
    assert!(!store.table_exists("t1").unwrap());
    assert!(!store.table_exists("t2").unwrap());
}

#[test]
fn test_target_outside_chain_fails_loudly() {
    let store = SqliteStore::in_memory().unwrap();
    let result = runner(2).migrate(&store, 5);

    assert!(matches!(
        result,
        Err(MigrateError::NoPath {
            version: 2,
            direction: Direction::Up,
        })
    ));
    // The reachable part of the chain was applied before the miss.
    assert_eq!(store.user_version().unwrap(), 2);
}

#[test]
fn test_failing_step_halts_at_last_committed_version() {
    let store = SqliteStore::in_memory().unwrap();
    let broken = Script::Sql(
        SqlScript::new(
            PathBuf::from("2_broken.up.sql"),
            2,
            Direction::Up,
            "BEGIN TRANSACTION;\n\
             PRAGMA user_version = 2;\n\
             CREATE TABLE t2 (x);\n\
             FROBNICATE;\n\
             COMMIT;\n"
                .to_string(),
        )
        .unwrap(),
    );
    let r = Runner::new(vec![up_script(1), broken], vec![down_script(1)]);

    let result = r.migrate(&store, 2);

    assert!(matches!(result, Err(MigrateError::Apply { sequence: 2, .. })));
    assert_eq!(store.user_version().unwrap(), 1);
    assert!(store.table_exists("t1").unwrap());
    assert!(!store.table_exists("t2").unwrap());
}

#[test]
fn test_code_script_step() {
    let store = SqliteStore::in_memory().unwrap();
    let code = Script::Code(
        CodeScript::new(
            PathBuf::from("2_by_code.up.py"),
            2,
            Direction::Up,
            Bindings::new().user_version(2).main(|db| {
                db.execute("CREATE TABLE t2 (x)")?;
                Ok(())
            }),
        )
        .unwrap(),
    );
    let r = Runner::new(vec![up_script(1), code], vec![]);

    assert_eq!(r.migrate(&store, 2).unwrap(), 2);
    assert!(store.table_exists("t1").unwrap());
    assert!(store.table_exists("t2").unwrap());
}
