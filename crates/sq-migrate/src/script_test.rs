use super::*;
use sq_db::SqliteStore;

fn sql_text(user_version: u32) -> String {
    format!(
        "BEGIN TRANSACTION;\n\
         PRAGMA user_version = {user_version};\n\
         CREATE TABLE t{user_version} (x);\n\
         COMMIT;\n"
    )
}

#[test]
fn test_sql_script_parses_declared_version() {
    let script = SqlScript::new(
        PathBuf::from("3_test.up.sql"),
        3,
        Direction::Up,
        sql_text(3),
    )
    .unwrap();
    let script = Script::Sql(script);

    assert_eq!(script.sequence(), 3);
    assert_eq!(script.user_version(), 3);
    assert_eq!(script.direction(), Direction::Up);
}

#[test]
fn test_sql_script_rejects_missing_transaction() {
    let result = SqlScript::new(
        PathBuf::from("1_test.up.sql"),
        1,
        Direction::Up,
        "PRAGMA user_version = 1;\nCREATE TABLE t (x);\n".to_string(),
    );
    assert!(matches!(result, Err(ScriptError::Parse { .. })));
}

#[test]
fn test_sql_script_apply() {
    let store = SqliteStore::in_memory().unwrap();
    let script = Script::Sql(
        SqlScript::new(
            PathBuf::from("1_test.up.sql"),
            1,
            Direction::Up,
            sql_text(1),
        )
        .unwrap(),
    );

    script.apply(&store).unwrap();
    assert_eq!(store.user_version().unwrap(), 1);
    assert!(store.table_exists("t1").unwrap());
}

#[test]
fn test_code_script_requires_declared_version() {
    let result = CodeScript::new(
        PathBuf::from("1_test.up.py"),
        1,
        Direction::Up,
        Bindings::new().main(|_| Ok(())),
    );
    assert!(matches!(
        result,
        Err(ScriptError::MissingUserVersion { .. })
    ));
}

#[test]
fn test_code_script_requires_main() {
    let result = CodeScript::new(
        PathBuf::from("1_test.up.py"),
        1,
        Direction::Up,
        Bindings::new().user_version(1),
    );
    assert!(matches!(result, Err(ScriptError::MissingMain { .. })));
}

#[test]
fn test_code_script_apply() {
    let store = SqliteStore::in_memory().unwrap();
    let script = Script::Code(
        CodeScript::new(
            PathBuf::from("1_test.up.py"),
            1,
            Direction::Up,
            Bindings::new().user_version(1).main(|db| {
                db.execute("CREATE TABLE made_by_code (x)")?;
                Ok(())
            }),
        )
        .unwrap(),
    );

    script.apply(&store).unwrap();
    assert_eq!(store.user_version().unwrap(), 1);
    assert!(store.table_exists("made_by_code").unwrap());
}
