use plaindb::{Database, DatabaseOptions, DbError, Syntax};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to write a database file into a fresh temporary directory
fn write_db(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_open_and_read() {
    let (_dir, path) = write_db("[net]\n\t$host=localhost\n\t$port=8080\n");
    let db = Database::new(&path);

    assert!(db.is_parsed());
    assert_eq!(db.path(), path.as_path());
    assert_eq!(db.get_var("net", "host"), Some("localhost"));
    assert_eq!(db.get_var("net", "missing"), None);
}

#[test]
fn test_apply_changes_rewrites_file() {
    let (_dir, path) = write_db("[net]\n\t$host=localhost\n\t$port=8080\n");
    let mut db = Database::new(&path);

    db.change_var_value("net", "port", "9090").unwrap();
    // Nothing written until applied
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[net]\n\t$host=localhost\n\t$port=8080\n"
    );

    db.apply_changes().unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[net]\n\t$host=localhost\n\t$port=9090\n"
    );
}

#[test]
fn test_always_apply_writes_each_mutation() {
    let (_dir, path) = write_db("[a]\n");
    let mut db = Database::new(&path);
    db.set_always_apply(true);

    db.create_var("a", "x", "1").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[a]\n\t$x=1\n");

    db.create_section("a/b").unwrap();
    db.declare_var("a/b", "flag").unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[a]\n\t$x=1\n\t[a/b]\n\t\t$flag=empty\n"
    );

    db.add_comment("end").unwrap();
    db.add_comment("").unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[a]\n\t$x=1\n\t[a/b]\n\t\t$flag=empty\n\t\t#end\n\n"
    );

    db.delete_var("a", "x").unwrap();
    db.delete_section("a/b").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[a]\n");
}

#[test]
fn test_failed_mutation_does_not_write() {
    let (_dir, path) = write_db("[a]\n\t$x=1\n");
    let mut db = Database::new(&path);
    db.set_always_apply(true);
    fs::write(&path, "sentinel").unwrap();

    assert!(db.create_section("a").is_err());
    assert!(db.create_var("a", "x", "2").is_err());
    assert!(db.change_var_value("a", "x", "").is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "sentinel");
}

#[test]
fn test_auto_indent_off() {
    let (_dir, path) = write_db("[a]\n\t$x=1\n\t[a/b]\n\t\t$y=2\n");
    let mut db = Database::new(&path);
    db.set_auto_indent(false);
    db.apply_changes().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "[a]\n$x=1\n[a/b]\n$y=2\n");
}

#[test]
fn test_malformed_file() {
    let (_dir, path) = write_db("[a]\n\tnot a valid line\n");
    let db = Database::new(&path);
    assert!(!db.is_parsed());
}

#[test]
fn test_failed_reparse_keeps_previous_model() {
    let (_dir, path) = write_db("[a]\n\t$x=1\n");
    let mut db = Database::new(&path);
    assert!(db.is_parsed());

    fs::write(&path, "[a\n").unwrap();
    match db.reparse() {
        Err(DbError::ParseError { line, .. }) => assert_eq!(line, 1),
        other => panic!("Expected ParseError, got {:?}", other),
    }
    assert!(!db.is_parsed());
    assert_eq!(db.get_var("a", "x"), Some("1"));

    fs::write(&path, "[b]\n\t$y=2\n").unwrap();
    db.reparse().unwrap();
    assert!(db.is_parsed());
    assert_eq!(db.get_var("a", "x"), None);
    assert_eq!(db.get_var("b", "y"), Some("2"));
}

#[test]
fn test_create_new_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.db");

    let mut db = Database::new(&path);
    assert!(!db.is_parsed());

    db.create_section("fresh").unwrap();
    db.create_var("fresh", "key", "value").unwrap();
    db.apply_changes().unwrap();

    let reopened = Database::new(&path);
    assert!(reopened.is_parsed());
    assert_eq!(reopened.get_var("fresh", "key"), Some("value"));
}

#[test]
fn test_save_as() {
    let (dir, path) = write_db("[a]\n\t$x=1\n");
    let mut db = Database::new(&path);
    db.change_var_value("a", "x", "2").unwrap();

    let copy = dir.path().join("copy.db");
    db.save_as(&copy).unwrap();

    assert_eq!(fs::read_to_string(&copy).unwrap(), "[a]\n\t$x=2\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), "[a]\n\t$x=1\n");
    assert_eq!(db.path(), path.as_path());
}

#[test]
fn test_custom_options() {
    let (_dir, path) = write_db(";cfg\n[srv]\n  @port:80\n");
    let options = DatabaseOptions {
        always_apply: true,
        auto_indent: true,
        syntax: Syntax {
            comment: ';',
            var_start: '@',
            delimiter: ':',
            indent: ' ',
        },
    };
    let mut db = Database::with_options(&path, options);
    assert!(db.is_parsed());

    db.change_var_value("srv", "port", "8080").unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        ";cfg\n[srv]\n @port:8080\n"
    );
}

#[test]
fn test_write_failure_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing_dir").join("db.db");
    let mut db = Database::new(&path);

    db.create_section("a").unwrap();
    assert!(matches!(db.apply_changes(), Err(DbError::IoError { .. })));
}
