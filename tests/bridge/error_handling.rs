//! Caller errors vs store failures

use crate::common::*;
use kvbridge::{Error, Value};

fn caller_error(t: &mut TestDb, op: &str, args: &[Value]) -> Error {
    let db = t.db;
    t.bridge.dispatch(db, op, args).unwrap_err()
}

#[test]
fn unknown_operation() {
    let mut t = create_db();
    let err = caller_error(&mut t, "flushall", &[]);
    assert_eq!(
        err,
        Error::UnknownOperation {
            name: "flushall".into()
        }
    );
}

#[test]
fn missing_argument_names_the_slot() {
    let mut t = create_db();
    match caller_error(&mut t, "hset", &[s("h"), s("f")]) {
        Error::Argument {
            operation, slot, ..
        } => {
            assert_eq!(operation, "hset");
            assert_eq!(slot, 3);
        }
        other => panic!("Expected Argument, got {:?}", other),
    }
}

#[test]
fn too_many_arguments() {
    let mut t = create_db();
    let err = caller_error(&mut t, "get", &[s("a"), s("b")]);
    assert!(matches!(err, Error::Argument { slot: 2, .. }), "{:?}", err);
}

#[test]
fn wrong_shapes_are_rejected() {
    let mut t = create_db();
    let cases: Vec<(&str, Vec<Value>, usize)> = vec![
        ("get", vec![Value::Bool(true)], 1),
        ("set", vec![s("k"), list(&["v"])], 2),
        ("inc", vec![s("k"), s("lots")], 2),
        ("multi_get", vec![s("k")], 1),
        ("multi_set", vec![list(&["a", "b"])], 1),
        ("zset", vec![s("z"), s("m"), Value::Nil], 3),
    ];
    for (op, args, slot) in cases {
        let err = caller_error(&mut t, op, &args);
        match err {
            Error::Argument { slot: got, .. } => assert_eq!(got, slot, "{}", op),
            other => panic!("{}: expected Argument, got {:?}", op, other),
        }
    }
}

#[test]
fn caller_errors_do_not_touch_the_store() {
    let mut t = create_db();
    let _ = caller_error(&mut t, "set", &[s("k")]);
    assert_eq!(t.ok("dbsize", &[]), vec![int(0)]);
}

#[test]
fn error_messages_are_readable() {
    let mut t = create_db();
    let err = caller_error(&mut t, "get", &[]);
    let text = err.to_string();
    assert!(text.contains("#1"), "{}", text);
    assert!(text.contains("'get'"), "{}", text);
}

#[test]
fn every_operation_is_described() {
    let t = create_db();
    assert_eq!(t.bridge.operations().len(), 45);
    for name in t.bridge.operations() {
        let d = t.bridge.describe(name).unwrap();
        assert!(d.signature().starts_with(name));
    }
}
