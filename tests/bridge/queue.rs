//! Queue family

use crate::common::*;
use kvbridge::{FailureKind, Value};

#[test]
fn push_one_or_many() {
    let mut t = create_db();
    assert_eq!(t.ok("qpush", &[s("jobs"), s("a")]), vec![int(1)]);
    assert_eq!(t.ok("qpush", &[s("jobs"), list(&["b", "c"])]), vec![int(3)]);
    assert_eq!(t.ok("qpush", &[s("jobs"), int(4)]), vec![int(4)]);
    assert_eq!(
        t.ok("qslice", &[s("jobs"), int(0), int(-1)]),
        vec![list(&["a", "b", "c", "4"])]
    );
}

#[test]
fn pop_single_is_fifo() {
    let mut t = create_db();
    t.ok("qpush", &[s("q"), list(&["first", "second"])]);
    assert_eq!(t.ok("qpop", &[s("q")]), vec![s("first")]);
    assert_eq!(t.ok("qpop", &[s("q"), Value::Nil]), vec![s("second")]);
    assert_eq!(
        t.fail("qpop", &[s("q")]),
        (FailureKind::NotFound, "not_found".to_string())
    );
}

#[test]
fn pop_with_count_returns_list() {
    let mut t = create_db();
    t.ok("qpush", &[s("q"), list(&["a", "b", "c"])]);
    assert_eq!(t.ok("qpop", &[s("q"), int(2)]), vec![list(&["a", "b"])]);
    assert_eq!(t.ok("qpop", &[s("q"), int(5)]), vec![list(&["c"])]);
    assert_eq!(t.ok("qpop", &[s("q"), int(1)]), vec![list(&[])]);
}

#[test]
fn qclear_returns_no_data() {
    let mut t = create_db();
    t.ok("qpush", &[s("q"), list(&["a", "b"])]);
    assert_eq!(t.ok("qclear", &[s("q")]), vec![]);
    assert_eq!(t.ok("qslice", &[s("q"), int(0), int(-1)]), vec![list(&[])]);
}

#[test]
fn qslice_bounds() {
    let mut t = create_db();
    t.ok("qpush", &[s("q"), list(&["a", "b", "c", "d"])]);
    assert_eq!(
        t.ok("qslice", &[s("q"), int(1), int(2)]),
        vec![list(&["b", "c"])]
    );
    assert_eq!(
        t.ok("qslice", &[s("q"), int(-2), int(-1)]),
        vec![list(&["c", "d"])]
    );
    assert_eq!(
        t.ok("qslice", &[s("q"), int(0), int(100)]),
        vec![list(&["a", "b", "c", "d"])]
    );
    assert_eq!(t.ok("qslice", &[s("q"), int(3), int(1)]), vec![list(&[])]);
}
