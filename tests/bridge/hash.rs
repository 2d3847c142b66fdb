//! Hash map family

use crate::common::*;
use kvbridge::FailureKind;

#[test]
fn hset_hget_hdel() {
    let mut t = create_db();
    t.ok("hset", &[s("user:1"), s("name"), s("Alice")]);
    assert_eq!(t.ok("hget", &[s("user:1"), s("name")]), vec![s("Alice")]);
    t.ok("hdel", &[s("user:1"), s("name")]);
    assert_eq!(
        t.fail("hget", &[s("user:1"), s("name")]),
        (FailureKind::NotFound, "not_found".to_string())
    );
}

#[test]
fn hincr_and_hsize() {
    let mut t = create_db();
    assert_eq!(t.ok("hincr", &[s("stats"), s("views"), int(2)]), vec![int(2)]);
    assert_eq!(t.ok("hincr", &[s("stats"), s("views"), int(3)]), vec![int(5)]);
    t.ok("hset", &[s("stats"), s("label"), s("home")]);
    assert_eq!(t.ok("hsize", &[s("stats")]), vec![int(2)]);
    assert_eq!(t.fail("hincr", &[s("stats"), s("label"), int(1)]).0, FailureKind::Unknown);
}

#[test]
fn hclear_reports_removed_fields() {
    let mut t = create_db();
    t.ok("multi_hset", &[s("h"), map(&[("a", "1"), ("b", "2")])]);
    assert_eq!(t.ok("hclear", &[s("h")]), vec![int(2)]);
    assert_eq!(t.ok("hsize", &[s("h")]), vec![int(0)]);
    assert_eq!(t.ok("hclear", &[s("h")]), vec![int(0)]);
}

#[test]
fn hkeys_hgetall_hscan() {
    let mut t = create_db();
    t.ok(
        "multi_hset",
        &[s("h"), map(&[("a", "1"), ("b", "2"), ("c", "3")])],
    );
    assert_eq!(
        t.ok("hkeys", &[s("h"), s(""), s(""), int(10)]),
        vec![list(&["a", "b", "c"])]
    );
    assert_eq!(
        t.ok("hgetall", &[s("h")]),
        vec![map(&[("a", "1"), ("b", "2"), ("c", "3")])]
    );
    assert_eq!(
        t.ok("hscan", &[s("h"), s("a"), s(""), int(10)]),
        vec![map(&[("b", "2"), ("c", "3")])]
    );
    assert_eq!(
        t.ok("hrscan", &[s("h"), s(""), s(""), int(1)]),
        vec![map(&[("c", "3")])]
    );
}

#[test]
fn missing_hash_reads_empty() {
    let mut t = create_db();
    assert_eq!(t.ok("hgetall", &[s("nope")]), vec![map(&[])]);
    assert_eq!(t.ok("hkeys", &[s("nope"), s(""), s(""), int(5)]), vec![list(&[])]);
    assert_eq!(t.ok("multi_hget", &[s("nope"), list(&["a"])]), vec![map(&[])]);
}

#[test]
fn multi_hget_and_multi_hdel() {
    let mut t = create_db();
    t.ok("multi_hset", &[s("h"), map(&[("a", "1"), ("b", "2")])]);
    assert_eq!(
        t.ok("multi_hget", &[s("h"), list(&["a", "x"])]),
        vec![map(&[("a", "1")])]
    );
    t.ok("multi_hdel", &[s("h"), list(&["a", "b"])]);
    assert_eq!(t.ok("hsize", &[s("h")]), vec![int(0)]);
}

#[test]
fn hashes_are_independent_of_kv() {
    let mut t = create_db();
    t.ok("hset", &[s("k"), s("f"), s("v")]);
    assert_eq!(t.fail("get", &[s("k")]).0, FailureKind::NotFound);
    assert_eq!(t.ok("dbsize", &[]), vec![int(0)]);
}
