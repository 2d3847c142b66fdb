//! Scalar KV family

use std::time::Duration;

use crate::common::*;
use kvbridge::{FailureKind, Reply};

#[test]
fn set_get_del() {
    let mut t = create_db();
    assert_eq!(t.ok("set", &[s("user:1"), s("Alice")]), vec![]);
    assert_eq!(t.ok("get", &[s("user:1")]), vec![s("Alice")]);
    t.ok("del", &[s("user:1")]);
    assert_eq!(
        t.fail("get", &[s("user:1")]),
        (FailureKind::NotFound, "not_found".to_string())
    );
}

#[test]
fn host_convention() {
    let mut t = create_db();
    t.ok("set", &[s("k"), s("v")]);
    let db = t.db;
    assert_eq!(
        t.bridge.call(db, "get", &[s("k")]).unwrap(),
        vec![kvbridge::Value::Bool(true), s("v")]
    );
    assert_eq!(
        t.bridge.call(db, "get", &[s("missing")]).unwrap(),
        vec![kvbridge::Value::Bool(false), s("notfound"), s("not_found")]
    );
}

#[test]
fn integer_values_are_stored_as_decimal_text() {
    let mut t = create_db();
    t.ok("set", &[s("n"), int(-42)]);
    assert_eq!(t.ok("get", &[s("n")]), vec![s("-42")]);
    t.ok("set", &[int(7), s("seven")]);
    assert_eq!(t.ok("get", &[s("7")]), vec![s("seven")]);
}

#[test]
fn inc_counts_from_zero() {
    let mut t = create_db();
    assert_eq!(t.ok("inc", &[s("hits"), int(5)]), vec![int(5)]);
    assert_eq!(t.ok("inc", &[s("hits"), s("3")]), vec![int(8)]);
    assert_eq!(t.ok("inc", &[s("hits"), int(-10)]), vec![int(-2)]);
    assert_eq!(t.ok("get", &[s("hits")]), vec![s("-2")]);
}

#[test]
fn inc_on_text_is_unknown_failure() {
    let mut t = create_db();
    t.ok("set", &[s("name"), s("alice")]);
    let (kind, code) = t.fail("inc", &[s("name"), int(1)]);
    assert_eq!(kind, FailureKind::Unknown);
    assert_eq!(code, "fail");
}

#[test]
fn set_ttl_expires() {
    let mut t = create_db();
    t.ok("set_ttl", &[s("session"), s("token"), int(10)]);
    t.ok("set", &[s("forever"), s("x")]);
    assert_eq!(t.ok("dbsize", &[]), vec![int(2)]);

    t.server.advance_clock(Duration::from_secs(5));
    assert_eq!(t.ok("get", &[s("session")]), vec![s("token")]);

    t.server.advance_clock(Duration::from_secs(6));
    assert_eq!(t.fail("get", &[s("session")]).0, FailureKind::NotFound);
    assert_eq!(t.ok("dbsize", &[]), vec![int(1)]);
}

#[test]
fn keys_scan_rscan_ranges() {
    let mut t = create_db();
    for k in ["a", "b", "c", "d"] {
        t.ok("set", &[s(k), s(&k.to_uppercase())]);
    }
    assert_eq!(
        t.ok("keys", &[s(""), s(""), int(10)]),
        vec![list(&["a", "b", "c", "d"])]
    );
    assert_eq!(
        t.ok("keys", &[s("a"), s("c"), int(10)]),
        vec![list(&["b", "c"])]
    );
    assert_eq!(
        t.ok("scan", &[s("a"), s("c"), int(10)]),
        vec![map(&[("b", "B"), ("c", "C")])]
    );
    assert_eq!(
        t.ok("rscan", &[s("d"), s("b"), int(10)]),
        vec![map(&[("b", "B"), ("c", "C")])]
    );
    assert_eq!(t.ok("keys", &[s(""), s(""), int(2)]), vec![list(&["a", "b"])]);
}

#[test]
fn negative_limit_returns_nothing() {
    let mut t = create_db();
    t.ok("set", &[s("a"), s("1")]);
    assert_eq!(t.ok("keys", &[s(""), s(""), int(-1)]), vec![list(&[])]);
}

#[test]
fn multi_ops() {
    let mut t = create_db();
    assert_eq!(
        t.ok("multi_set", &[map(&[("a", "1"), ("b", "2"), ("c", "3")])]),
        vec![int(3)]
    );
    assert_eq!(
        t.ok("multi_get", &[list(&["a", "c", "zz"])]),
        vec![map(&[("a", "1"), ("c", "3")])]
    );
    assert_eq!(t.ok("multi_del", &[list(&["a", "b", "zz"])]), vec![int(3)]);
    assert_eq!(t.ok("dbsize", &[]), vec![int(1)]);
}

#[test]
fn multi_set_accepts_score_maps() {
    let mut t = create_db();
    t.ok("multi_set", &[scores(&[("x", 10)])]);
    assert_eq!(t.ok("get", &[s("x")]), vec![s("10")]);
}

#[test]
fn kv_range_limits_writes() {
    let mut t = create_db();
    assert_eq!(t.ok("get_kv_range", &[]), vec![s(""), s("")]);
    t.ok("set_kv_range", &[s("m"), s("p")]);
    assert_eq!(t.ok("get_kv_range", &[]), vec![s("m"), s("p")]);

    t.ok("set", &[s("n"), s("inside")]);
    assert_eq!(
        t.call("set", &[s("z"), s("outside")]),
        Reply::Failure(FailureKind::Unknown, "out_of_range".to_string())
    );
    assert_eq!(t.fail("multi_set", &[map(&[("n", "1"), ("a", "2")])]).1, "out_of_range");
    assert_eq!(t.ok("get", &[s("n")]), vec![s("inside")]);
}

#[test]
fn set_ttl_with_huge_ttl_is_stored_without_expiry() {
    let mut t = create_db();
    assert_eq!(t.ok("set_ttl", &[s("k"), s("v"), int(i64::MAX)]), vec![]);
    t.server.advance_clock(Duration::from_secs(10 * 365 * 24 * 3600));
    assert_eq!(t.ok("get", &[s("k")]), vec![s("v")]);
}

#[test]
fn advancing_clock_past_its_range_does_not_panic() {
    let mut t = create_db();
    t.ok("set_ttl", &[s("k"), s("v"), int(5)]);
    t.server.advance_clock(Duration::MAX);
    assert_eq!(t.ok("get", &[s("k")]), vec![s("v")]);
}
