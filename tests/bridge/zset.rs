//! Sorted set family

use crate::common::*;
use kvbridge::FailureKind;

fn leaderboard(t: &mut TestDb) {
    t.ok(
        "multi_zset",
        &[s("board"), scores(&[("alice", 30), ("bob", 10), ("carol", 20)])],
    );
}

#[test]
fn zset_zget_zdel() {
    let mut t = create_db();
    t.ok("zset", &[s("z"), s("m"), int(7)]);
    assert_eq!(t.ok("zget", &[s("z"), s("m")]), vec![int(7)]);
    t.ok("zset", &[s("z"), s("m"), s("9")]);
    assert_eq!(t.ok("zget", &[s("z"), s("m")]), vec![int(9)]);
    t.ok("zdel", &[s("z"), s("m")]);
    assert_eq!(
        t.fail("zget", &[s("z"), s("m")]),
        (FailureKind::NotFound, "not_found".to_string())
    );
}

#[test]
fn zincr_zsize_zclear() {
    let mut t = create_db();
    assert_eq!(t.ok("zincr", &[s("z"), s("m"), int(4)]), vec![int(4)]);
    assert_eq!(t.ok("zincr", &[s("z"), s("m"), int(-6)]), vec![int(-2)]);
    t.ok("zset", &[s("z"), s("n"), int(1)]);
    assert_eq!(t.ok("zsize", &[s("z")]), vec![int(2)]);
    assert_eq!(t.ok("zclear", &[s("z")]), vec![int(2)]);
    assert_eq!(t.ok("zsize", &[s("z")]), vec![int(0)]);
}

#[test]
fn zincr_overflow_fails() {
    let mut t = create_db();
    t.ok("zset", &[s("z"), s("m"), int(i64::MAX)]);
    assert_eq!(t.fail("zincr", &[s("z"), s("m"), int(1)]).0, FailureKind::Unknown);
}

#[test]
fn zrange_and_zrrange_return_scores() {
    let mut t = create_db();
    leaderboard(&mut t);
    assert_eq!(
        t.ok("zrange", &[s("board"), int(0), int(2)]),
        vec![scores(&[("bob", 10), ("carol", 20)])]
    );
    assert_eq!(
        t.ok("zrrange", &[s("board"), int(0), int(1)]),
        vec![scores(&[("alice", 30)])]
    );
    assert_eq!(
        t.ok("zrange", &[s("board"), int(1), int(10)]),
        vec![scores(&[("carol", 20), ("alice", 30)])]
    );
}

#[test]
fn zkeys_zscan_zrscan() {
    let mut t = create_db();
    leaderboard(&mut t);
    assert_eq!(
        t.ok("zkeys", &[s("board"), s(""), int(10), int(25), int(10)]),
        vec![list(&["bob", "carol"])]
    );
    assert_eq!(
        t.ok("zscan", &[s("board"), s(""), int(15), int(100), int(10)]),
        vec![scores(&[("carol", 20), ("alice", 30)])]
    );
    assert_eq!(
        t.ok("zrscan", &[s("board"), s(""), int(25), int(0), int(10)]),
        vec![scores(&[("carol", 20), ("bob", 10)])]
    );
}

#[test]
fn multi_zget_single_or_many() {
    let mut t = create_db();
    leaderboard(&mut t);
    assert_eq!(
        t.ok("multi_zget", &[s("board"), list(&["alice", "nobody"])]),
        vec![scores(&[("alice", 30)])]
    );
    assert_eq!(
        t.ok("multi_zget", &[s("board"), s("bob")]),
        vec![scores(&[("bob", 10)])]
    );
}

#[test]
fn multi_zset_accepts_numeric_text() {
    let mut t = create_db();
    t.ok("multi_zset", &[s("z"), map(&[("a", "5"), ("b", "-1")])]);
    assert_eq!(t.ok("zget", &[s("z"), s("b")]), vec![int(-1)]);
}

#[test]
fn multi_zset_rejects_non_numeric_scores() {
    let mut t = create_db();
    let db = t.db;
    let err = t
        .bridge
        .dispatch(db, "multi_zset", &[s("z"), map(&[("a", "high")])])
        .unwrap_err();
    assert!(matches!(err, kvbridge::Error::Argument { slot: 2, .. }), "{:?}", err);
}

#[test]
fn multi_zdel() {
    let mut t = create_db();
    leaderboard(&mut t);
    t.ok("multi_zdel", &[s("board"), list(&["alice", "bob"])]);
    assert_eq!(t.ok("zsize", &[s("board")]), vec![int(1)]);
}
