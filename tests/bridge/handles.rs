//! Handle lifecycle through the bridge

use crate::common::*;
use kvbridge::{BridgeConfig, FailureKind, HandleState, Reply, INVALID_HANDLE};

fn invalid_handle() -> Reply {
    Reply::Failure(FailureKind::Connection, INVALID_HANDLE.to_string())
}

#[test]
fn handles_share_server_state() {
    let mut t = create_db();
    let (other, live) = t.bridge.connect(HOST, PORT);
    assert!(live);
    assert_ne!(other, t.db);

    t.ok("set", &[s("shared"), s("yes")]);
    assert_eq!(
        t.bridge.dispatch(other, "get", &[s("shared")]).unwrap(),
        Reply::Success(vec![s("yes")])
    );
}

#[test]
fn closed_handle_fails_every_operation() {
    let mut t = create_db();
    let db = t.db;
    assert!(t.bridge.close(db));
    assert_eq!(t.bridge.state(db), HandleState::Dead);
    for op in ["dbsize", "get_kv_range"] {
        assert_eq!(t.bridge.dispatch(db, op, &[]).unwrap(), invalid_handle());
    }
    assert_eq!(t.call("get", &[s("k")]), invalid_handle());
}

#[test]
fn dead_handle_check_precedes_lookup() {
    let mut t = create_db();
    let db = t.db;
    t.bridge.close(db);
    assert_eq!(t.bridge.dispatch(db, "no_such_op", &[]).unwrap(), invalid_handle());
}

#[test]
fn closing_one_handle_leaves_others_live() {
    let mut t = create_db();
    let (other, _) = t.bridge.connect(HOST, PORT);
    t.bridge.close(other);
    assert_eq!(t.ok("dbsize", &[]), vec![int(0)]);
    assert_eq!(t.bridge.live_handles(), 1);
}

#[test]
fn refused_connect_returns_dead_handle() {
    let mut t = create_db();
    let (h, live) = t.bridge.connect(HOST, 9999);
    assert!(!live);
    assert_eq!(t.bridge.dispatch(h, "dbsize", &[]).unwrap(), invalid_handle());
    assert!(t.bridge.finalize(h));
}

#[test]
fn finalize_is_idempotent_and_stale_handles_stay_dead() {
    let mut t = create_db();
    let old = t.db;
    assert!(t.bridge.finalize(old));
    assert!(!t.bridge.finalize(old));

    let (fresh, live) = t.bridge.connect(HOST, PORT);
    assert!(live);
    assert_ne!(fresh, old);
    assert_eq!(t.bridge.state(old), HandleState::Dead);
    assert_eq!(t.bridge.dispatch(old, "dbsize", &[]).unwrap(), invalid_handle());
    assert_eq!(
        t.bridge.dispatch(fresh, "dbsize", &[]).unwrap(),
        Reply::Success(vec![int(0)])
    );
}

#[test]
fn server_outage_is_connection_failure() {
    let mut t = create_db();
    t.ok("set", &[s("k"), s("v")]);
    t.server.set_online(false);
    assert_eq!(
        t.call("get", &[s("k")]),
        Reply::Failure(FailureKind::Connection, "error".to_string())
    );
    t.server.set_online(true);
    assert_eq!(t.ok("get", &[s("k")]), vec![s("v")]);
}

#[test]
fn live_cap_from_config() {
    let mut t = create_db_with(BridgeConfig {
        max_live_handles: 2,
        ..BridgeConfig::default()
    });
    let (second, live) = t.bridge.connect(HOST, PORT);
    assert!(live);
    let (third, live) = t.bridge.connect(HOST, PORT);
    assert!(!live);
    assert_eq!(t.bridge.state(third), HandleState::Dead);

    t.bridge.close(second);
    let (_, live) = t.bridge.connect(HOST, PORT);
    assert!(live);
}
