//! Common test utilities for bridge tests

use std::collections::HashMap;

use kvbridge::{Bridge, BridgeConfig, FailureKind, Handle, Reply, Value};
use kvbridge_client::{MemoryConnector, MemoryServer};

pub const HOST: &str = "127.0.0.1";
pub const PORT: i64 = 8888;

/// A bridge connected to one in-memory server.
pub struct TestDb {
    pub bridge: Bridge,
    pub server: MemoryServer,
    pub db: Handle,
}

impl TestDb {
    /// Dispatch on the default handle; caller errors panic.
    pub fn call(&mut self, op: &str, args: &[Value]) -> Reply {
        self.bridge
            .dispatch(self.db, op, args)
            .unwrap_or_else(|e| panic!("{} failed with caller error: {}", op, e))
    }

    /// Dispatch and require success.
    pub fn ok(&mut self, op: &str, args: &[Value]) -> Vec<Value> {
        match self.call(op, args) {
            Reply::Success(values) => values,
            Reply::Failure(kind, code) => panic!("{} failed: {} {}", op, kind, code),
        }
    }

    /// Dispatch and require a failure.
    pub fn fail(&mut self, op: &str, args: &[Value]) -> (FailureKind, String) {
        match self.call(op, args) {
            Reply::Failure(kind, code) => (kind, code),
            Reply::Success(values) => panic!("{} unexpectedly succeeded: {:?}", op, values),
        }
    }
}

/// Create a bridge with one live handle on a fresh server.
pub fn create_db() -> TestDb {
    create_db_with(BridgeConfig::default())
}

/// Same as [`create_db`] with a custom config.
pub fn create_db_with(config: BridgeConfig) -> TestDb {
    let mut connector = MemoryConnector::new();
    let server = connector.serve(HOST, PORT as u16);
    let mut bridge = Bridge::new(config, Box::new(connector)).unwrap();
    let (db, live) = bridge.connect(HOST, PORT);
    assert!(live);
    TestDb { bridge, server, db }
}

pub fn s(text: &str) -> Value {
    Value::from(text)
}

pub fn int(n: i64) -> Value {
    Value::Int(n)
}

pub fn list(items: &[&str]) -> Value {
    Value::List(items.iter().map(|i| i.to_string()).collect())
}

pub fn map(pairs: &[(&str, &str)]) -> Value {
    Value::Map(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    )
}

pub fn scores(pairs: &[(&str, i64)]) -> Value {
    Value::IntMap(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<HashMap<_, _>>(),
    )
}
