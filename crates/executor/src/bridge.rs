//! Host-facing facade.
//!
//! [`Bridge`] owns the handle table and the connector and exposes the
//! operations the scripting host sees: connect, call, close, finalize, and
//! introspection of the operation registry.

use std::fmt;

use kvbridge_client::Connector;
use kvbridge_core::Value;
use tracing::{info, warn};

use crate::config::BridgeConfig;
use crate::dispatch::{Dispatcher, Reply};
use crate::handles::{Handle, HandleState, HandleTable};
use crate::registry::{Descriptor, Registry};
use crate::Result;

/// The bridge between a scripting host and the store client.
///
/// # Example
///
/// ```ignore
/// use kvbridge_executor::{Bridge, BridgeConfig, Value};
/// use kvbridge_client::MemoryConnector;
///
/// let mut connector = MemoryConnector::new();
/// connector.serve("127.0.0.1", 8888);
/// let mut bridge = Bridge::new(BridgeConfig::default(), Box::new(connector))?;
///
/// let (db, ok) = bridge.connect("127.0.0.1", 8888);
/// assert!(ok);
/// bridge.call(db, "set", &["greeting".into(), "hello".into()])?;
/// let out = bridge.call(db, "get", &["greeting".into()])?;
/// assert_eq!(out, vec![Value::Bool(true), Value::from("hello")]);
/// ```
pub struct Bridge {
    registry: &'static Registry,
    handles: HandleTable,
    connector: Box<dyn Connector>,
    config: BridgeConfig,
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("operations", &self.registry.len())
            .field("handles", &self.handles)
            .field("config", &self.config)
            .finish()
    }
}

impl Bridge {
    /// Create a bridge.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the builtin
    /// operation tables fail to build.
    pub fn new(config: BridgeConfig, connector: Box<dyn Connector>) -> Result<Self> {
        config.validate()?;
        let registry = Registry::global()?;
        info!(
            target: "kvbridge::bridge",
            operations = registry.len(),
            max_live_handles = config.max_live_handles,
            "Bridge ready"
        );
        Ok(Self {
            registry,
            handles: HandleTable::new(config.max_live_handles),
            connector,
            config,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Connect to `host:port`.
    ///
    /// Always returns a handle. The flag is `false`, and the handle dead,
    /// for an empty host, a port outside `1..=65535`, a refused connection,
    /// or when the live handle limit is reached.
    pub fn connect(&mut self, host: &str, port: i64) -> (Handle, bool) {
        let port = match u16::try_from(port) {
            Ok(port) if port != 0 => port,
            _ => {
                warn!(target: "kvbridge::handles", host, port, "Invalid port");
                return (self.handles.insert_dead(), false);
            }
        };
        if host.is_empty() {
            warn!(target: "kvbridge::handles", port, "Empty host");
            return (self.handles.insert_dead(), false);
        }
        if !self.handles.has_capacity() {
            warn!(
                target: "kvbridge::handles",
                host,
                port,
                max_live = self.handles.max_live(),
                "Live handle limit reached"
            );
            return (self.handles.insert_dead(), false);
        }
        match self.connector.connect(host, port) {
            Ok(conn) => {
                let handle = self.handles.insert_live(conn);
                let live = self.handles.state(handle) == HandleState::Live;
                (handle, live)
            }
            Err(e) => {
                warn!(target: "kvbridge::handles", host, port, error = %e, "Connect failed");
                (self.handles.insert_dead(), false)
            }
        }
    }

    /// Connect to the configured default address.
    pub fn connect_default(&mut self) -> (Handle, bool) {
        let host = self.config.default_host.clone();
        let port = i64::from(self.config.default_port);
        self.connect(&host, port)
    }

    /// Run an operation and return the host calling convention.
    pub fn call(&mut self, handle: Handle, name: &str, args: &[Value]) -> Result<Vec<Value>> {
        self.dispatch(handle, name, args).map(Reply::into_host)
    }

    /// Run an operation.
    pub fn dispatch(&mut self, handle: Handle, name: &str, args: &[Value]) -> Result<Reply> {
        Dispatcher::new(self.registry).dispatch(&mut self.handles, handle, name, args)
    }

    /// Close a handle. Returns `false` if it was not live.
    pub fn close(&mut self, handle: Handle) -> bool {
        self.handles.close(handle)
    }

    /// Release a handle. Idempotent.
    pub fn finalize(&mut self, handle: Handle) -> bool {
        self.handles.finalize(handle)
    }

    /// State of a handle.
    pub fn state(&self, handle: Handle) -> HandleState {
        self.handles.state(handle)
    }

    /// Number of live handles.
    pub fn live_handles(&self) -> usize {
        self.handles.live_count()
    }

    /// Operation names, by family then name.
    pub fn operations(&self) -> &[&'static str] {
        self.registry.names()
    }

    /// Descriptor of an operation.
    pub fn describe(&self, name: &str) -> Option<&Descriptor> {
        self.registry.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvbridge_client::{Script, ScriptedConnector};

    fn bridge(connector: ScriptedConnector, max_live: usize) -> Bridge {
        let config = BridgeConfig {
            max_live_handles: max_live,
            ..BridgeConfig::default()
        };
        Bridge::new(config, Box::new(connector)).unwrap()
    }

    #[test]
    fn test_connect_success() {
        let mut b = bridge(ScriptedConnector::new(Script::ok()), 0);
        let (h, ok) = b.connect("db", 8888);
        assert!(ok);
        assert_eq!(b.state(h), HandleState::Live);
    }

    #[test]
    fn test_connect_rejects_bad_addresses() {
        let mut b = bridge(ScriptedConnector::new(Script::ok()), 0);
        for (host, port) in [("", 8888), ("db", 0), ("db", 65536), ("db", -1)] {
            let (h, ok) = b.connect(host, port);
            assert!(!ok, "{}:{}", host, port);
            assert_eq!(b.state(h), HandleState::Dead);
        }
        assert_eq!(b.live_handles(), 0);
    }

    #[test]
    fn test_refused_connection_yields_dead_handle() {
        let mut b = bridge(ScriptedConnector::refusing(), 0);
        let (h, ok) = b.connect("db", 8888);
        assert!(!ok);
        let out = b.call(h, "get", &["k".into()]).unwrap();
        assert_eq!(
            out,
            vec![
                Value::Bool(false),
                Value::from("connection"),
                Value::from("invalid handle")
            ]
        );
    }

    #[test]
    fn test_live_limit() {
        let connector = ScriptedConnector::new(Script::ok());
        let log = connector.log();
        let mut b = bridge(connector, 1);
        let (first, ok) = b.connect("db", 8888);
        assert!(ok);
        let (_, ok) = b.connect("db", 8888);
        assert!(!ok);
        b.close(first);
        let (_, ok) = b.connect("db", 8888);
        assert!(ok);
        assert_eq!(log.count(), 0);
    }

    #[test]
    fn test_close_then_call_is_connection_failure() {
        let mut b = bridge(ScriptedConnector::new(Script::ok()), 0);
        let (h, _) = b.connect("db", 8888);
        assert!(b.close(h));
        let reply = b.dispatch(h, "dbsize", &[]).unwrap();
        assert!(!reply.is_success());
        assert!(b.finalize(h));
        assert!(!b.finalize(h));
    }

    #[test]
    fn test_connect_default_uses_config() {
        let mut b = bridge(ScriptedConnector::new(Script::ok()), 0);
        let (_, ok) = b.connect_default();
        assert!(ok);
    }

    #[test]
    fn test_introspection() {
        let b = bridge(ScriptedConnector::new(Script::ok()), 0);
        assert!(b.operations().contains(&"qpush"));
        let d = b.describe("zrange").unwrap();
        assert_eq!(d.params.len(), 3);
        assert!(b.describe("nope").is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BridgeConfig {
            default_port: 0,
            ..BridgeConfig::default()
        };
        assert!(Bridge::new(config, Box::new(ScriptedConnector::new(Script::ok()))).is_err());
    }
}
