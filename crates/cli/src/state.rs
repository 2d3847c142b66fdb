//! REPL session state: the bridge plus the current handle.

use kvbridge_executor::{Bridge, Handle, HandleState, Reply, Result, Value};
use tracing::info;

/// Mutable state for one CLI session.
pub struct SessionState {
    bridge: Bridge,
    handle: Handle,
    host: String,
    port: i64,
}

impl SessionState {
    /// Open the initial handle. The flag reports whether it is live.
    pub fn new(mut bridge: Bridge, host: &str, port: i64) -> (Self, bool) {
        let (handle, live) = bridge.connect(host, port);
        let state = Self {
            bridge,
            handle,
            host: host.to_string(),
            port,
        };
        (state, live)
    }

    /// Replace the current handle with a new connection.
    pub fn connect(&mut self, host: &str, port: i64) -> bool {
        self.bridge.finalize(self.handle);
        let (handle, live) = self.bridge.connect(host, port);
        info!(target: "kvbridge::cli", host, port, live, "Switched handle");
        self.handle = handle;
        self.host = host.to_string();
        self.port = port;
        live
    }

    /// Close the current handle. Later calls fail with a connection failure.
    pub fn close(&mut self) -> bool {
        self.bridge.close(self.handle)
    }

    /// Dispatch an operation on the current handle.
    pub fn execute(&mut self, op: &str, args: &[Value]) -> Result<Reply> {
        self.bridge.dispatch(self.handle, op, args)
    }

    /// Whether the current handle is live.
    pub fn is_live(&self) -> bool {
        self.bridge.state(self.handle) == HandleState::Live
    }

    /// One-line session summary.
    pub fn describe(&self) -> String {
        format!(
            "{}:{} {} ({})",
            self.host,
            self.port,
            self.handle,
            if self.is_live() { "live" } else { "dead" }
        )
    }

    /// The prompt string.
    pub fn prompt(&self) -> String {
        if self.is_live() {
            format!("{}:{}> ", self.host, self.port)
        } else {
            format!("{}:{} (dead)> ", self.host, self.port)
        }
    }

    /// The bridge, for introspection.
    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }
}

impl Drop for SessionState {
    fn drop(&mut self) {
        self.bridge.finalize(self.handle);
    }
}
