//! kvbridge - an SSDB-style key-value client exposed to an embedded
//! scripting host
//!
//! The host sees one operation per store command (scalar KV, hash maps,
//! queues, sorted sets), dynamic argument values, and a uniform
//! `status, data...` reply convention.
//!
//! # Quick Start
//!
//! ```ignore
//! use kvbridge::{Bridge, BridgeConfig, Value};
//! use kvbridge_client::MemoryConnector;
//!
//! let mut connector = MemoryConnector::new();
//! connector.serve("127.0.0.1", 8888);
//! let mut bridge = Bridge::new(BridgeConfig::default(), Box::new(connector))?;
//!
//! let (db, ok) = bridge.connect("127.0.0.1", 8888);
//! bridge.call(db, "qpush", &["jobs".into(), "a".into()])?;
//! let out = bridge.call(db, "qpop", &["jobs".into()])?;
//! // [true, "a"]
//! ```
//!
//! # Architecture
//!
//! Every call goes through the [`Dispatcher`]: registry lookup, argument
//! validation and marshaling, the native client call, status translation,
//! and result marshaling. [`Bridge`] wraps it with the handle table.

// Re-export the public API from kvbridge-executor
pub use kvbridge_executor::*;
