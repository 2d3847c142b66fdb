//! # kvbridge executor
//!
//! Exposes a key-value store client (SSDB-style: scalar KV, hash maps,
//! queues, sorted sets) to an embedded scripting host.
//!
//! This is the only crate hosts need to import. It provides:
//! - [`Bridge`] - connect, call, close, finalize
//! - [`Value`] - the closed set of host values
//! - [`Reply`] / [`Error`] - dispatch outcomes
//!
//! ## Quick Start
//!
//! ```text
//! use kvbridge_executor::{Bridge, BridgeConfig, Value};
//!
//! let mut bridge = Bridge::new(BridgeConfig::default(), Box::new(connector))?;
//! let (db, ok) = bridge.connect("127.0.0.1", 8888);
//!
//! bridge.call(db, "set", &["user:1".into(), "Alice".into()])?;
//! let out = bridge.call(db, "get", &["user:1".into()])?;
//! // [true, "Alice"]
//!
//! let out = bridge.call(db, "get", &["user:2".into()])?;
//! // [false, "notfound", "not_found"]
//! ```
//!
//! ## Operation Families
//!
//! | Family | Operations |
//! |--------|------------|
//! | **kv** | `get`, `set`, `set_ttl`, `del`, `inc`, `keys`, `scan`, `rscan`, `multi_*`, ... |
//! | **hash** | `hget`, `hset`, `hdel`, `hincr`, `hkeys`, `hgetall`, `hscan`, `multi_h*`, ... |
//! | **queue** | `qpush`, `qpop`, `qclear`, `qslice` |
//! | **zset** | `zset`, `zget`, `zincr`, `zrange`, `zkeys`, `zscan`, `multi_z*`, ... |
//!
//! ## Host Convention
//!
//! Every call returns a status flag followed by data:
//!
//! | Outcome | Values |
//! |---------|--------|
//! | Success | `true, data...` |
//! | Failure | `false, kind, code` with kind `connection`, `notfound`, or `unknown` |

#![warn(missing_docs)]

mod bridge;
mod config;
mod dispatch;
mod error;
mod handles;
mod marshal;
mod registry;
mod status;

// Operation tables
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API
// =============================================================================

pub use bridge::Bridge;
pub use config::{BridgeConfig, CONFIG_FILE_NAME};
pub use dispatch::{Dispatcher, Reply, INVALID_HANDLE, MALFORMED_REPLY};
pub use error::Error;
pub use handles::{Handle, HandleState, HandleTable};
pub use marshal::{from_native, to_native, MarshalError, Native};
pub use registry::{Descriptor, Family, NativeCall, NativeReply, Registry, RegistryError};
pub use status::{translate, FailureKind, Translated};

// Re-export core types so hosts don't need kvbridge-core directly
pub use kvbridge_core::{MapMode, OutputKind, Param, ParamKind, Status, StatusKind, Value};

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, Error>;
