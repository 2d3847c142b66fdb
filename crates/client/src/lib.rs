//! Client library seam for kvbridge
//!
//! The bridge never talks to the store's wire protocol. It consumes a typed
//! client API through two traits:
//!
//! - [`Connector`]: opens a connection to `host:port`
//! - [`Client`]: one method per native operation, each returning a
//!   [`Reply`] (status plus family-specific output)
//!
//! Two implementations ship with the crate:
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`memory::MemoryConnector`] | In-process store with SSDB semantics |
//! | [`testing::ScriptedClient`] | Canned replies and a call log, for tests |

#![warn(missing_docs)]

pub mod memory;
pub mod testing;

use kvbridge_core::Status;

pub use memory::{MemoryClient, MemoryConnector, MemoryServer};
pub use testing::{CallLog, Script, ScriptedClient, ScriptedConnector};

/// Status of a native call plus its output.
///
/// On a non-ok status the output is the type's default and must be ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
    /// Outcome of the call
    pub status: Status,
    /// Output value, meaningful only when `status` is ok
    pub value: T,
}

impl<T> Reply<T> {
    /// Successful reply carrying `value`.
    pub fn ok(value: T) -> Self {
        Self {
            status: Status::ok(),
            value,
        }
    }

    /// Transform the output, keeping the status.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        Reply {
            status: self.status,
            value: f(self.value),
        }
    }
}

impl<T: Default> Reply<T> {
    /// Failed reply with the given status.
    pub fn fail(status: Status) -> Self {
        Self {
            status,
            value: T::default(),
        }
    }
}

/// Connection failure reported by a [`Connector`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// Nothing listens on the address
    #[error("connection refused: {host}:{port}")]
    Refused {
        /// Host name
        host: String,
        /// Port
        port: u16,
    },

    /// The address itself is unusable
    #[error("invalid address: {reason}")]
    InvalidAddress {
        /// Why the address was rejected
        reason: String,
    },
}

/// Opens client connections.
pub trait Connector {
    /// Connect to `host:port`.
    fn connect(&self, host: &str, port: u16) -> Result<Box<dyn Client>, ConnectError>;
}

/// Typed client API of the key-value store.
///
/// Range arguments follow SSDB conventions: the start bound is exclusive,
/// the end bound inclusive, and an empty string means unbounded. Operations
/// returning key/value pairs return them as a flat alternating sequence.
pub trait Client {
    // ==================== Scalar KV ====================

    /// Number of keys in the database.
    fn dbsize(&mut self) -> Reply<i64>;

    /// Current key range `(start, end)`.
    fn get_kv_range(&mut self) -> Reply<(String, String)>;

    /// Restrict writable keys to `(start, end]`.
    fn set_kv_range(&mut self, start: &str, end: &str) -> Reply<()>;

    /// Read a key.
    fn get(&mut self, key: &str) -> Reply<String>;

    /// Write a key.
    fn set(&mut self, key: &str, value: &str) -> Reply<()>;

    /// Write a key that expires after `ttl` seconds.
    fn setx(&mut self, key: &str, value: &str, ttl: i64) -> Reply<()>;

    /// Delete a key.
    fn del(&mut self, key: &str) -> Reply<()>;

    /// Add `by` to an integer key, returning the new value.
    fn incr(&mut self, key: &str, by: i64) -> Reply<i64>;

    /// Key names in `(start, end]`.
    fn keys(&mut self, start: &str, end: &str, limit: u64) -> Reply<Vec<String>>;

    /// Key/value pairs in `(start, end]`, ascending.
    fn scan(&mut self, start: &str, end: &str, limit: u64) -> Reply<Vec<String>>;

    /// Key/value pairs in `[end, start)`, descending.
    fn rscan(&mut self, start: &str, end: &str, limit: u64) -> Reply<Vec<String>>;

    /// Key/value pairs for the keys that exist.
    fn multi_get(&mut self, keys: &[String]) -> Reply<Vec<String>>;

    /// Write flat key/value pairs.
    fn multi_set(&mut self, kvs: &[String]) -> Reply<()>;

    /// Delete several keys.
    fn multi_del(&mut self, keys: &[String]) -> Reply<()>;

    // ==================== Hash map ====================

    /// Read a field.
    fn hget(&mut self, name: &str, key: &str) -> Reply<String>;

    /// Write a field.
    fn hset(&mut self, name: &str, key: &str, value: &str) -> Reply<()>;

    /// Delete a field.
    fn hdel(&mut self, name: &str, key: &str) -> Reply<()>;

    /// Add `by` to an integer field, returning the new value.
    fn hincr(&mut self, name: &str, key: &str, by: i64) -> Reply<i64>;

    /// Number of fields.
    fn hsize(&mut self, name: &str) -> Reply<i64>;

    /// Remove every field, returning how many were removed.
    fn hclear(&mut self, name: &str) -> Reply<i64>;

    /// Field names in `(start, end]`.
    fn hkeys(&mut self, name: &str, start: &str, end: &str, limit: u64) -> Reply<Vec<String>>;

    /// Every field/value pair.
    fn hgetall(&mut self, name: &str) -> Reply<Vec<String>>;

    /// Field/value pairs in `(start, end]`, ascending.
    fn hscan(&mut self, name: &str, start: &str, end: &str, limit: u64) -> Reply<Vec<String>>;

    /// Field/value pairs in `[end, start)`, descending.
    fn hrscan(&mut self, name: &str, start: &str, end: &str, limit: u64) -> Reply<Vec<String>>;

    /// Field/value pairs for the fields that exist.
    fn multi_hget(&mut self, name: &str, keys: &[String]) -> Reply<Vec<String>>;

    /// Write flat field/value pairs.
    fn multi_hset(&mut self, name: &str, kvs: &[String]) -> Reply<()>;

    /// Delete several fields.
    fn multi_hdel(&mut self, name: &str, keys: &[String]) -> Reply<()>;

    // ==================== Queue ====================

    /// Append items to the back, returning the new size.
    fn qpush(&mut self, name: &str, items: &[String]) -> Reply<i64>;

    /// Pop one item from the front. Not found when empty.
    fn qpop(&mut self, name: &str) -> Reply<String>;

    /// Pop up to `limit` items from the front.
    fn qpop_many(&mut self, name: &str, limit: i64) -> Reply<Vec<String>>;

    /// Remove every item, returning how many were removed.
    fn qclear(&mut self, name: &str) -> Reply<i64>;

    /// Items between positions `begin` and `end`, inclusive. Negative
    /// positions count from the back.
    fn qslice(&mut self, name: &str, begin: i64, end: i64) -> Reply<Vec<String>>;

    // ==================== Sorted set ====================

    /// Set a member's score.
    fn zset(&mut self, name: &str, key: &str, score: i64) -> Reply<()>;

    /// Read a member's score.
    fn zget(&mut self, name: &str, key: &str) -> Reply<i64>;

    /// Delete a member.
    fn zdel(&mut self, name: &str, key: &str) -> Reply<()>;

    /// Add `by` to a member's score, returning the new score.
    fn zincr(&mut self, name: &str, key: &str, by: i64) -> Reply<i64>;

    /// Number of members.
    fn zsize(&mut self, name: &str) -> Reply<i64>;

    /// Remove every member, returning how many were removed.
    fn zclear(&mut self, name: &str) -> Reply<i64>;

    /// Member/score pairs by ascending rank.
    fn zrange(&mut self, name: &str, offset: u64, limit: u64) -> Reply<Vec<String>>;

    /// Member/score pairs by descending rank.
    fn zrrange(&mut self, name: &str, offset: u64, limit: u64) -> Reply<Vec<String>>;

    /// Member names with score in `[score_start, score_end]`, after
    /// `key_start` when it is not empty.
    fn zkeys(
        &mut self,
        name: &str,
        key_start: &str,
        score_start: i64,
        score_end: i64,
        limit: u64,
    ) -> Reply<Vec<String>>;

    /// Member/score pairs, same selection as [`Client::zkeys`].
    fn zscan(
        &mut self,
        name: &str,
        key_start: &str,
        score_start: i64,
        score_end: i64,
        limit: u64,
    ) -> Reply<Vec<String>>;

    /// Member/score pairs with score in `[score_end, score_start]`,
    /// descending.
    fn zrscan(
        &mut self,
        name: &str,
        key_start: &str,
        score_start: i64,
        score_end: i64,
        limit: u64,
    ) -> Reply<Vec<String>>;

    /// Member/score pairs for the members that exist.
    fn multi_zget(&mut self, name: &str, keys: &[String]) -> Reply<Vec<String>>;

    /// Set several scores.
    fn multi_zset(&mut self, name: &str, items: &[(String, i64)]) -> Reply<()>;

    /// Delete several members.
    fn multi_zdel(&mut self, name: &str, keys: &[String]) -> Reply<()>;
}
