//! Scripted client for tests
//!
//! [`ScriptedClient`] answers every call with the same [`Script`] and
//! records the name of each native method invoked into a shared
//! [`CallLog`]. Tests use it to force specific statuses and malformed
//! replies, and to assert how many native calls a dispatch made.

use std::sync::Arc;

use kvbridge_core::Status;
use parking_lot::Mutex;

use crate::{Client, ConnectError, Connector, Reply};

/// Names of native methods invoked, in order. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, oldest first.
    pub fn calls(&self) -> Vec<&'static str> {
        self.0.lock().clone()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.0.lock().len()
    }

    /// Number of recorded calls to `name`.
    pub fn count_of(&self, name: &str) -> usize {
        self.0.lock().iter().filter(|c| **c == name).count()
    }

    /// Forget every recorded call.
    pub fn clear(&self) {
        self.0.lock().clear();
    }

    fn record(&self, name: &'static str) {
        self.0.lock().push(name);
    }
}

/// Canned answer for every call.
///
/// The output matching the called method's type is returned when the
/// status is ok; otherwise the output is defaulted.
#[derive(Debug, Clone)]
pub struct Script {
    /// Status every call reports
    pub status: Status,
    /// Output for string-returning calls
    pub text: String,
    /// Output for integer-returning calls
    pub int: i64,
    /// Output for sequence-returning calls
    pub list: Vec<String>,
    /// Output for `get_kv_range`
    pub range: (String, String),
}

impl Default for Script {
    fn default() -> Self {
        Self {
            status: Status::ok(),
            text: String::new(),
            int: 0,
            list: Vec::new(),
            range: (String::new(), String::new()),
        }
    }
}

impl Script {
    /// Every call succeeds with empty output.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Every call reports `code`.
    pub fn status(code: &str) -> Self {
        Self {
            status: Status::from_code(code),
            ..Self::default()
        }
    }

    /// Set the string output.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Set the integer output.
    pub fn with_int(mut self, int: i64) -> Self {
        self.int = int;
        self
    }

    /// Set the sequence output.
    pub fn with_list(mut self, items: &[&str]) -> Self {
        self.list = items.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the key range output.
    pub fn with_range(mut self, start: &str, end: &str) -> Self {
        self.range = (start.to_string(), end.to_string());
        self
    }
}

/// Client answering from a [`Script`].
#[derive(Debug, Clone)]
pub struct ScriptedClient {
    script: Script,
    log: CallLog,
}

impl ScriptedClient {
    /// Client with a fresh log.
    pub fn new(script: Script) -> Self {
        Self::with_log(script, CallLog::new())
    }

    /// Client recording into an existing log.
    pub fn with_log(script: Script, log: CallLog) -> Self {
        Self { script, log }
    }

    /// The shared call log.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    fn reply<T: Default>(&mut self, name: &'static str, pick: impl FnOnce(&Script) -> T) -> Reply<T> {
        self.log.record(name);
        if self.script.status.is_ok() {
            Reply::ok(pick(&self.script))
        } else {
            Reply::fail(self.script.status.clone())
        }
    }

    fn text(&mut self, name: &'static str) -> Reply<String> {
        self.reply(name, |s| s.text.clone())
    }

    fn int(&mut self, name: &'static str) -> Reply<i64> {
        self.reply(name, |s| s.int)
    }

    fn list(&mut self, name: &'static str) -> Reply<Vec<String>> {
        self.reply(name, |s| s.list.clone())
    }

    fn unit(&mut self, name: &'static str) -> Reply<()> {
        self.reply(name, |_| ())
    }
}

impl Client for ScriptedClient {
    fn dbsize(&mut self) -> Reply<i64> {
        self.int("dbsize")
    }

    fn get_kv_range(&mut self) -> Reply<(String, String)> {
        self.reply("get_kv_range", |s| s.range.clone())
    }

    fn set_kv_range(&mut self, _start: &str, _end: &str) -> Reply<()> {
        self.unit("set_kv_range")
    }

    fn get(&mut self, _key: &str) -> Reply<String> {
        self.text("get")
    }

    fn set(&mut self, _key: &str, _value: &str) -> Reply<()> {
        self.unit("set")
    }

    fn setx(&mut self, _key: &str, _value: &str, _ttl: i64) -> Reply<()> {
        self.unit("setx")
    }

    fn del(&mut self, _key: &str) -> Reply<()> {
        self.unit("del")
    }

    fn incr(&mut self, _key: &str, _by: i64) -> Reply<i64> {
        self.int("incr")
    }

    fn keys(&mut self, _start: &str, _end: &str, _limit: u64) -> Reply<Vec<String>> {
        self.list("keys")
    }

    fn scan(&mut self, _start: &str, _end: &str, _limit: u64) -> Reply<Vec<String>> {
        self.list("scan")
    }

    fn rscan(&mut self, _start: &str, _end: &str, _limit: u64) -> Reply<Vec<String>> {
        self.list("rscan")
    }

    fn multi_get(&mut self, _keys: &[String]) -> Reply<Vec<String>> {
        self.list("multi_get")
    }

    fn multi_set(&mut self, _kvs: &[String]) -> Reply<()> {
        self.unit("multi_set")
    }

    fn multi_del(&mut self, _keys: &[String]) -> Reply<()> {
        self.unit("multi_del")
    }

    fn hget(&mut self, _name: &str, _key: &str) -> Reply<String> {
        self.text("hget")
    }

    fn hset(&mut self, _name: &str, _key: &str, _value: &str) -> Reply<()> {
        self.unit("hset")
    }

    fn hdel(&mut self, _name: &str, _key: &str) -> Reply<()> {
        self.unit("hdel")
    }

    fn hincr(&mut self, _name: &str, _key: &str, _by: i64) -> Reply<i64> {
        self.int("hincr")
    }

    fn hsize(&mut self, _name: &str) -> Reply<i64> {
        self.int("hsize")
    }

    fn hclear(&mut self, _name: &str) -> Reply<i64> {
        self.int("hclear")
    }

    fn hkeys(&mut self, _name: &str, _start: &str, _end: &str, _limit: u64) -> Reply<Vec<String>> {
        self.list("hkeys")
    }

    fn hgetall(&mut self, _name: &str) -> Reply<Vec<String>> {
        self.list("hgetall")
    }

    fn hscan(&mut self, _name: &str, _start: &str, _end: &str, _limit: u64) -> Reply<Vec<String>> {
        self.list("hscan")
    }

    fn hrscan(&mut self, _name: &str, _start: &str, _end: &str, _limit: u64) -> Reply<Vec<String>> {
        self.list("hrscan")
    }

    fn multi_hget(&mut self, _name: &str, _keys: &[String]) -> Reply<Vec<String>> {
        self.list("multi_hget")
    }

    fn multi_hset(&mut self, _name: &str, _kvs: &[String]) -> Reply<()> {
        self.unit("multi_hset")
    }

    fn multi_hdel(&mut self, _name: &str, _keys: &[String]) -> Reply<()> {
        self.unit("multi_hdel")
    }

    fn qpush(&mut self, _name: &str, _items: &[String]) -> Reply<i64> {
        self.int("qpush")
    }

    fn qpop(&mut self, _name: &str) -> Reply<String> {
        self.text("qpop")
    }

    fn qpop_many(&mut self, _name: &str, _limit: i64) -> Reply<Vec<String>> {
        self.list("qpop_many")
    }

    fn qclear(&mut self, _name: &str) -> Reply<i64> {
        self.int("qclear")
    }

    fn qslice(&mut self, _name: &str, _begin: i64, _end: i64) -> Reply<Vec<String>> {
        self.list("qslice")
    }

    fn zset(&mut self, _name: &str, _key: &str, _score: i64) -> Reply<()> {
        self.unit("zset")
    }

    fn zget(&mut self, _name: &str, _key: &str) -> Reply<i64> {
        self.int("zget")
    }

    fn zdel(&mut self, _name: &str, _key: &str) -> Reply<()> {
        self.unit("zdel")
    }

    fn zincr(&mut self, _name: &str, _key: &str, _by: i64) -> Reply<i64> {
        self.int("zincr")
    }

    fn zsize(&mut self, _name: &str) -> Reply<i64> {
        self.int("zsize")
    }

    fn zclear(&mut self, _name: &str) -> Reply<i64> {
        self.int("zclear")
    }

    fn zrange(&mut self, _name: &str, _offset: u64, _limit: u64) -> Reply<Vec<String>> {
        self.list("zrange")
    }

    fn zrrange(&mut self, _name: &str, _offset: u64, _limit: u64) -> Reply<Vec<String>> {
        self.list("zrrange")
    }

    fn zkeys(&mut self, _name: &str, _key_start: &str, _s: i64, _e: i64, _limit: u64) -> Reply<Vec<String>> {
        self.list("zkeys")
    }

    fn zscan(&mut self, _name: &str, _key_start: &str, _s: i64, _e: i64, _limit: u64) -> Reply<Vec<String>> {
        self.list("zscan")
    }

    fn zrscan(&mut self, _name: &str, _key_start: &str, _s: i64, _e: i64, _limit: u64) -> Reply<Vec<String>> {
        self.list("zrscan")
    }

    fn multi_zget(&mut self, _name: &str, _keys: &[String]) -> Reply<Vec<String>> {
        self.list("multi_zget")
    }

    fn multi_zset(&mut self, _name: &str, _items: &[(String, i64)]) -> Reply<()> {
        self.unit("multi_zset")
    }

    fn multi_zdel(&mut self, _name: &str, _keys: &[String]) -> Reply<()> {
        self.unit("multi_zdel")
    }
}

/// Connector handing out [`ScriptedClient`]s that share one log.
#[derive(Debug, Clone)]
pub struct ScriptedConnector {
    script: Script,
    log: CallLog,
    refuse: bool,
}

impl ScriptedConnector {
    /// Connector whose clients answer with `script`.
    pub fn new(script: Script) -> Self {
        Self {
            script,
            log: CallLog::new(),
            refuse: false,
        }
    }

    /// Connector that refuses every connection.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new(Script::ok())
        }
    }

    /// Log shared by every client this connector opens.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl Connector for ScriptedConnector {
    fn connect(&self, host: &str, port: u16) -> Result<Box<dyn Client>, ConnectError> {
        if self.refuse {
            return Err(ConnectError::Refused {
                host: host.to_string(),
                port,
            });
        }
        Ok(Box::new(ScriptedClient::with_log(
            self.script.clone(),
            self.log.clone(),
        )))
    }
}
