//! In-process store with SSDB semantics.
//!
//! A [`MemoryServer`] owns the data. Every [`MemoryClient`] connected to it
//! shares that data through an `Arc<Mutex<..>>`, so two handles opened on the
//! same address observe each other's writes, as with a real server.
//!
//! ## Semantics
//!
//! | Family | Ordering | Notes |
//! |--------|----------|-------|
//! | KV | byte-wise key order | TTL expiry, optional writable key range |
//! | Hash | byte-wise field order | missing hash reads as empty |
//! | Queue | FIFO | `qpop` on an empty queue is not found |
//! | Sorted set | (score, member) | scores are `i64` |
//!
//! Range scans use an exclusive start and an inclusive end; an empty bound
//! is unbounded.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::ops::Bound;
use std::sync::Arc;
use std::time::{Duration, Instant};

use kvbridge_core::Status;
use parking_lot::Mutex;
use tracing::debug;

use crate::{Client, ConnectError, Connector, Reply};

/// Status code for writes outside the configured key range.
pub const OUT_OF_RANGE: &str = "out_of_range";

/// Status code for arithmetic on a non-integer value or overflow.
pub const FAIL: &str = "fail";

// =============================================================================
// Store
// =============================================================================

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

#[derive(Debug, Default)]
struct ZSet {
    scores: HashMap<String, i64>,
    ranked: BTreeSet<(i64, String)>,
}

impl ZSet {
    fn set(&mut self, key: &str, score: i64) {
        if let Some(old) = self.scores.insert(key.to_string(), score) {
            self.ranked.remove(&(old, key.to_string()));
        }
        self.ranked.insert((score, key.to_string()));
    }

    fn remove(&mut self, key: &str) -> bool {
        match self.scores.remove(key) {
            Some(old) => {
                self.ranked.remove(&(old, key.to_string()));
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.scores.len()
    }

    fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    fn forward(&self, key_start: &str, score_start: i64, score_end: i64) -> Vec<(i64, String)> {
        self.ranked
            .iter()
            .filter(|(s, k)| {
                *s > score_start
                    || (*s == score_start && (key_start.is_empty() || k.as_str() > key_start))
            })
            .take_while(|(s, _)| *s <= score_end)
            .cloned()
            .collect()
    }

    fn backward(&self, key_start: &str, score_start: i64, score_end: i64) -> Vec<(i64, String)> {
        self.ranked
            .iter()
            .rev()
            .filter(|(s, k)| {
                *s < score_start
                    || (*s == score_start && (key_start.is_empty() || k.as_str() < key_start))
            })
            .take_while(|(s, _)| *s >= score_end)
            .cloned()
            .collect()
    }
}

#[derive(Debug)]
struct Store {
    online: bool,
    clock_skew: Duration,
    kv: BTreeMap<String, Entry>,
    kv_range: (String, String),
    hashes: BTreeMap<String, BTreeMap<String, String>>,
    queues: BTreeMap<String, VecDeque<String>>,
    zsets: BTreeMap<String, ZSet>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            online: true,
            clock_skew: Duration::ZERO,
            kv: BTreeMap::new(),
            kv_range: (String::new(), String::new()),
            hashes: BTreeMap::new(),
            queues: BTreeMap::new(),
            zsets: BTreeMap::new(),
        }
    }
}

impl Store {
    fn now(&self) -> Instant {
        let real = Instant::now();
        real.checked_add(self.clock_skew).unwrap_or(real)
    }

    fn purge_expired(&mut self) {
        let now = self.now();
        self.kv
            .retain(|_, e| e.expires_at.map_or(true, |deadline| deadline > now));
    }

    fn writable(&self, key: &str) -> bool {
        let (start, end) = &self.kv_range;
        (start.is_empty() || key > start.as_str()) && (end.is_empty() || key <= end.as_str())
    }

    fn put(&mut self, key: &str, value: &str, expires_at: Option<Instant>) {
        self.kv.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
    }
}

/// Entries in `(start, end]`, ascending. Empty bounds are unbounded.
fn range_forward<'a, V>(
    map: &'a BTreeMap<String, V>,
    start: &str,
    end: &str,
    limit: u64,
) -> Vec<(&'a String, &'a V)> {
    if !start.is_empty() && !end.is_empty() && start >= end {
        return Vec::new();
    }
    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(start.to_string())
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(end.to_string())
    };
    map.range::<String, _>((lower, upper))
        .take(limit_to_usize(limit))
        .collect()
}

/// Entries in `[end, start)`, descending. Empty bounds are unbounded.
fn range_backward<'a, V>(
    map: &'a BTreeMap<String, V>,
    start: &str,
    end: &str,
    limit: u64,
) -> Vec<(&'a String, &'a V)> {
    if !start.is_empty() && !end.is_empty() && end >= start {
        return Vec::new();
    }
    let lower = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(end.to_string())
    };
    let upper = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(start.to_string())
    };
    map.range::<String, _>((lower, upper))
        .rev()
        .take(limit_to_usize(limit))
        .collect()
}

fn limit_to_usize(limit: u64) -> usize {
    usize::try_from(limit).unwrap_or(usize::MAX)
}

fn flatten<'a>(pairs: impl IntoIterator<Item = (&'a String, &'a String)>) -> Vec<String> {
    pairs
        .into_iter()
        .flat_map(|(k, v)| [k.clone(), v.clone()])
        .collect()
}

fn flatten_scores(pairs: impl IntoIterator<Item = (i64, String)>) -> Vec<String> {
    pairs
        .into_iter()
        .flat_map(|(score, key)| [key, score.to_string()])
        .collect()
}

fn add(current: Option<&str>, by: i64) -> Option<i64> {
    let base = match current {
        Some(text) => text.trim().parse::<i64>().ok()?,
        None => 0,
    };
    base.checked_add(by)
}

// =============================================================================
// Server / Connector
// =============================================================================

/// Shared data of one in-memory "server".
#[derive(Debug, Clone, Default)]
pub struct MemoryServer {
    inner: Arc<Mutex<Store>>,
}

impl MemoryServer {
    /// Create an empty, online server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the server offline or bring it back.
    ///
    /// While offline, connecting is refused and every call on an existing
    /// client returns an `error` status.
    pub fn set_online(&self, online: bool) {
        self.inner.lock().online = online;
    }

    /// Whether the server accepts calls.
    pub fn is_online(&self) -> bool {
        self.inner.lock().online
    }

    /// Move the server clock forward, expiring TTL keys.
    ///
    /// An advance that would take the clock out of range is ignored.
    pub fn advance_clock(&self, by: Duration) {
        let mut store = self.inner.lock();
        let skew = store
            .clock_skew
            .checked_add(by)
            .filter(|skew| Instant::now().checked_add(*skew).is_some());
        match skew {
            Some(skew) => store.clock_skew = skew,
            None => debug!(target: "kvbridge::memory", ?by, "Clock advance out of range, ignored"),
        }
    }

    /// Open a client on this server.
    pub fn client(&self) -> MemoryClient {
        MemoryClient {
            server: self.clone(),
            connected: true,
        }
    }
}

/// Connector resolving `host:port` to registered in-memory servers.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    servers: HashMap<(String, u16), MemoryServer>,
}

impl MemoryConnector {
    /// Create a connector with no servers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or look up) the server listening on `host:port`.
    pub fn serve(&mut self, host: &str, port: u16) -> MemoryServer {
        self.servers
            .entry((host.to_string(), port))
            .or_default()
            .clone()
    }
}

impl Connector for MemoryConnector {
    fn connect(&self, host: &str, port: u16) -> Result<Box<dyn Client>, ConnectError> {
        if host.is_empty() {
            return Err(ConnectError::InvalidAddress {
                reason: "empty host".to_string(),
            });
        }
        if port == 0 {
            return Err(ConnectError::InvalidAddress {
                reason: "port 0".to_string(),
            });
        }
        match self.servers.get(&(host.to_string(), port)) {
            Some(server) if server.is_online() => {
                debug!(target: "kvbridge::memory", host, port, "Connected");
                Ok(Box::new(server.client()))
            }
            _ => Err(ConnectError::Refused {
                host: host.to_string(),
                port,
            }),
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// Connection to a [`MemoryServer`].
#[derive(Debug, Clone)]
pub struct MemoryClient {
    server: MemoryServer,
    connected: bool,
}

impl MemoryClient {
    /// Drop the connection. Every later call reports an `error` status.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    fn with_store<T: Default>(&self, f: impl FnOnce(&mut Store) -> Reply<T>) -> Reply<T> {
        if !self.connected {
            return Reply::fail(Status::error());
        }
        let mut store = self.server.inner.lock();
        if !store.online {
            return Reply::fail(Status::error());
        }
        store.purge_expired();
        f(&mut *store)
    }
}

impl Client for MemoryClient {
    // ==================== Scalar KV ====================

    fn dbsize(&mut self) -> Reply<i64> {
        self.with_store(|s| Reply::ok(s.kv.len() as i64))
    }

    fn get_kv_range(&mut self) -> Reply<(String, String)> {
        self.with_store(|s| Reply::ok(s.kv_range.clone()))
    }

    fn set_kv_range(&mut self, start: &str, end: &str) -> Reply<()> {
        self.with_store(|s| {
            s.kv_range = (start.to_string(), end.to_string());
            Reply::ok(())
        })
    }

    fn get(&mut self, key: &str) -> Reply<String> {
        self.with_store(|s| match s.kv.get(key) {
            Some(entry) => Reply::ok(entry.value.clone()),
            None => Reply::fail(Status::not_found()),
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Reply<()> {
        self.with_store(|s| {
            if !s.writable(key) {
                return Reply::fail(Status::from_code(OUT_OF_RANGE));
            }
            s.put(key, value, None);
            Reply::ok(())
        })
    }

    fn setx(&mut self, key: &str, value: &str, ttl: i64) -> Reply<()> {
        self.with_store(|s| {
            if !s.writable(key) {
                return Reply::fail(Status::from_code(OUT_OF_RANGE));
            }
            let secs = u64::try_from(ttl).unwrap_or(0);
            // A deadline past the clock's range never expires.
            let deadline = s.now().checked_add(Duration::from_secs(secs));
            s.put(key, value, deadline);
            Reply::ok(())
        })
    }

    fn del(&mut self, key: &str) -> Reply<()> {
        self.with_store(|s| {
            s.kv.remove(key);
            Reply::ok(())
        })
    }

    fn incr(&mut self, key: &str, by: i64) -> Reply<i64> {
        self.with_store(|s| {
            if !s.writable(key) {
                return Reply::fail(Status::from_code(OUT_OF_RANGE));
            }
            let current = s.kv.get(key).map(|e| e.value.as_str());
            let Some(next) = add(current, by) else {
                return Reply::fail(Status::from_code(FAIL));
            };
            let expires_at = s.kv.get(key).and_then(|e| e.expires_at);
            s.put(key, &next.to_string(), expires_at);
            Reply::ok(next)
        })
    }

    fn keys(&mut self, start: &str, end: &str, limit: u64) -> Reply<Vec<String>> {
        self.with_store(|s| {
            Reply::ok(
                range_forward(&s.kv, start, end, limit)
                    .into_iter()
                    .map(|(k, _)| k.clone())
                    .collect(),
            )
        })
    }

    fn scan(&mut self, start: &str, end: &str, limit: u64) -> Reply<Vec<String>> {
        self.with_store(|s| {
            Reply::ok(flatten(
                range_forward(&s.kv, start, end, limit)
                    .into_iter()
                    .map(|(k, e)| (k, &e.value)),
            ))
        })
    }

    fn rscan(&mut self, start: &str, end: &str, limit: u64) -> Reply<Vec<String>> {
        self.with_store(|s| {
            Reply::ok(flatten(
                range_backward(&s.kv, start, end, limit)
                    .into_iter()
                    .map(|(k, e)| (k, &e.value)),
            ))
        })
    }

    fn multi_get(&mut self, keys: &[String]) -> Reply<Vec<String>> {
        self.with_store(|s| {
            Reply::ok(flatten(
                keys.iter()
                    .filter_map(|k| s.kv.get(k).map(|e| (k, &e.value))),
            ))
        })
    }

    fn multi_set(&mut self, kvs: &[String]) -> Reply<()> {
        self.with_store(|s| {
            if kvs.len() % 2 != 0 {
                return Reply::fail(Status::from_code(FAIL));
            }
            if kvs.chunks(2).any(|pair| !s.writable(&pair[0])) {
                return Reply::fail(Status::from_code(OUT_OF_RANGE));
            }
            for pair in kvs.chunks(2) {
                s.put(&pair[0], &pair[1], None);
            }
            Reply::ok(())
        })
    }

    fn multi_del(&mut self, keys: &[String]) -> Reply<()> {
        self.with_store(|s| {
            for key in keys {
                s.kv.remove(key);
            }
            Reply::ok(())
        })
    }

    // ==================== Hash map ====================

    fn hget(&mut self, name: &str, key: &str) -> Reply<String> {
        self.with_store(|s| match s.hashes.get(name).and_then(|h| h.get(key)) {
            Some(value) => Reply::ok(value.clone()),
            None => Reply::fail(Status::not_found()),
        })
    }

    fn hset(&mut self, name: &str, key: &str, value: &str) -> Reply<()> {
        self.with_store(|s| {
            s.hashes
                .entry(name.to_string())
                .or_default()
                .insert(key.to_string(), value.to_string());
            Reply::ok(())
        })
    }

    fn hdel(&mut self, name: &str, key: &str) -> Reply<()> {
        self.with_store(|s| {
            if let Some(hash) = s.hashes.get_mut(name) {
                hash.remove(key);
                if hash.is_empty() {
                    s.hashes.remove(name);
                }
            }
            Reply::ok(())
        })
    }

    fn hincr(&mut self, name: &str, key: &str, by: i64) -> Reply<i64> {
        self.with_store(|s| {
            let hash = s.hashes.entry(name.to_string()).or_default();
            let Some(next) = add(hash.get(key).map(String::as_str), by) else {
                return Reply::fail(Status::from_code(FAIL));
            };
            hash.insert(key.to_string(), next.to_string());
            Reply::ok(next)
        })
    }

    fn hsize(&mut self, name: &str) -> Reply<i64> {
        self.with_store(|s| Reply::ok(s.hashes.get(name).map_or(0, |h| h.len() as i64)))
    }

    fn hclear(&mut self, name: &str) -> Reply<i64> {
        self.with_store(|s| Reply::ok(s.hashes.remove(name).map_or(0, |h| h.len() as i64)))
    }

    fn hkeys(&mut self, name: &str, start: &str, end: &str, limit: u64) -> Reply<Vec<String>> {
        self.with_store(|s| {
            let keys = match s.hashes.get(name) {
                Some(hash) => range_forward(hash, start, end, limit)
                    .into_iter()
                    .map(|(k, _)| k.clone())
                    .collect(),
                None => Vec::new(),
            };
            Reply::ok(keys)
        })
    }

    fn hgetall(&mut self, name: &str) -> Reply<Vec<String>> {
        self.with_store(|s| Reply::ok(s.hashes.get(name).map(flatten).unwrap_or_default()))
    }

    fn hscan(&mut self, name: &str, start: &str, end: &str, limit: u64) -> Reply<Vec<String>> {
        self.with_store(|s| {
            Reply::ok(
                s.hashes
                    .get(name)
                    .map(|h| flatten(range_forward(h, start, end, limit)))
                    .unwrap_or_default(),
            )
        })
    }

    fn hrscan(&mut self, name: &str, start: &str, end: &str, limit: u64) -> Reply<Vec<String>> {
        self.with_store(|s| {
            Reply::ok(
                s.hashes
                    .get(name)
                    .map(|h| flatten(range_backward(h, start, end, limit)))
                    .unwrap_or_default(),
            )
        })
    }

    fn multi_hget(&mut self, name: &str, keys: &[String]) -> Reply<Vec<String>> {
        self.with_store(|s| {
            let Some(hash) = s.hashes.get(name) else {
                return Reply::ok(Vec::new());
            };
            Reply::ok(flatten(
                keys.iter().filter_map(|k| hash.get(k).map(|v| (k, v))),
            ))
        })
    }

    fn multi_hset(&mut self, name: &str, kvs: &[String]) -> Reply<()> {
        self.with_store(|s| {
            if kvs.len() % 2 != 0 {
                return Reply::fail(Status::from_code(FAIL));
            }
            let hash = s.hashes.entry(name.to_string()).or_default();
            for pair in kvs.chunks(2) {
                hash.insert(pair[0].clone(), pair[1].clone());
            }
            Reply::ok(())
        })
    }

    fn multi_hdel(&mut self, name: &str, keys: &[String]) -> Reply<()> {
        self.with_store(|s| {
            if let Some(hash) = s.hashes.get_mut(name) {
                for key in keys {
                    hash.remove(key);
                }
                if hash.is_empty() {
                    s.hashes.remove(name);
                }
            }
            Reply::ok(())
        })
    }

    // ==================== Queue ====================

    fn qpush(&mut self, name: &str, items: &[String]) -> Reply<i64> {
        self.with_store(|s| {
            let queue = s.queues.entry(name.to_string()).or_default();
            queue.extend(items.iter().cloned());
            Reply::ok(queue.len() as i64)
        })
    }

    fn qpop(&mut self, name: &str) -> Reply<String> {
        self.with_store(|s| {
            let item = s.queues.get_mut(name).and_then(VecDeque::pop_front);
            if s.queues.get(name).is_some_and(VecDeque::is_empty) {
                s.queues.remove(name);
            }
            match item {
                Some(item) => Reply::ok(item),
                None => Reply::fail(Status::not_found()),
            }
        })
    }

    fn qpop_many(&mut self, name: &str, limit: i64) -> Reply<Vec<String>> {
        self.with_store(|s| {
            let Some(queue) = s.queues.get_mut(name) else {
                return Reply::ok(Vec::new());
            };
            let count = usize::try_from(limit).unwrap_or(0).min(queue.len());
            let items: Vec<String> = queue.drain(..count).collect();
            if queue.is_empty() {
                s.queues.remove(name);
            }
            Reply::ok(items)
        })
    }

    fn qclear(&mut self, name: &str) -> Reply<i64> {
        self.with_store(|s| Reply::ok(s.queues.remove(name).map_or(0, |q| q.len() as i64)))
    }

    fn qslice(&mut self, name: &str, begin: i64, end: i64) -> Reply<Vec<String>> {
        self.with_store(|s| {
            let Some(queue) = s.queues.get(name) else {
                return Reply::ok(Vec::new());
            };
            let len = queue.len() as i64;
            let first = (if begin < 0 { len + begin } else { begin }).max(0);
            let last = (if end < 0 { len + end } else { end }).min(len - 1);
            if len == 0 || first > last {
                return Reply::ok(Vec::new());
            }
            Reply::ok(
                queue
                    .iter()
                    .skip(first as usize)
                    .take((last - first + 1) as usize)
                    .cloned()
                    .collect(),
            )
        })
    }

    // ==================== Sorted set ====================

    fn zset(&mut self, name: &str, key: &str, score: i64) -> Reply<()> {
        self.with_store(|s| {
            s.zsets.entry(name.to_string()).or_default().set(key, score);
            Reply::ok(())
        })
    }

    fn zget(&mut self, name: &str, key: &str) -> Reply<i64> {
        self.with_store(|s| match s.zsets.get(name).and_then(|z| z.scores.get(key)) {
            Some(score) => Reply::ok(*score),
            None => Reply::fail(Status::not_found()),
        })
    }

    fn zdel(&mut self, name: &str, key: &str) -> Reply<()> {
        self.with_store(|s| {
            if let Some(z) = s.zsets.get_mut(name) {
                z.remove(key);
                if z.is_empty() {
                    s.zsets.remove(name);
                }
            }
            Reply::ok(())
        })
    }

    fn zincr(&mut self, name: &str, key: &str, by: i64) -> Reply<i64> {
        self.with_store(|s| {
            let z = s.zsets.entry(name.to_string()).or_default();
            let current = z.scores.get(key).copied().unwrap_or(0);
            let Some(next) = current.checked_add(by) else {
                return Reply::fail(Status::from_code(FAIL));
            };
            z.set(key, next);
            Reply::ok(next)
        })
    }

    fn zsize(&mut self, name: &str) -> Reply<i64> {
        self.with_store(|s| Reply::ok(s.zsets.get(name).map_or(0, |z| z.len() as i64)))
    }

    fn zclear(&mut self, name: &str) -> Reply<i64> {
        self.with_store(|s| Reply::ok(s.zsets.remove(name).map_or(0, |z| z.len() as i64)))
    }

    fn zrange(&mut self, name: &str, offset: u64, limit: u64) -> Reply<Vec<String>> {
        self.with_store(|s| {
            let Some(z) = s.zsets.get(name) else {
                return Reply::ok(Vec::new());
            };
            Reply::ok(flatten_scores(
                z.ranked
                    .iter()
                    .skip(limit_to_usize(offset))
                    .take(limit_to_usize(limit))
                    .cloned(),
            ))
        })
    }

    fn zrrange(&mut self, name: &str, offset: u64, limit: u64) -> Reply<Vec<String>> {
        self.with_store(|s| {
            let Some(z) = s.zsets.get(name) else {
                return Reply::ok(Vec::new());
            };
            Reply::ok(flatten_scores(
                z.ranked
                    .iter()
                    .rev()
                    .skip(limit_to_usize(offset))
                    .take(limit_to_usize(limit))
                    .cloned(),
            ))
        })
    }

    fn zkeys(
        &mut self,
        name: &str,
        key_start: &str,
        score_start: i64,
        score_end: i64,
        limit: u64,
    ) -> Reply<Vec<String>> {
        self.with_store(|s| {
            let keys = s
                .zsets
                .get(name)
                .map(|z| {
                    z.forward(key_start, score_start, score_end)
                        .into_iter()
                        .take(limit_to_usize(limit))
                        .map(|(_, k)| k)
                        .collect()
                })
                .unwrap_or_default();
            Reply::ok(keys)
        })
    }

    fn zscan(
        &mut self,
        name: &str,
        key_start: &str,
        score_start: i64,
        score_end: i64,
        limit: u64,
    ) -> Reply<Vec<String>> {
        self.with_store(|s| {
            let pairs = s
                .zsets
                .get(name)
                .map(|z| {
                    flatten_scores(
                        z.forward(key_start, score_start, score_end)
                            .into_iter()
                            .take(limit_to_usize(limit)),
                    )
                })
                .unwrap_or_default();
            Reply::ok(pairs)
        })
    }

    fn zrscan(
        &mut self,
        name: &str,
        key_start: &str,
        score_start: i64,
        score_end: i64,
        limit: u64,
    ) -> Reply<Vec<String>> {
        self.with_store(|s| {
            let pairs = s
                .zsets
                .get(name)
                .map(|z| {
                    flatten_scores(
                        z.backward(key_start, score_start, score_end)
                            .into_iter()
                            .take(limit_to_usize(limit)),
                    )
                })
                .unwrap_or_default();
            Reply::ok(pairs)
        })
    }

    fn multi_zget(&mut self, name: &str, keys: &[String]) -> Reply<Vec<String>> {
        self.with_store(|s| {
            let Some(z) = s.zsets.get(name) else {
                return Reply::ok(Vec::new());
            };
            Reply::ok(flatten_scores(
                keys.iter()
                    .filter_map(|k| z.scores.get(k).map(|score| (*score, k.clone()))),
            ))
        })
    }

    fn multi_zset(&mut self, name: &str, items: &[(String, i64)]) -> Reply<()> {
        self.with_store(|s| {
            let z = s.zsets.entry(name.to_string()).or_default();
            for (key, score) in items {
                z.set(key, *score);
            }
            Reply::ok(())
        })
    }

    fn multi_zdel(&mut self, name: &str, keys: &[String]) -> Reply<()> {
        self.with_store(|s| {
            if let Some(z) = s.zsets.get_mut(name) {
                for key in keys {
                    z.remove(key);
                }
                if z.is_empty() {
                    s.zsets.remove(name);
                }
            }
            Reply::ok(())
        })
    }
}
