//! Bridge Integration Tests
//!
//! End-to-end tests of the host-facing [`kvbridge::Bridge`] over the
//! in-memory store:
//! - kv / hash / queue / zset operation families
//! - handle lifecycle (connect, close, finalize, live cap)
//! - caller errors vs store failures
//!
//! ```bash
//! cargo test --test bridge
//! cargo test --test bridge zset::
//! ```

mod common;

mod error_handling;
mod handles;
mod hash;
mod kv;
mod queue;
mod zset;
