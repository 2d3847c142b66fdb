//! Operation tables organized by family.
//!
//! Each submodule declares the descriptors of one family and the native
//! calls they are bound to:
//!
//! | Module | Operations | Client methods |
//! |--------|------------|----------------|
//! | `kv` | 14 | scalar key-value |
//! | `hash` | 13 | hash maps |
//! | `queue` | 4 | queues |
//! | `zset` | 14 | sorted sets, integer scores |

use crate::marshal::Native;
use crate::registry::Descriptor;
use crate::Result;

pub mod hash;
pub mod kv;
pub mod queue;
pub mod zset;

/// Builtin family tables, in registry order.
pub const TABLES: &[&[Descriptor]] = &[
    kv::OPERATIONS,
    hash::OPERATIONS,
    queue::OPERATIONS,
    zset::OPERATIONS,
];

/// Convert a count or offset argument. Negative values clamp to zero.
pub(crate) fn to_count(native: Native) -> Result<u64> {
    Ok(u64::try_from(native.into_int()?).unwrap_or(0))
}
