//! Handle manager.
//!
//! Connections live in a slot arena. A [`Handle`] is an `(index,
//! generation)` token: releasing a slot bumps its generation, so a token
//! that outlived its slot never resolves to a later connection that reused
//! the same index.
//!
//! ```text
//! insert_live ──► Live ──close──► Dead ──finalize──► Vacant
//! insert_dead ───────────────────► Dead
//! ```

use std::fmt;

use kvbridge_client::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Opaque connection token handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle#{}.{}", self.index, self.generation)
    }
}

/// Whether a handle can reach a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleState {
    /// Wraps an open connection
    Live,
    /// Failed, closed, finalized, or stale
    Dead,
}

enum SlotState {
    Vacant,
    Live(Box<dyn Client>),
    Dead,
}

struct Slot {
    generation: u32,
    state: SlotState,
}

/// Arena of connections addressed by [`Handle`].
pub struct HandleTable {
    slots: Vec<Slot>,
    max_live: usize,
}

impl fmt::Debug for HandleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleTable")
            .field("slots", &self.slots.len())
            .field("live", &self.live_count())
            .field("max_live", &self.max_live)
            .finish()
    }
}

impl Default for HandleTable {
    fn default() -> Self {
        Self::new(0)
    }
}

impl HandleTable {
    /// Create a table. `max_live == 0` means unlimited.
    pub fn new(max_live: usize) -> Self {
        Self {
            slots: Vec::new(),
            max_live,
        }
    }

    /// Whether another live connection fits under the cap.
    pub fn has_capacity(&self) -> bool {
        self.max_live == 0 || self.live_count() < self.max_live
    }

    /// Store an open connection.
    ///
    /// Over the live cap the connection is dropped and a dead handle is
    /// returned instead.
    pub fn insert_live(&mut self, conn: Box<dyn Client>) -> Handle {
        if !self.has_capacity() {
            warn!(
                target: "kvbridge::handles",
                max_live = self.max_live,
                "Live handle limit reached, returning dead handle"
            );
            return self.insert(SlotState::Dead);
        }
        self.insert(SlotState::Live(conn))
    }

    /// Allocate a handle with no connection.
    pub fn insert_dead(&mut self) -> Handle {
        self.insert(SlotState::Dead)
    }

    fn insert(&mut self, state: SlotState) -> Handle {
        let vacant = self
            .slots
            .iter()
            .position(|slot| matches!(slot.state, SlotState::Vacant));
        let index = match vacant {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.generation = slot.generation.wrapping_add(1);
                slot.state = state;
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    state,
                });
                self.slots.len() - 1
            }
        };
        let handle = Handle {
            index: index as u32,
            generation: self.slots[index].generation,
        };
        debug!(target: "kvbridge::handles", %handle, state = ?self.state(handle), "Handle allocated");
        handle
    }

    fn slot(&self, handle: Handle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }

    fn slot_mut(&mut self, handle: Handle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }

    /// The connection behind a live handle.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut dyn Client> {
        match self.slot_mut(handle) {
            Some(Slot {
                state: SlotState::Live(conn),
                ..
            }) => Some(conn.as_mut()),
            _ => None,
        }
    }

    /// Current state. Stale and finalized handles read as dead.
    pub fn state(&self, handle: Handle) -> HandleState {
        match self.slot(handle) {
            Some(Slot {
                state: SlotState::Live(_),
                ..
            }) => HandleState::Live,
            _ => HandleState::Dead,
        }
    }

    /// Close a live handle, dropping its connection.
    ///
    /// Returns `false` if the handle was not live.
    pub fn close(&mut self, handle: Handle) -> bool {
        match self.slot_mut(handle) {
            Some(slot) if matches!(slot.state, SlotState::Live(_)) => {
                slot.state = SlotState::Dead;
                debug!(target: "kvbridge::handles", %handle, "Handle closed");
                true
            }
            _ => false,
        }
    }

    /// Release a handle's slot. Idempotent.
    ///
    /// Returns `false` for a stale or already-finalized handle.
    pub fn finalize(&mut self, handle: Handle) -> bool {
        match self.slot_mut(handle) {
            Some(slot) if !matches!(slot.state, SlotState::Vacant) => {
                slot.state = SlotState::Vacant;
                debug!(target: "kvbridge::handles", %handle, "Handle finalized");
                true
            }
            _ => false,
        }
    }

    /// Number of live handles.
    pub fn live_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot.state, SlotState::Live(_)))
            .count()
    }

    /// Configured live cap, 0 for unlimited.
    pub fn max_live(&self) -> usize {
        self.max_live
    }
}
