// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Power transport slots owned by a single pipe.
//!
//! The transport engine drains `internal_next_power` once per tick and routes
//! it onwards; this crate only fills the slots. Each slot is bounded by the
//! capacity the pipe's kind declared in the [`PipeRegistry`].

use crate::direction::Direction;
use crate::registry::{PipeKind, PipeRegistry, DEFAULT_CAPACITY};

/// Incoming-energy accumulator for one pipe.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerTransport {
    /// Energy received this tick, indexed by [`Direction::ordinal`].
    pub internal_next_power: [f32; 6],
    max_power: f32,
}

impl Default for PowerTransport {
    fn default() -> Self {
        Self {
            internal_next_power: [0.0; 6],
            max_power: capacity_to_energy(DEFAULT_CAPACITY),
        }
    }
}

impl PowerTransport {
    /// Empty slots with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt the capacity registered for `kind`.
    ///
    /// Kinds without a registered capacity keep the current maximum.
    pub fn init_from_kind(&mut self, kind: PipeKind, registry: &PipeRegistry) {
        if let Some(capacity) = registry.capacity(kind) {
            self.max_power = capacity_to_energy(capacity);
        }
    }

    /// Per-slot upper bound.
    pub fn max_power(&self) -> f32 {
        self.max_power
    }

    /// Energy currently queued from `dir`.
    pub fn slot(&self, dir: Direction) -> f32 {
        self.internal_next_power[dir.ordinal()]
    }

    /// Mutable access to the slot fed from `dir`.
    pub fn slot_mut(&mut self, dir: Direction) -> &mut f32 {
        &mut self.internal_next_power[dir.ordinal()]
    }

    /// Zero every slot.
    pub fn clear(&mut self) {
        self.internal_next_power = [0.0; 6];
    }
}

#[allow(clippy::cast_precision_loss)] // capacities are small integers
fn capacity_to_energy(capacity: u32) -> f32 {
    capacity as f32
}
