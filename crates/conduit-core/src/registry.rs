// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Class-keyed pipe registry: power capacities and connection bans.
//!
//! The host builds one registry when the plugin loads and hands it to each
//! pipe kind for registration. Entries are written once and read for the
//! lifetime of the plugin.

use rustc_hash::{FxHashMap, FxHashSet};

/// Capacity used for kinds that never declared one.
pub const DEFAULT_CAPACITY: u32 = 100;

/// Stable identifier of a pipe class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PipeKind(pub &'static str);

impl PipeKind {
    /// The redstone-gated power switch pipe.
    pub const POWER_SWITCH: Self = Self("power_switch");
}

/// Process-wide pipe class tables.
#[derive(Debug, Default, Clone)]
pub struct PipeRegistry {
    capacities: FxHashMap<PipeKind, u32>,
    bans: FxHashSet<(PipeKind, PipeKind)>,
    declared: FxHashSet<PipeKind>,
}

impl PipeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the per-direction power capacity for `kind`.
    ///
    /// Returns the previously declared capacity, if any.
    pub fn set_capacity(&mut self, kind: PipeKind, capacity: u32) -> Option<u32> {
        self.capacities.insert(kind, capacity)
    }

    /// Declared capacity for `kind`, if registered.
    pub fn capacity(&self, kind: PipeKind) -> Option<u32> {
        self.capacities.get(&kind).copied()
    }

    /// Forbid pipes of kind `a` from connecting directly to pipes of kind `b`.
    ///
    /// Bans are symmetric. Returns `false` when the ban already existed.
    pub fn ban_connection(&mut self, a: PipeKind, b: PipeKind) -> bool {
        self.bans.insert(Self::ban_key(a, b))
    }

    /// Whether `a` and `b` may connect directly.
    pub fn can_connect(&self, a: PipeKind, b: PipeKind) -> bool {
        !self.bans.contains(&Self::ban_key(a, b))
    }

    /// Mark `kind` as registered. Returns `false` if it already was.
    ///
    /// Independent of capacities: a host may declare a capacity before the
    /// kind runs its own registration.
    pub fn declare(&mut self, kind: PipeKind) -> bool {
        self.declared.insert(kind)
    }

    /// Whether `kind` has completed its registration.
    pub fn is_registered(&self, kind: PipeKind) -> bool {
        self.declared.contains(&kind)
    }

    fn ban_key(a: PipeKind, b: PipeKind) -> (PipeKind, PipeKind) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WOOD: PipeKind = PipeKind("wood");

    #[test]
    fn bans_are_symmetric() {
        let mut reg = PipeRegistry::new();
        assert!(reg.ban_connection(WOOD, PipeKind::POWER_SWITCH));
        assert!(!reg.can_connect(PipeKind::POWER_SWITCH, WOOD));
        assert!(!reg.can_connect(WOOD, PipeKind::POWER_SWITCH));
        assert!(!reg.ban_connection(PipeKind::POWER_SWITCH, WOOD));
    }

    #[test]
    fn unrelated_kinds_connect() {
        let reg = PipeRegistry::new();
        assert!(reg.can_connect(WOOD, WOOD));
    }

    #[test]
    fn capacity_alone_does_not_register() {
        let mut reg = PipeRegistry::new();
        reg.set_capacity(WOOD, 32);
        assert!(!reg.is_registered(WOOD));
        assert!(reg.declare(WOOD));
        assert!(!reg.declare(WOOD));
        assert!(reg.is_registered(WOOD));
    }

    #[test]
    fn capacity_is_keyed_by_kind() {
        let mut reg = PipeRegistry::new();
        assert_eq!(reg.set_capacity(WOOD, 32), None);
        assert_eq!(reg.set_capacity(WOOD, 64), Some(32));
        assert_eq!(reg.capacity(WOOD), Some(64));
        assert_eq!(reg.capacity(PipeKind::POWER_SWITCH), None);
    }
}
