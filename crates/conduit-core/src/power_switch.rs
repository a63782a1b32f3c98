// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Redstone-gated power pipe.
//!
//! A [`PowerSwitchPipe`] passes energy only while it is *open*. Three
//! independent inputs open it:
//!
//! - `redstone`: an adjacent pipe's gate emits redstone, or the world powers
//!   this block indirectly. Refreshed by [`PowerSwitchPipe::sense`] on every
//!   tick and neighbor change.
//! - `switched`: a switch-on action is active in the current batch. Cleared at
//!   the start of every batch.
//! - `toggled`: latched by toggle-on, released by toggle-off.
//!
//! `open = redstone || switched || toggled`, recomputed on each read.
//!
//! When the switch falls (active in the previous batch, absent from this one)
//! the toggle latch is released in the same batch, whatever toggle actions are
//! present. A switch pulse therefore arms the toggle and releasing it disarms.
//!
//! If a batch carries both toggle-on and toggle-off, toggle-off wins.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::action::{Action, ActionBatch, ActionKind, SWITCH_ACTIONS};
use crate::config::{IconConfig, SwitchConfig};
use crate::direction::{BlockId, Direction, Position};
use crate::host::{Pipe, PipeBase, PipeHost, PowerHook};
use crate::record::{Record, POWERED_KEY, SWITCHED_KEY, TOGGLED_KEY};
use crate::registry::{PipeKind, PipeRegistry};
use crate::transport::PowerTransport;

/// Texture identifier understood by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IconIndex(pub u32);

/// The three control inputs of a power switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GateState {
    /// Redstone reaches this block.
    pub redstone: bool,
    /// A switch-on action is held.
    pub switched: bool,
    /// A toggle-on action is latched.
    pub toggled: bool,
}

impl GateState {
    /// State from explicit inputs.
    pub const fn new(redstone: bool, switched: bool, toggled: bool) -> Self {
        Self {
            redstone,
            switched,
            toggled,
        }
    }

    /// Whether energy may pass.
    pub const fn is_open(&self) -> bool {
        self.redstone || self.switched || self.toggled
    }
}

/// A pipe segment that gates power on redstone, switch and toggle inputs.
#[derive(Debug, Clone)]
pub struct PowerSwitchPipe {
    base: PipeBase,
    state: GateState,
    icons: IconConfig,
}

impl PowerSwitchPipe {
    /// Declare the power switch class in `registry`.
    ///
    /// Bans switch-to-switch connections and registers the slot capacity from
    /// `config`. Call once when the plugin loads; later calls leave the
    /// registry untouched and return `false`.
    pub fn register(registry: &mut PipeRegistry, config: &SwitchConfig) -> bool {
        if !registry.declare(PipeKind::POWER_SWITCH) {
            debug!("power switch already registered");
            return false;
        }
        registry.ban_connection(PipeKind::POWER_SWITCH, PipeKind::POWER_SWITCH);
        registry.set_capacity(PipeKind::POWER_SWITCH, config.capacity);
        debug!(capacity = config.capacity, "registered power switch");
        true
    }

    /// A fresh, closed segment at `position`.
    ///
    /// The transport adopts the capacity declared in `registry`.
    pub fn new(position: Position, registry: &PipeRegistry, config: &SwitchConfig) -> Self {
        Self::with_base(PipeBase::new(PipeKind::POWER_SWITCH, position), registry, config)
    }

    /// Like [`new`](Self::new) but extending a host-prepared base.
    pub fn with_base(mut base: PipeBase, registry: &PipeRegistry, config: &SwitchConfig) -> Self {
        if !registry.is_registered(PipeKind::POWER_SWITCH) {
            warn!("power switch created before registration; using default capacity");
        }
        base.transport.init_from_kind(PipeKind::POWER_SWITCH, registry);
        Self {
            base,
            state: GateState::default(),
            icons: config.icons,
        }
    }

    /// Current control inputs.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Whether energy may pass right now.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Inherited pipe behavior.
    pub fn base(&self) -> &PipeBase {
        &self.base
    }

    /// Power slots.
    pub fn transport(&self) -> &PowerTransport {
        &self.base.transport
    }

    /// Mutable power slots, for the transport engine.
    pub fn transport_mut(&mut self) -> &mut PowerTransport {
        &mut self.base.transport
    }

    /// Probe the six neighbors and the world for redstone.
    ///
    /// On a redstone edge, every valid adjacent pipe and this pipe itself are
    /// asked to recompute connections and re-tick.
    #[instrument(level = "trace", skip_all, fields(pos = ?self.base.position()))]
    pub fn sense(&mut self, host: &mut dyn PipeHost) {
        let here = self.base.position();
        let prior = self.state;

        let mut affected = vec![here];
        let mut redstone = false;
        // Keep scanning after a hit: every valid neighbor must hear the edge.
        for dir in Direction::ALL {
            let Some(neighbor) = host.neighbor_pipe(here, dir) else {
                continue;
            };
            if !neighbor.valid {
                continue;
            }
            affected.push(neighbor.position);
            if neighbor.emits_redstone() {
                redstone = true;
            }
        }
        if !redstone {
            redstone = host.is_indirectly_powered(here);
        }
        self.state.redstone = redstone;

        if prior.redstone != redstone {
            debug!(redstone, notified = affected.len(), "redstone changed");
            for pipe in affected {
                host.schedule_neighbor_change(pipe);
                host.update_entity(pipe);
            }
            self.log_transition(prior);
        }
    }

    fn log_transition(&self, prior: GateState) {
        if prior.is_open() != self.state.is_open() {
            debug!(
                pos = ?self.base.position(),
                open = self.state.is_open(),
                redstone = self.state.redstone,
                switched = self.state.switched,
                toggled = self.state.toggled,
                "gate transition"
            );
        }
    }
}

impl Pipe for PowerSwitchPipe {
    fn kind(&self) -> PipeKind {
        self.base.kind()
    }

    fn position(&self) -> Position {
        self.base.position()
    }

    fn update_entity(&mut self, host: &mut dyn PipeHost) {
        self.sense(host);
    }

    fn on_neighbor_block_change(&mut self, block: BlockId, host: &mut dyn PipeHost) {
        trace!(?block, "neighbor block changed");
        self.sense(host);
    }

    fn actions(&self) -> Vec<Action> {
        let mut actions = self.base.actions();
        actions.extend(SWITCH_ACTIONS);
        actions
    }

    #[instrument(level = "trace", skip_all, fields(pos = ?self.base.position(), bound = batch.len()))]
    fn actions_activated(&mut self, batch: &ActionBatch, host: &mut dyn PipeHost) {
        let last = self.state;
        self.base.actions_activated(batch);

        let mut switched = false;
        let mut toggle_on = false;
        let mut toggle_off = false;
        for action in batch.active() {
            match action.kind() {
                ActionKind::Switch => switched = true,
                ActionKind::ToggleOn => toggle_on = true,
                ActionKind::ToggleOff => toggle_off = true,
                ActionKind::Foreign => {}
            }
        }
        self.state.switched = switched;
        if toggle_off {
            self.state.toggled = false;
        } else if toggle_on {
            self.state.toggled = true;
        }

        if last.switched == self.state.switched && last.toggled == self.state.toggled {
            return;
        }
        if last.switched && !self.state.switched {
            self.state.toggled = false;
        }
        debug!(
            switched = self.state.switched,
            toggled = self.state.toggled,
            "switch inputs changed"
        );

        let here = self.base.position();
        host.schedule_render_update(here);
        for (_, at) in here.neighbors() {
            host.notify_block_change(at);
        }
        self.log_transition(last);
    }

    fn icon_index(&self, _dir: Direction) -> IconIndex {
        if self.is_open() {
            self.icons.powered
        } else {
            self.icons.unpowered
        }
    }

    fn write_record(&self, record: &mut Record) {
        record.set_bool(POWERED_KEY, self.state.redstone);
        record.set_bool(SWITCHED_KEY, self.state.switched);
        record.set_bool(TOGGLED_KEY, self.state.toggled);
    }

    fn read_record(&mut self, record: &Record) {
        self.state = GateState {
            redstone: record.get_bool(POWERED_KEY),
            switched: record.get_bool(SWITCHED_KEY),
            toggled: record.get_bool(TOGGLED_KEY),
        };
    }
}

impl PowerHook for PowerSwitchPipe {
    fn receive_energy(&mut self, from: Direction, amount: f32) -> f32 {
        if !self.is_open() {
            trace!(?from, amount, "closed; refusing energy");
            return amount;
        }
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }

        let max = self.base.transport.max_power();
        let slot = self.base.transport.slot_mut(from);
        *slot += amount;
        if *slot > max {
            let overflow = *slot - max;
            *slot = max;
            overflow
        } else {
            0.0
        }
    }

    fn request_energy(&mut self, from: Direction, amount: f32) -> f32 {
        if self.is_open() {
            amount
        } else {
            trace!(?from, amount, "closed; denying request");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NeighborPipe;

    #[derive(Default)]
    struct Quiet {
        calls: usize,
    }

    impl PipeHost for Quiet {
        fn neighbor_pipe(&self, _at: Position, _dir: Direction) -> Option<NeighborPipe> {
            None
        }
        fn is_indirectly_powered(&self, _at: Position) -> bool {
            false
        }
        fn schedule_neighbor_change(&mut self, _pipe: Position) {
            self.calls += 1;
        }
        fn update_entity(&mut self, _pipe: Position) {
            self.calls += 1;
        }
        fn schedule_render_update(&mut self, _pipe: Position) {
            self.calls += 1;
        }
        fn notify_block_change(&mut self, _at: Position) {
            self.calls += 1;
        }
    }

    fn fresh() -> PowerSwitchPipe {
        let mut reg = PipeRegistry::new();
        let cfg = SwitchConfig::default();
        PowerSwitchPipe::register(&mut reg, &cfg);
        PowerSwitchPipe::new(Position::default(), &reg, &cfg)
    }

    #[test]
    fn disjunction_over_all_inputs() {
        for bits in 0u8..8 {
            let s = GateState::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            assert_eq!(s.is_open(), bits != 0);
        }
    }

    #[test]
    fn register_is_once_only() {
        let mut reg = PipeRegistry::new();
        let cfg = SwitchConfig::default();
        assert!(PowerSwitchPipe::register(&mut reg, &cfg));
        assert!(!PowerSwitchPipe::register(&mut reg, &SwitchConfig { capacity: 8, ..cfg }));
        assert_eq!(reg.capacity(PipeKind::POWER_SWITCH), Some(1024));
        assert!(!reg.can_connect(PipeKind::POWER_SWITCH, PipeKind::POWER_SWITCH));
    }

    #[test]
    fn toggle_off_wins_within_one_batch() {
        let mut pipe = fresh();
        let mut host = Quiet::default();
        let batch = ActionBatch::new()
            .with(Action::ToggleOff, true)
            .with(Action::ToggleOn, true);
        pipe.actions_activated(&batch, &mut host);
        assert!(!pipe.state().toggled);
        let reversed = ActionBatch::new()
            .with(Action::ToggleOn, true)
            .with(Action::ToggleOff, true);
        pipe.actions_activated(&reversed, &mut host);
        assert!(!pipe.state().toggled);
    }

    #[test]
    fn unchanged_batch_notifies_nobody() {
        let mut pipe = fresh();
        let mut host = Quiet::default();
        pipe.actions_activated(&ActionBatch::new(), &mut host);
        assert_eq!(host.calls, 0);
    }

    #[test]
    fn icon_follows_open_state() {
        let mut pipe = fresh();
        let mut host = Quiet::default();
        let icons = IconConfig::default();
        assert_eq!(pipe.icon_index(Direction::Up), icons.unpowered);
        pipe.actions_activated(&ActionBatch::new().with(Action::ToggleOn, true), &mut host);
        assert_eq!(pipe.icon_index(Direction::Up), icons.powered);
    }

    #[test]
    fn actions_append_switch_set_to_inherited() {
        let pipe = fresh();
        assert_eq!(pipe.actions(), SWITCH_ACTIONS.to_vec());
    }

    #[test]
    fn inherited_actions_come_before_switch_set() {
        use crate::action::ActionId;

        let mut reg = PipeRegistry::new();
        let cfg = SwitchConfig::default();
        PowerSwitchPipe::register(&mut reg, &cfg);
        let base = PipeBase::new(PipeKind::POWER_SWITCH, Position::default())
            .with_inherited_actions([Action::Other(ActionId(1)), Action::Other(ActionId(2))]);
        let pipe = PowerSwitchPipe::with_base(base, &reg, &cfg);
        assert_eq!(
            pipe.actions(),
            vec![
                Action::Other(ActionId(1)),
                Action::Other(ActionId(2)),
                Action::SwitchOn,
                Action::ToggleOn,
                Action::ToggleOff,
            ]
        );
    }

    #[test]
    fn register_after_host_capacity_still_bans_self_connection() {
        let mut reg = PipeRegistry::new();
        reg.set_capacity(PipeKind::POWER_SWITCH, 512);
        assert!(PowerSwitchPipe::register(&mut reg, &SwitchConfig::default()));
        assert!(!reg.can_connect(PipeKind::POWER_SWITCH, PipeKind::POWER_SWITCH));
        assert_eq!(reg.capacity(PipeKind::POWER_SWITCH), Some(1024));
    }

    #[test]
    fn open_pipe_refuses_nothing_for_non_positive_amounts() {
        let mut pipe = fresh();
        let mut host = Quiet::default();
        pipe.actions_activated(&ActionBatch::new().with(Action::SwitchOn, true), &mut host);
        assert!(pipe.receive_energy(Direction::East, 0.0).abs() < f32::EPSILON);
        assert!(pipe.receive_energy(Direction::East, -5.0).abs() < f32::EPSILON);
        assert!(pipe.transport().slot(Direction::East).abs() < f32::EPSILON);
    }
}
