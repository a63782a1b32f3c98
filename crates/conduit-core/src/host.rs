// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ports between a pipe and the host that ticks it.
//!
//! # Design
//!
//! The host owns the world, the tick loop and every pipe container. Pipes see
//! it only through [`PipeHost`]: neighbor lookups, ambient redstone queries and
//! deferred notifications. Requests such as [`PipeHost::update_entity`] enqueue
//! work for the host; pipes never wait on them.
//!
//! In the other direction the host drives pipes through [`Pipe`] and, for
//! power-carrying kinds, [`PowerHook`]. Both traits are object safe so a host
//! can keep heterogeneous pipes behind `Box<dyn Pipe>`.

use crate::action::{Action, ActionBatch};
use crate::direction::{BlockId, Direction, Position};
use crate::power_switch::IconIndex;
use crate::record::Record;
use crate::registry::PipeKind;
use crate::transport::PowerTransport;

/// Logic gate embedded in a neighboring pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogicGate {
    emitting_redstone: bool,
}

impl LogicGate {
    /// A gate with the given redstone output.
    pub const fn new(emitting_redstone: bool) -> Self {
        Self { emitting_redstone }
    }

    /// Whether the gate currently drives a redstone signal.
    pub const fn is_emitting_redstone(&self) -> bool {
        self.emitting_redstone
    }
}

/// Snapshot of a pipe tile adjacent to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborPipe {
    /// Where the neighbor lives.
    pub position: Position,
    /// Whether the host recognizes the tile's logic as a working pipe.
    pub valid: bool,
    /// Embedded gate, if any.
    pub gate: Option<LogicGate>,
}

impl NeighborPipe {
    /// True when the neighbor is a valid pipe whose gate emits redstone.
    pub fn emits_redstone(&self) -> bool {
        self.valid && self.gate.is_some_and(|g| g.is_emitting_redstone())
    }
}

/// World and container services a pipe may call.
pub trait PipeHost {
    /// The pipe tile one step from `at` towards `dir`.
    ///
    /// Returns `None` when the block is absent or is not a pipe tile.
    fn neighbor_pipe(&self, at: Position, dir: Direction) -> Option<NeighborPipe>;

    /// Whether any redstone source powers `at`, directly or indirectly.
    fn is_indirectly_powered(&self, at: Position) -> bool;

    /// Ask the pipe container at `pipe` to recompute its connections.
    fn schedule_neighbor_change(&mut self, pipe: Position);

    /// Ask the host to re-tick the pipe container at `pipe`.
    fn update_entity(&mut self, pipe: Position);

    /// Ask the host to redraw the pipe container at `pipe`.
    fn schedule_render_update(&mut self, pipe: Position);

    /// Tell whatever block sits at `at` that a neighbor changed.
    fn notify_block_change(&mut self, at: Position);
}

/// Capabilities every pipe exposes to its host.
pub trait Pipe {
    /// Class key of this pipe.
    fn kind(&self) -> PipeKind;

    /// Where the pipe's container lives.
    fn position(&self) -> Position;

    /// Called once per simulation step.
    fn update_entity(&mut self, host: &mut dyn PipeHost);

    /// Called when any adjacent block changes.
    fn on_neighbor_block_change(&mut self, block: BlockId, host: &mut dyn PipeHost);

    /// Actions a gate may bind to this pipe.
    fn actions(&self) -> Vec<Action>;

    /// Called when the activation state of bound actions changes.
    fn actions_activated(&mut self, batch: &ActionBatch, host: &mut dyn PipeHost);

    /// Texture shown on the face towards `dir`.
    fn icon_index(&self, dir: Direction) -> IconIndex;

    /// Persist pipe state into `record`.
    fn write_record(&self, record: &mut Record);

    /// Restore pipe state from `record`.
    fn read_record(&mut self, record: &Record);
}

/// Energy entry points the transport engine calls on power pipes.
pub trait PowerHook {
    /// Offer `amount` arriving from `from`; returns the part that was refused.
    fn receive_energy(&mut self, from: Direction, amount: f32) -> f32;

    /// Ask to draw `amount` out through `from`; returns the amount granted.
    fn request_energy(&mut self, from: Direction, amount: f32) -> f32;
}

/// Behavior shared by all pipes, which specific kinds extend.
#[derive(Debug, Clone)]
pub struct PipeBase {
    kind: PipeKind,
    position: Position,
    inherited_actions: Vec<Action>,
    last_activation: ActionBatch,
    /// Power slots owned by this pipe.
    pub transport: PowerTransport,
}

impl PipeBase {
    /// A pipe of `kind` at `position` with default transport.
    pub fn new(kind: PipeKind, position: Position) -> Self {
        Self {
            kind,
            position,
            inherited_actions: Vec::new(),
            last_activation: ActionBatch::new(),
            transport: PowerTransport::new(),
        }
    }

    /// Add actions every pipe of this host supports (e.g. gate outputs).
    pub fn with_inherited_actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.inherited_actions.extend(actions);
        self
    }

    /// Class key.
    pub fn kind(&self) -> PipeKind {
        self.kind
    }

    /// Container position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Base action list.
    pub fn actions(&self) -> Vec<Action> {
        self.inherited_actions.clone()
    }

    /// Record the raw activation batch so peers can inspect it.
    pub fn actions_activated(&mut self, batch: &ActionBatch) {
        self.last_activation = batch.clone();
    }

    /// The most recent raw activation batch.
    pub fn last_activation(&self) -> &ActionBatch {
        &self.last_activation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionId;

    #[test]
    fn invalid_neighbor_never_emits() {
        let n = NeighborPipe {
            position: Position::default(),
            valid: false,
            gate: Some(LogicGate::new(true)),
        };
        assert!(!n.emits_redstone());
    }

    #[test]
    fn gateless_neighbor_never_emits() {
        let n = NeighborPipe {
            position: Position::default(),
            valid: true,
            gate: None,
        };
        assert!(!n.emits_redstone());
    }

    #[test]
    fn base_remembers_raw_batch() {
        let mut base = PipeBase::new(PipeKind("wood"), Position::default())
            .with_inherited_actions([Action::Other(ActionId(4))]);
        let batch = ActionBatch::new().with(Action::Other(ActionId(4)), false);
        base.actions_activated(&batch);
        assert_eq!(base.last_activation(), &batch);
        assert_eq!(base.actions(), vec![Action::Other(ActionId(4))]);
    }
}
