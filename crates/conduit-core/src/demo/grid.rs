// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory block grid implementing [`PipeHost`].
//!
//! The grid stores tiles by position, a set of positions the world powers
//! with redstone, and an ordered log of every request pipes made. Hosts use it
//! to drive scenarios; tests use the log to check notifications.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::direction::{Direction, Position};
use crate::host::{LogicGate, NeighborPipe, PipeHost};

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// A pipe container.
    Pipe {
        /// Whether its logic is a working pipe.
        valid: bool,
        /// Embedded gate, if any.
        gate: Option<LogicGate>,
    },
    /// Any non-pipe block.
    Solid,
}

/// A request a pipe made of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HostEvent {
    /// `schedule_neighbor_change` on the pipe at this position.
    NeighborChange(Position),
    /// `update_entity` on the pipe at this position.
    Retick(Position),
    /// `schedule_render_update` on the pipe at this position.
    RenderUpdate(Position),
    /// `notify_block_change` at this position.
    BlockNotified(Position),
}

/// Sparse world of tiles plus an event log.
///
/// Every host request appends to the log and nothing trims it. Hosts that run
/// for many ticks must call [`Grid::drain_events`] once per tick.
#[derive(Debug, Default, Clone)]
pub struct Grid {
    tiles: FxHashMap<Position, Tile>,
    powered: FxHashSet<Position>,
    events: Vec<HostEvent>,
}

impl Grid {
    /// An empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `tile` at `at`, replacing what was there.
    pub fn set_tile(&mut self, at: Position, tile: Tile) {
        self.tiles.insert(at, tile);
    }

    /// Place a valid pipe without a gate.
    pub fn place_pipe(&mut self, at: Position) {
        self.set_tile(
            at,
            Tile::Pipe {
                valid: true,
                gate: None,
            },
        );
    }

    /// Place a valid pipe whose gate emits `emitting`.
    pub fn place_gated_pipe(&mut self, at: Position, emitting: bool) {
        self.set_tile(
            at,
            Tile::Pipe {
                valid: true,
                gate: Some(LogicGate::new(emitting)),
            },
        );
    }

    /// Change the redstone output of the gate at `at`.
    ///
    /// Returns `false` when there is no gated pipe there.
    pub fn set_gate_emitting(&mut self, at: Position, emitting: bool) -> bool {
        match self.tiles.get_mut(&at) {
            Some(Tile::Pipe { gate: Some(g), .. }) => {
                *g = LogicGate::new(emitting);
                true
            }
            _ => false,
        }
    }

    /// Remove whatever occupies `at`.
    pub fn clear_tile(&mut self, at: Position) -> Option<Tile> {
        self.tiles.remove(&at)
    }

    /// Tile at `at`, if any.
    pub fn tile(&self, at: Position) -> Option<Tile> {
        self.tiles.get(&at).copied()
    }

    /// Mark `at` as indirectly powered by world redstone, or not.
    pub fn set_powered(&mut self, at: Position, powered: bool) {
        if powered {
            self.powered.insert(at);
        } else {
            self.powered.remove(&at);
        }
    }

    /// Logged requests, oldest first, since the last drain.
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Take and clear the event log.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }
}

impl PipeHost for Grid {
    fn neighbor_pipe(&self, at: Position, dir: Direction) -> Option<NeighborPipe> {
        let position = at.offset(dir);
        match self.tiles.get(&position)? {
            Tile::Pipe { valid, gate } => Some(NeighborPipe {
                position,
                valid: *valid,
                gate: *gate,
            }),
            Tile::Solid => None,
        }
    }

    fn is_indirectly_powered(&self, at: Position) -> bool {
        self.powered.contains(&at)
    }

    fn schedule_neighbor_change(&mut self, pipe: Position) {
        self.events.push(HostEvent::NeighborChange(pipe));
    }

    fn update_entity(&mut self, pipe: Position) {
        self.events.push(HostEvent::Retick(pipe));
    }

    fn schedule_render_update(&mut self, pipe: Position) {
        self.events.push(HostEvent::RenderUpdate(pipe));
    }

    fn notify_block_change(&mut self, at: Position) {
        self.events.push(HostEvent::BlockNotified(at));
    }
}
