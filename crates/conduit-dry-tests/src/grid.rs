// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Grid fixtures: a registered power switch at [`ORIGIN`] among chosen neighbors.

use conduit_core::{
    ActionBatch, Direction, Grid, Pipe, PipeRegistry, Position, PowerSwitchPipe, SwitchConfig,
    Tile,
};

/// Where fixtures place the switch under test.
pub const ORIGIN: Position = Position::new(0, 64, 0);

/// Builder for a [`SwitchFixture`].
///
/// # Example
///
/// ```
/// use conduit_dry_tests::GridBuilder;
/// use conduit_core::Direction;
///
/// let mut fx = GridBuilder::new().gated(Direction::North, true).build();
/// fx.tick();
/// assert!(fx.switch.is_open());
/// ```
#[derive(Debug, Default)]
pub struct GridBuilder {
    grid: Grid,
    config: SwitchConfig,
}

impl GridBuilder {
    /// Empty surroundings, default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` when registering and building the switch.
    pub fn config(mut self, config: SwitchConfig) -> Self {
        self.config = config;
        self
    }

    /// A valid, gateless pipe towards `dir`.
    pub fn pipe(mut self, dir: Direction) -> Self {
        self.grid.place_pipe(ORIGIN.offset(dir));
        self
    }

    /// A valid pipe towards `dir` whose gate emits `emitting`.
    pub fn gated(mut self, dir: Direction, emitting: bool) -> Self {
        self.grid.place_gated_pipe(ORIGIN.offset(dir), emitting);
        self
    }

    /// A pipe container towards `dir` that the host does not accept as valid.
    pub fn invalid_pipe(mut self, dir: Direction, emitting: bool) -> Self {
        self.grid.set_tile(
            ORIGIN.offset(dir),
            Tile::Pipe {
                valid: false,
                gate: Some(conduit_core::LogicGate::new(emitting)),
            },
        );
        self
    }

    /// A non-pipe block towards `dir`.
    pub fn solid(mut self, dir: Direction) -> Self {
        self.grid.set_tile(ORIGIN.offset(dir), Tile::Solid);
        self
    }

    /// World redstone powers the origin.
    pub fn powered(mut self) -> Self {
        self.grid.set_powered(ORIGIN, true);
        self
    }

    /// Register the switch class and place a fresh switch at [`ORIGIN`].
    pub fn build(mut self) -> SwitchFixture {
        let mut registry = PipeRegistry::new();
        PowerSwitchPipe::register(&mut registry, &self.config);
        self.grid.place_pipe(ORIGIN);
        let switch = PowerSwitchPipe::new(ORIGIN, &registry, &self.config);
        SwitchFixture {
            grid: self.grid,
            registry,
            switch,
        }
    }
}

/// A switch wired into a grid host.
#[derive(Debug)]
pub struct SwitchFixture {
    /// Host world and event log.
    pub grid: Grid,
    /// Registry the switch was registered in.
    pub registry: PipeRegistry,
    /// Segment under test.
    pub switch: PowerSwitchPipe,
}

impl SwitchFixture {
    /// Run one host tick on the switch.
    pub fn tick(&mut self) {
        self.switch.update_entity(&mut self.grid);
    }

    /// Dispatch `batch` to the switch.
    pub fn apply(&mut self, batch: &ActionBatch) {
        self.switch.actions_activated(batch, &mut self.grid);
    }

    /// Position of the neighbor towards `dir`.
    pub fn neighbor(dir: Direction) -> Position {
        ORIGIN.offset(dir)
    }
}
