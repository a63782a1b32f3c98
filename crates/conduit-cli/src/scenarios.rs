// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reference scenarios run against a power switch on a [`Grid`].

use conduit_core::{
    Action, ActionBatch, Direction, GateState, Grid, HostEvent, Pipe, PipeRegistry, Position,
    PowerHook, PowerSwitchPipe, SwitchConfig,
};
use serde::Serialize;
use tracing::info;

const HERE: Position = Position::new(0, 64, 0);

/// One named assertion inside a scenario.
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    /// What was checked.
    pub label: String,
    /// Whether it held.
    pub ok: bool,
}

/// Result of running one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// Short identifier (`S1`..`S6`).
    pub name: &'static str,
    /// One-line description.
    pub summary: &'static str,
    /// Gate inputs after the last step.
    pub state: GateState,
    /// Individual checks.
    pub checks: Vec<Check>,
}

impl Outcome {
    /// True when every check held.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.ok)
    }
}

struct Bench {
    grid: Grid,
    switch: PowerSwitchPipe,
    checks: Vec<Check>,
}

impl Bench {
    fn new(config: &SwitchConfig) -> Self {
        let mut registry = PipeRegistry::new();
        PowerSwitchPipe::register(&mut registry, config);
        let mut grid = Grid::new();
        grid.place_pipe(HERE);
        Self {
            grid,
            switch: PowerSwitchPipe::new(HERE, &registry, config),
            checks: Vec::new(),
        }
    }

    fn check(&mut self, label: impl Into<String>, ok: bool) {
        self.checks.push(Check {
            label: label.into(),
            ok,
        });
    }

    fn check_energy(&mut self, label: &str, got: f32, want: f32) {
        self.check(format!("{label} = {want}"), (got - want).abs() < 1e-3);
    }

    fn check_state(&mut self, label: &str, want: GateState) {
        let got = self.switch.state();
        self.check(label, got == want);
    }

    fn apply(&mut self, actions: &[Action]) {
        let batch: ActionBatch = actions.iter().copied().collect();
        self.switch.actions_activated(&batch, &mut self.grid);
    }

    fn finish(self, name: &'static str, summary: &'static str) -> Outcome {
        let outcome = Outcome {
            name,
            summary,
            state: self.switch.state(),
            checks: self.checks,
        };
        info!(scenario = name, passed = outcome.passed(), "scenario finished");
        outcome
    }
}

/// Run every scenario in order.
pub fn run_all(config: &SwitchConfig) -> Vec<Outcome> {
    vec![
        fresh_segment(config),
        switch_opens(config),
        switch_release(config),
        switch_disarms_toggle(config),
        toggle_latches(config),
        neighbor_gate(config),
    ]
}

fn fresh_segment(config: &SwitchConfig) -> Outcome {
    let mut b = Bench::new(config);
    b.check("closed", !b.switch.is_open());
    let refused = b.switch.receive_energy(Direction::North, 500.0);
    b.check_energy("receive(NORTH, 500)", refused, 500.0);
    let slot = b.switch.transport().slot(Direction::North);
    b.check_energy("north slot", slot, 0.0);
    let granted = b.switch.request_energy(Direction::South, 100.0);
    b.check_energy("request(SOUTH, 100)", granted, 0.0);
    b.finish("S1", "fresh segment blocks energy")
}

fn switch_opens(config: &SwitchConfig) -> Outcome {
    let mut b = Bench::new(config);
    b.apply(&[Action::SwitchOn]);
    b.check("open", b.switch.is_open());

    let max = b.switch.transport().max_power();
    let mut slot = 0.0f32;
    for amount in [500.0f32, 800.0] {
        let want = (slot + amount - max).max(0.0);
        slot = (slot + amount).min(max);
        let residual = b.switch.receive_energy(Direction::North, amount);
        b.check_energy(&format!("receive(NORTH, {amount})"), residual, want);
        let got = b.switch.transport().slot(Direction::North);
        b.check_energy("north slot", got, slot);
    }
    b.finish("S2", "switch-on opens and clamps at capacity")
}

fn switch_release(config: &SwitchConfig) -> Outcome {
    let mut b = Bench::new(config);
    b.apply(&[Action::SwitchOn]);
    b.apply(&[]);
    b.check_state("all inputs low", GateState::default());
    let granted = b.switch.request_energy(Direction::South, 100.0);
    b.check_energy("request(SOUTH, 100)", granted, 0.0);
    b.finish("S3", "empty batch releases switch")
}

fn switch_disarms_toggle(config: &SwitchConfig) -> Outcome {
    let mut b = Bench::new(config);
    b.apply(&[Action::SwitchOn, Action::ToggleOn]);
    b.check_state("switched and toggled", GateState::new(false, true, true));
    b.apply(&[]);
    b.check_state("switch fall clears toggle", GateState::default());
    b.finish("S4", "switch fall edge disarms toggle")
}

fn toggle_latches(config: &SwitchConfig) -> Outcome {
    let mut b = Bench::new(config);
    b.apply(&[Action::ToggleOn]);
    b.check_state("toggled", GateState::new(false, false, true));
    b.apply(&[]);
    b.check_state("still toggled", GateState::new(false, false, true));
    b.apply(&[Action::ToggleOff]);
    b.check_state("released", GateState::default());
    b.finish("S5", "toggle latches across empty batches")
}

fn neighbor_gate(config: &SwitchConfig) -> Outcome {
    let mut b = Bench::new(config);
    let east = HERE.offset(Direction::East);
    b.grid.place_gated_pipe(east, false);
    b.switch.update_entity(&mut b.grid);
    b.check("closed before signal", !b.switch.is_open());

    b.grid.set_gate_emitting(east, true);
    b.switch.update_entity(&mut b.grid);
    b.check_state("redstone", GateState::new(true, false, false));

    let events = b.grid.drain_events();
    for pipe in [HERE, east] {
        let notified = events.contains(&HostEvent::NeighborChange(pipe))
            && events.contains(&HostEvent::Retick(pipe));
        b.check(format!("notified {pipe:?}"), notified);
    }
    b.finish("S6", "emitting neighbor gate opens segment")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_every_scenario() {
        let outcomes = run_all(&SwitchConfig::default());
        assert_eq!(outcomes.len(), 6);
        for o in &outcomes {
            assert!(o.passed(), "{} failed: {:?}", o.name, o.checks);
        }
    }

    #[test]
    fn smaller_capacity_still_passes() {
        let cfg = SwitchConfig {
            capacity: 600,
            ..SwitchConfig::default()
        };
        assert!(run_all(&cfg).iter().all(Outcome::passed));
    }
}
