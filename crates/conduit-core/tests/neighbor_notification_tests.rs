// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
mod common;

use common::retick_targets;
use conduit_core::{
    Action, ActionBatch, BlockId, Direction, Grid, HostEvent, Pipe, PipeKind, PipeRegistry,
    Position, PowerSwitchPipe, SwitchConfig,
};
use conduit_dry_tests::{BatchBuilder, GridBuilder, SwitchFixture, ORIGIN};

#[test]
fn redstone_edge_notifies_self_and_every_valid_pipe() {
    let mut fx = GridBuilder::new()
        .gated(Direction::Down, true)
        .pipe(Direction::North)
        .pipe(Direction::West)
        .solid(Direction::South)
        .invalid_pipe(Direction::East, false)
        .build();
    fx.tick();

    let mut expected = vec![
        ORIGIN,
        SwitchFixture::neighbor(Direction::Down),
        SwitchFixture::neighbor(Direction::North),
        SwitchFixture::neighbor(Direction::West),
    ];
    expected.sort();
    assert_eq!(retick_targets(fx.grid.events()), expected);
    assert_eq!(fx.grid.events().len(), 2 * expected.len());
}

#[test]
fn no_edge_means_no_notifications() {
    let mut fx = GridBuilder::new().gated(Direction::Up, true).build();
    fx.tick();
    fx.grid.drain_events();

    fx.tick();
    fx.switch
        .on_neighbor_block_change(BlockId(12), &mut fx.grid);
    assert!(fx.grid.events().is_empty());
}

#[test]
fn falling_redstone_edge_also_notifies() {
    let mut fx = GridBuilder::new().gated(Direction::Up, true).build();
    fx.tick();
    fx.grid.drain_events();

    fx.grid
        .set_gate_emitting(SwitchFixture::neighbor(Direction::Up), false);
    fx.switch.on_neighbor_block_change(BlockId(0), &mut fx.grid);
    assert!(!fx.switch.state().redstone);
    let mut expected = vec![ORIGIN, SwitchFixture::neighbor(Direction::Up)];
    expected.sort();
    assert_eq!(retick_targets(fx.grid.events()), expected);
}

#[test]
fn world_redstone_powers_segment() {
    let mut fx = GridBuilder::new().powered().build();
    fx.tick();
    assert!(fx.switch.state().redstone);
    assert_eq!(retick_targets(fx.grid.events()), vec![ORIGIN]);
}

#[test]
fn invalid_emitting_pipe_is_ignored() {
    let mut fx = GridBuilder::new()
        .invalid_pipe(Direction::North, true)
        .build();
    fx.tick();
    assert!(!fx.switch.state().redstone);
    assert!(fx.grid.events().is_empty());
}

#[test]
fn action_change_redraws_and_notifies_all_six_blocks() {
    let mut fx = GridBuilder::new().pipe(Direction::East).build();
    fx.apply(&BatchBuilder::new().switch_on().build());

    let events = fx.grid.drain_events();
    assert_eq!(events[0], HostEvent::RenderUpdate(ORIGIN));
    let notified: Vec<Position> = events[1..]
        .iter()
        .map(|e| match e {
            HostEvent::BlockNotified(p) => *p,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    let expected: Vec<Position> = Direction::ALL.iter().map(|d| ORIGIN.offset(*d)).collect();
    assert_eq!(notified, expected);
    assert!(!events.iter().any(|e| matches!(e, HostEvent::Retick(_))));
}

#[test]
fn switch_class_bans_self_connection() {
    let fx = GridBuilder::new().build();
    assert!(!fx
        .registry
        .can_connect(PipeKind::POWER_SWITCH, PipeKind::POWER_SWITCH));
    assert!(fx
        .registry
        .can_connect(PipeKind::POWER_SWITCH, PipeKind("wood")));
    assert_eq!(fx.registry.capacity(PipeKind::POWER_SWITCH), Some(1024));
}

#[test]
fn switches_at_world_edges_wrap_neighbor_coordinates() {
    let mut registry = PipeRegistry::new();
    let config = SwitchConfig::default();
    PowerSwitchPipe::register(&mut registry, &config);

    let east_edge = Position::new(i32::MAX, 64, 0);
    let mut grid = Grid::new();
    grid.place_gated_pipe(Position::new(i32::MIN, 64, 0), true);
    let mut switch = PowerSwitchPipe::new(east_edge, &registry, &config);
    switch.update_entity(&mut grid);
    assert!(switch.state().redstone);
    assert!(grid
        .events()
        .contains(&HostEvent::Retick(Position::new(i32::MIN, 64, 0))));

    grid.drain_events();
    switch.actions_activated(&ActionBatch::new().with(Action::SwitchOn, true), &mut grid);
    assert!(switch.is_open());
    let notified = grid
        .events()
        .iter()
        .filter(|e| matches!(e, HostEvent::BlockNotified(_)))
        .count();
    assert_eq!(notified, 6);

    let floor = Position::new(0, i32::MIN, 0);
    let mut grid = Grid::new();
    let mut switch = PowerSwitchPipe::new(floor, &registry, &config);
    switch.update_entity(&mut grid);
    switch.on_neighbor_block_change(BlockId(1), &mut grid);
    switch.actions_activated(&ActionBatch::new().with(Action::ToggleOn, true), &mut grid);
    assert!(grid
        .events()
        .contains(&HostEvent::BlockNotified(Position::new(0, i32::MAX, 0))));
}
