// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use conduit_core::{GateState, HostEvent, Position};

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

pub fn gate(fx_state: GateState) -> (bool, bool, bool, bool) {
    (
        fx_state.redstone,
        fx_state.switched,
        fx_state.toggled,
        fx_state.is_open(),
    )
}

/// Positions that received both a neighbor-change and a re-tick request.
pub fn retick_targets(events: &[HostEvent]) -> Vec<Position> {
    let mut out: Vec<Position> = events
        .iter()
        .filter_map(|e| match e {
            HostEvent::Retick(p) => Some(*p),
            _ => None,
        })
        .filter(|p| events.contains(&HostEvent::NeighborChange(*p)))
        .collect();
    out.sort();
    out
}
