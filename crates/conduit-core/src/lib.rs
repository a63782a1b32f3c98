// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Conduit core: a redstone-gated power pipe segment.
//!
//! The segment sits between two power pipes and either passes energy through
//! or refuses it. It is open while any of three inputs holds: redstone reaching
//! the block, a held switch action, or a latched toggle action. Whenever its
//! redstone input flips or its action inputs change, it asks the host to have
//! neighboring pipes recompute their connections.
//!
//! # Modules
//!
//! - [`direction`] - cardinal directions and block positions
//! - [`action`] - gate actions and activation batches
//! - [`record`] - key-value persistence record (CBOR)
//! - [`registry`] - class-keyed capacities and connection bans
//! - [`transport`] - per-direction incoming energy slots
//! - [`host`] - host ports ([`PipeHost`]) and pipe capabilities ([`Pipe`], [`PowerHook`])
//! - [`power_switch`] - the gated segment itself
//! - [`config`] - config store port and switch tunables
//! - [`demo`] - in-memory grid host

pub mod action;
pub mod config;
pub mod demo;
pub mod direction;
pub mod host;
pub mod power_switch;
pub mod record;
pub mod registry;
pub mod transport;

pub use action::{Action, ActionBatch, ActionId, ActionKind, SWITCH_ACTIONS};
pub use config::{ConfigError, ConfigService, ConfigStore, IconConfig, SwitchConfig};
pub use demo::grid::{Grid, HostEvent, Tile};
pub use direction::{BlockId, Direction, Position};
pub use host::{LogicGate, NeighborPipe, Pipe, PipeBase, PipeHost, PowerHook};
pub use power_switch::{GateState, IconIndex, PowerSwitchPipe};
pub use record::{Record, RecordError, Tag, POWERED_KEY, SWITCHED_KEY, TOGGLED_KEY};
pub use registry::{PipeKind, PipeRegistry, DEFAULT_CAPACITY};
pub use transport::PowerTransport;
