// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for conduit crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`grid`] - Grid fixtures with a registered power switch at the origin
//! - [`batch`] - Action batch builder

pub mod batch;
pub mod config;
pub mod grid;

pub use batch::BatchBuilder;
pub use config::InMemoryConfigStore;
pub use grid::{GridBuilder, SwitchFixture, ORIGIN};
