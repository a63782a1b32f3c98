// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Demo hosts used by the CLI scenarios and integration tests.

pub mod grid;
