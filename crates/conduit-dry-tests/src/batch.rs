// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Action batch builder.

use conduit_core::{Action, ActionBatch, ActionId};

/// Fluent construction of [`ActionBatch`] values for tests.
#[derive(Debug, Default, Clone)]
pub struct BatchBuilder {
    batch: ActionBatch,
}

impl BatchBuilder {
    /// No bound actions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch-on, active.
    pub fn switch_on(self) -> Self {
        self.active(Action::SwitchOn)
    }

    /// Toggle-on, active.
    pub fn toggle_on(self) -> Self {
        self.active(Action::ToggleOn)
    }

    /// Toggle-off, active.
    pub fn toggle_off(self) -> Self {
        self.active(Action::ToggleOff)
    }

    /// A foreign host action with the given id and flag.
    pub fn foreign(mut self, id: u32, active: bool) -> Self {
        self.batch.push(Action::Other(ActionId(id)), active);
        self
    }

    /// `action` bound but not active.
    pub fn inactive(mut self, action: Action) -> Self {
        self.batch.push(action, false);
        self
    }

    /// `action` bound and active.
    pub fn active(mut self, action: Action) -> Self {
        self.batch.push(action, true);
        self
    }

    /// Finish.
    pub fn build(self) -> ActionBatch {
        self.batch
    }
}
