// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Gate actions and the activation batches the host dispatches.
//!
//! Actions are classified by tag, not by type. The power switch only
//! interprets [`Action::SwitchOn`], [`Action::ToggleOn`] and
//! [`Action::ToggleOff`]; everything else arrives as [`Action::Other`] and is
//! left to the inherited pipe behavior.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a host action this crate does not interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(pub u32);

/// An action that can be bound to a pipe through a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Open while held.
    SwitchOn,
    /// Latch open.
    ToggleOn,
    /// Release the latch.
    ToggleOff,
    /// Any other host action.
    Other(ActionId),
}

/// Classification used by the switch dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Momentary switch.
    Switch,
    /// Latch on.
    ToggleOn,
    /// Latch off.
    ToggleOff,
    /// Not ours.
    Foreign,
}

impl Action {
    /// Classify this action for dispatch.
    pub const fn kind(self) -> ActionKind {
        match self {
            Self::SwitchOn => ActionKind::Switch,
            Self::ToggleOn => ActionKind::ToggleOn,
            Self::ToggleOff => ActionKind::ToggleOff,
            Self::Other(_) => ActionKind::Foreign,
        }
    }

    /// Short stable label, used in logs and CLI listings.
    pub fn label(self) -> String {
        match self {
            Self::SwitchOn => "switch_on".to_owned(),
            Self::ToggleOn => "toggle_on".to_owned(),
            Self::ToggleOff => "toggle_off".to_owned(),
            Self::Other(ActionId(id)) => format!("action#{id}"),
        }
    }
}

/// The three actions a power switch advertises on top of its inherited list.
pub const SWITCH_ACTIONS: [Action; 3] = [Action::SwitchOn, Action::ToggleOn, Action::ToggleOff];

/// Activation state of every action bound to a pipe for one dispatch cycle.
///
/// Insertion order is preserved; the dispatcher does not depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBatch {
    entries: Vec<(Action, bool)>,
}

impl ActionBatch {
    /// A batch with no bound actions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `action` with its activation flag.
    pub fn push(&mut self, action: Action, active: bool) {
        self.entries.push((action, active));
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, action: Action, active: bool) -> Self {
        self.push(action, active);
        self
    }

    /// All `(action, active)` pairs in insertion order.
    pub fn entries(&self) -> &[(Action, bool)] {
        &self.entries
    }

    /// Actions whose activation flag is set.
    pub fn active(&self) -> impl Iterator<Item = Action> + '_ {
        self.entries
            .iter()
            .filter(|(_, on)| *on)
            .map(|(action, _)| *action)
    }

    /// Number of bound actions, active or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no actions are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Action, bool)> for ActionBatch {
    fn from_iter<I: IntoIterator<Item = (Action, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Action> for ActionBatch {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter().map(|a| (a, true)).collect()
    }
}
