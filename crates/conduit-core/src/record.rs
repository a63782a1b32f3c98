// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Opaque key-value record used to persist pipe state.
//!
//! A [`Record`] is a flat, string-keyed compound of tagged values. Pipes write
//! their fields into it on save and read them back on load; the host owns the
//! surrounding save format. The binary form is CBOR.
//!
//! Reads are forgiving: a missing key or a value of the wrong tag yields the
//! type's default instead of an error, so older or damaged saves still load.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Key under which the redstone flag is saved. Kept for save compatibility.
pub const POWERED_KEY: &str = "powered";
/// Key for the held-switch flag.
pub const SWITCHED_KEY: &str = "switched";
/// Key for the latched-toggle flag.
pub const TOGGLED_KEY: &str = "toggled";

/// A single tagged value stored in a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tag {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// UTF-8 text.
    Text(String),
}

/// Errors raised when converting a record to or from bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The CBOR encoder failed.
    #[error("record encode error: {0}")]
    Encode(String),
    /// The input was not a valid record.
    #[error("record decode error: {0}")]
    Decode(String),
}

/// String-keyed compound of [`Tag`] values, iterated in key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    entries: BTreeMap<String, Tag>,
}

impl Record {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: Tag) {
        self.entries.insert(key.into(), value);
    }

    /// Raw value under `key`.
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    /// Store a boolean under `key`.
    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.set(key, Tag::Bool(value));
    }

    /// Boolean under `key`; `false` when missing or not a boolean.
    pub fn get_bool(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(Tag::Bool(true)))
    }

    /// Whether `key` is present, whatever its tag.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Encode to CBOR.
    pub fn to_cbor(&self) -> Result<Vec<u8>, RecordError> {
        let mut out = Vec::new();
        ciborium::ser::into_writer(self, &mut out)
            .map_err(|e| RecordError::Encode(e.to_string()))?;
        Ok(out)
    }

    /// Decode from CBOR produced by [`to_cbor`](Self::to_cbor).
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, RecordError> {
        ciborium::de::from_reader(bytes).map_err(|e| RecordError::Decode(e.to_string()))
    }
}
