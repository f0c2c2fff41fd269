// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw entity state as held by the host's state store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// State string the host uses for an entity it cannot reach.
pub const STATE_UNAVAILABLE: &str = "unavailable";

/// State string the host uses for an entity with no known value yet.
pub const STATE_UNKNOWN: &str = "unknown";

/// Last known state of one source entity.
///
/// For a climate entity the state string is the current HVAC mode (`"heat"`,
/// `"off"`, ...) and the attributes carry temperatures, mode lists, fan and
/// humidity readings.
///
/// # Examples
///
/// ```
/// use climate_unify::state::EntityState;
///
/// let state = EntityState::new("heat")
///     .with_attribute("current_temperature", 21.5)
///     .with_attribute("hvac_modes", serde_json::json!(["off", "heat"]));
///
/// assert!(state.is_available());
/// assert_eq!(state.attribute_f64("current_temperature"), Some(21.5));
///
/// assert!(!EntityState::unavailable().is_available());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    /// The state string.
    pub state: String,
    /// Attribute payload; may be empty.
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// When the state was last written.
    pub last_changed: DateTime<Utc>,
}

impl EntityState {
    /// Creates a state record with no attributes, stamped now.
    #[must_use]
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: Map::new(),
            last_changed: Utc::now(),
        }
    }

    /// Creates a record for an unreachable entity.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(STATE_UNAVAILABLE)
    }

    /// Adds one attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replaces the attribute payload with the fields of a JSON object.
    ///
    /// Non-object values leave the payload empty.
    #[must_use]
    pub fn with_attributes(mut self, attributes: Value) -> Self {
        self.attributes = match attributes {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self
    }

    /// Returns `true` unless the host marked the entity unavailable.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.state != STATE_UNAVAILABLE
    }

    /// Returns the state string if it carries a real value.
    #[must_use]
    pub fn known_state(&self) -> Option<&str> {
        match self.state.as_str() {
            "" | STATE_UNKNOWN | STATE_UNAVAILABLE => None,
            state => Some(state),
        }
    }

    /// Returns a numeric attribute; integers are widened.
    #[must_use]
    pub fn attribute_f64(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(Value::as_f64)
    }

    /// Returns a string attribute.
    #[must_use]
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Returns the string elements of a list attribute.
    ///
    /// Missing attributes, non-lists and non-string elements are skipped.
    #[must_use]
    pub fn attribute_str_list(&self, key: &str) -> Vec<String> {
        self.attributes
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
