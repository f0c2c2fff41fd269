// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-source snapshot read from the state store.

use serde::{Deserialize, Serialize};

use super::EntityState;

/// Lower temperature bound used when no source reports one.
pub const DEFAULT_MIN_TEMP: f64 = 7.0;

/// Upper temperature bound used when no source reports one.
pub const DEFAULT_MAX_TEMP: f64 = 35.0;

/// Attribute keys of a climate entity.
mod attr {
    pub const CURRENT_TEMPERATURE: &str = "current_temperature";
    pub const TARGET_TEMPERATURE: &str = "temperature";
    pub const MIN_TEMP: &str = "min_temp";
    pub const MAX_TEMP: &str = "max_temp";
    pub const HVAC_MODES: &str = "hvac_modes";
    pub const FAN_MODE: &str = "fan_mode";
    pub const FAN_MODES: &str = "fan_modes";
    pub const CURRENT_HUMIDITY: &str = "current_humidity";
}

/// What one source currently reports.
///
/// A snapshot has no lifecycle of its own: it is rebuilt from the state store
/// every time it is needed. A source that was never observed and a source
/// the host marks unavailable produce the same snapshot,
/// [`SourceSnapshot::unavailable`].
///
/// # Examples
///
/// ```
/// use climate_unify::state::{EntityState, SourceSnapshot};
///
/// let state = EntityState::new("heat").with_attribute("temperature", 22);
/// let snapshot = SourceSnapshot::from_state(Some(&state));
/// assert!(snapshot.available);
/// assert_eq!(snapshot.mode.as_deref(), Some("heat"));
/// assert_eq!(snapshot.target_temperature, Some(22.0));
/// assert_eq!(snapshot.min_temp, 7.0);
///
/// assert_eq!(SourceSnapshot::from_state(None), SourceSnapshot::unavailable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSnapshot {
    /// Whether the source is reachable.
    pub available: bool,
    /// Current HVAC mode.
    pub mode: Option<String>,
    /// Measured temperature.
    pub current_temperature: Option<f64>,
    /// Target temperature.
    pub target_temperature: Option<f64>,
    /// Lowest settable temperature.
    pub min_temp: f64,
    /// Highest settable temperature.
    pub max_temp: f64,
    /// HVAC modes the source accepts, in the order it reports them.
    pub supported_modes: Vec<String>,
    /// Current fan mode.
    pub fan_mode: Option<String>,
    /// Fan modes the source accepts, in the order it reports them.
    pub supported_fan_modes: Vec<String>,
    /// Measured relative humidity.
    pub humidity: Option<f64>,
}

impl Default for SourceSnapshot {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl SourceSnapshot {
    /// Snapshot of a source that is down or not yet observed.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            mode: None,
            current_temperature: None,
            target_temperature: None,
            min_temp: DEFAULT_MIN_TEMP,
            max_temp: DEFAULT_MAX_TEMP,
            supported_modes: Vec::new(),
            fan_mode: None,
            supported_fan_modes: Vec::new(),
            humidity: None,
        }
    }

    /// Builds a snapshot from the store's record for a source entity.
    ///
    /// Missing or mistyped attributes read as absent; the temperature bounds
    /// fall back to their defaults. An unavailable entity yields
    /// [`SourceSnapshot::unavailable`] even if stale attributes are present.
    #[must_use]
    pub fn from_state(state: Option<&EntityState>) -> Self {
        let Some(state) = state.filter(|s| s.is_available()) else {
            return Self::unavailable();
        };

        Self {
            available: true,
            mode: state.known_state().map(str::to_string),
            current_temperature: state.attribute_f64(attr::CURRENT_TEMPERATURE),
            target_temperature: state.attribute_f64(attr::TARGET_TEMPERATURE),
            min_temp: state
                .attribute_f64(attr::MIN_TEMP)
                .unwrap_or(DEFAULT_MIN_TEMP),
            max_temp: state
                .attribute_f64(attr::MAX_TEMP)
                .unwrap_or(DEFAULT_MAX_TEMP),
            supported_modes: state.attribute_str_list(attr::HVAC_MODES),
            fan_mode: state.attribute_str(attr::FAN_MODE).map(str::to_string),
            supported_fan_modes: state.attribute_str_list(attr::FAN_MODES),
            humidity: state.attribute_f64(attr::CURRENT_HUMIDITY),
        }
    }
}
