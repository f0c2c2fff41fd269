// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Supported-feature set of a unified thermostat.
//!
//! The feature set is not fixed when a thermostat is created. It is derived
//! again from source availability on every reconciliation, so fan control
//! appears and disappears with the secondary source.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Features a unified thermostat advertises to its consumers.
///
/// # Examples
///
/// ```
/// use climate_unify::ClimateFeatures;
///
/// let base = ClimateFeatures::base();
/// assert!(base.target_temperature);
/// assert!(base.turn_on && base.turn_off);
/// assert!(!base.fan_mode);
///
/// let full = ClimateFeatures::for_availability(true);
/// assert!(full.fan_mode);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
// Each flag is an independent feature bit as advertised to the host platform.
#[allow(clippy::struct_excessive_bools)]
#[non_exhaustive]
pub struct ClimateFeatures {
    /// Target temperature can be set.
    pub target_temperature: bool,

    /// Fan mode can be set.
    pub fan_mode: bool,

    /// The thermostat can be turned on.
    pub turn_on: bool,

    /// The thermostat can be turned off.
    pub turn_off: bool,
}

impl Default for ClimateFeatures {
    fn default() -> Self {
        Self::base()
    }
}

impl ClimateFeatures {
    /// Features advertised regardless of source availability.
    #[must_use]
    pub const fn base() -> Self {
        Self {
            target_temperature: true,
            fan_mode: false,
            turn_on: true,
            turn_off: true,
        }
    }

    /// Features advertised when the secondary source is in the given state.
    ///
    /// Fan control exists only on the secondary source, so it is advertised
    /// only while that source is available.
    #[must_use]
    pub const fn for_availability(secondary_available: bool) -> Self {
        let mut features = Self::base();
        features.fan_mode = secondary_available;
        features
    }

    /// Returns the platform bitmask for this feature set.
    ///
    /// Bit values follow the usual climate-entity feature flags:
    /// target temperature = 1, fan mode = 8, turn off = 128, turn on = 256.
    #[must_use]
    pub const fn bits(&self) -> u32 {
        let mut bits = 0;
        if self.target_temperature {
            bits |= 1;
        }
        if self.fan_mode {
            bits |= 8;
        }
        if self.turn_off {
            bits |= 128;
        }
        if self.turn_on {
            bits |= 256;
        }
        bits
    }
}

impl fmt::Display for ClimateFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (self.target_temperature, "target_temperature"),
            (self.fan_mode, "fan_mode"),
            (self.turn_on, "turn_on"),
            (self.turn_off, "turn_off"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect();
        write!(f, "{}", names.join("|"))
    }
}
