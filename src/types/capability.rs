// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Routable capabilities and their source preference order.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SourceRole;

/// A class of command that is routed to a source independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Setting the target temperature.
    Temperature,
    /// Setting the HVAC mode.
    Mode,
    /// Setting the fan mode.
    FanMode,
    /// Turning the thermostat on or off.
    Power,
}

impl Capability {
    /// All routable capabilities.
    pub const ALL: [Self; 4] = [Self::Temperature, Self::Mode, Self::FanMode, Self::Power];

    /// Returns the source preference order for this capability.
    #[must_use]
    pub const fn assignment(&self) -> FailoverAssignment {
        match self {
            Self::Temperature => FailoverAssignment::TEMPERATURE,
            Self::Mode | Self::Power => FailoverAssignment::MODE,
            Self::FanMode => FailoverAssignment::FAN,
        }
    }

    /// Returns a human-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Mode => "hvac mode",
            Self::FanMode => "fan mode",
            Self::Power => "power",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered source preference for one attribute block or capability.
///
/// The preferred source is used whenever it is available; the fallback, if
/// any, only when the preferred source is down.
///
/// # Examples
///
/// ```
/// use climate_unify::types::{FailoverAssignment, SourceRole};
///
/// let temp = FailoverAssignment::TEMPERATURE;
/// assert_eq!(temp.select(true, true), Some(SourceRole::Primary));
/// assert_eq!(temp.select(false, true), Some(SourceRole::Secondary));
///
/// let fan = FailoverAssignment::FAN;
/// assert_eq!(fan.select(true, false), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailoverAssignment {
    /// Source used while it is available.
    pub preferred: SourceRole,
    /// Source used when the preferred one is down, if the capability exists
    /// there at all.
    pub fallback: Option<SourceRole>,
}

impl FailoverAssignment {
    /// Temperature reads and writes: primary, then secondary.
    pub const TEMPERATURE: Self = Self {
        preferred: SourceRole::Primary,
        fallback: Some(SourceRole::Secondary),
    };

    /// HVAC mode and on/off: secondary, then primary.
    pub const MODE: Self = Self {
        preferred: SourceRole::Secondary,
        fallback: Some(SourceRole::Primary),
    };

    /// Fan mode: secondary only.
    pub const FAN: Self = Self {
        preferred: SourceRole::Secondary,
        fallback: None,
    };

    /// Humidity: secondary only.
    pub const HUMIDITY: Self = Self::FAN;

    /// Returns the candidate sources in preference order.
    pub fn candidates(&self) -> impl Iterator<Item = SourceRole> {
        std::iter::once(self.preferred).chain(self.fallback)
    }

    /// Picks the first candidate whose source is available.
    #[must_use]
    pub fn select(&self, primary_available: bool, secondary_available: bool) -> Option<SourceRole> {
        self.candidates().find(|role| match role {
            SourceRole::Primary => primary_available,
            SourceRole::Secondary => secondary_available,
        })
    }
}
