// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature unit of a unified thermostat.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unit in which a unified thermostat reports and accepts temperatures.
///
/// Both sources are expected to report in this unit. Values are passed
/// through unconverted.
///
/// # Examples
///
/// ```
/// use climate_unify::types::TemperatureUnit;
///
/// assert_eq!(TemperatureUnit::default(), TemperatureUnit::Celsius);
/// assert_eq!(TemperatureUnit::Fahrenheit.symbol(), "°F");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// Returns the unit symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
