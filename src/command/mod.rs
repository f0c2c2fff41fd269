// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate command definitions.
//!
//! Commands are what consumers ask the unified thermostat to do. Each command
//! belongs to one [`Capability`], which decides the source it is routed to,
//! and maps onto a service call of the source entity.
//!
//! # Available Commands
//!
//! | Command | Service | Capability |
//! |---------|---------|------------|
//! | [`ClimateCommand::SetTemperature`] | `set_temperature` | [`Capability::Temperature`] |
//! | [`ClimateCommand::SetHvacMode`] | `set_hvac_mode` | [`Capability::Mode`] |
//! | [`ClimateCommand::SetFanMode`] | `set_fan_mode` | [`Capability::FanMode`] |
//! | [`ClimateCommand::TurnOn`] | `turn_on` | [`Capability::Power`] |
//! | [`ClimateCommand::TurnOff`] | `turn_off` | [`Capability::Power`] |
//!
//! # Examples
//!
//! ```
//! use climate_unify::command::ClimateCommand;
//! use climate_unify::types::Capability;
//!
//! let cmd = ClimateCommand::set_temperature(21.0);
//! assert_eq!(cmd.service(), "set_temperature");
//! assert_eq!(cmd.capability(), Capability::Temperature);
//! assert_eq!(cmd.parameters(), serde_json::json!({"temperature": 21.0}));
//! ```

use std::fmt;

use serde_json::{Map, Value, json};

use crate::engine::Route;
use crate::error::Error;
use crate::types::{Capability, EntityRef};

/// A write command for a unified thermostat.
#[derive(Debug, Clone, PartialEq)]
pub enum ClimateCommand {
    /// Set the target temperature.
    ///
    /// A request without a temperature is accepted and then ignored.
    SetTemperature {
        /// The new target temperature.
        temperature: Option<f64>,
    },

    /// Set the HVAC mode.
    SetHvacMode(String),

    /// Set the fan mode.
    SetFanMode(String),

    /// Turn the thermostat on.
    TurnOn,

    /// Turn the thermostat off.
    TurnOff,
}

impl ClimateCommand {
    /// Creates a set-temperature command.
    #[must_use]
    pub fn set_temperature(temperature: f64) -> Self {
        Self::SetTemperature {
            temperature: Some(temperature),
        }
    }

    /// Creates a set-HVAC-mode command.
    #[must_use]
    pub fn set_hvac_mode(mode: impl Into<String>) -> Self {
        Self::SetHvacMode(mode.into())
    }

    /// Creates a set-fan-mode command.
    #[must_use]
    pub fn set_fan_mode(mode: impl Into<String>) -> Self {
        Self::SetFanMode(mode.into())
    }

    /// Returns the capability this command exercises.
    #[must_use]
    pub const fn capability(&self) -> Capability {
        match self {
            Self::SetTemperature { .. } => Capability::Temperature,
            Self::SetHvacMode(_) => Capability::Mode,
            Self::SetFanMode(_) => Capability::FanMode,
            Self::TurnOn | Self::TurnOff => Capability::Power,
        }
    }

    /// Returns the service name invoked on the source entity.
    #[must_use]
    pub const fn service(&self) -> &'static str {
        match self {
            Self::SetTemperature { .. } => "set_temperature",
            Self::SetHvacMode(_) => "set_hvac_mode",
            Self::SetFanMode(_) => "set_fan_mode",
            Self::TurnOn => "turn_on",
            Self::TurnOff => "turn_off",
        }
    }

    /// Returns the service parameters, without the target entity.
    #[must_use]
    pub fn parameters(&self) -> Value {
        match self {
            Self::SetTemperature {
                temperature: Some(t),
            } => json!({ "temperature": t }),
            Self::SetHvacMode(mode) => json!({ "hvac_mode": mode }),
            Self::SetFanMode(mode) => json!({ "fan_mode": mode }),
            Self::SetTemperature { temperature: None } | Self::TurnOn | Self::TurnOff => {
                Value::Object(Map::new())
            }
        }
    }

    /// Returns `true` if the command carries everything it needs.
    ///
    /// Only a set-temperature without a temperature is incomplete.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self, Self::SetTemperature { temperature: None })
    }

    /// Parses a service call into a command.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapabilityRequest`] for unknown services and
    /// for mode or fan calls without their value. A `set_temperature` call
    /// without a temperature parses to an incomplete command.
    pub fn from_service(service: &str, parameters: &Value) -> Result<Self, Error> {
        let string_param = |key: &str| {
            parameters
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| Error::InvalidCapabilityRequest(format!("{service} requires {key}")))
        };

        match service {
            "set_temperature" => Ok(Self::SetTemperature {
                temperature: parameters.get("temperature").and_then(Value::as_f64),
            }),
            "set_hvac_mode" => string_param("hvac_mode").map(Self::SetHvacMode),
            "set_fan_mode" => string_param("fan_mode").map(Self::SetFanMode),
            "turn_on" => Ok(Self::TurnOn),
            "turn_off" => Ok(Self::TurnOff),
            other => Err(Error::InvalidCapabilityRequest(format!(
                "unknown service: {other}"
            ))),
        }
    }
}

impl fmt::Display for ClimateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetTemperature {
                temperature: Some(t),
            } => write!(f, "set_temperature {t}"),
            Self::SetHvacMode(mode) => write!(f, "set_hvac_mode {mode}"),
            Self::SetFanMode(mode) => write!(f, "set_fan_mode {mode}"),
            other => f.write_str(other.service()),
        }
    }
}

/// What happened to an executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command was accepted by a source.
    Dispatched {
        /// The entity the command was sent to.
        entity: EntityRef,
        /// How the entity was chosen.
        route: Route,
    },
    /// The command was incomplete and nothing was sent.
    Ignored,
}

impl CommandOutcome {
    /// Returns `true` if the command reached a source.
    #[must_use]
    pub const fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched { .. })
    }

    /// Returns the entity the command was sent to, if any.
    #[must_use]
    pub const fn entity(&self) -> Option<&EntityRef> {
        match self {
            Self::Dispatched { entity, .. } => Some(entity),
            Self::Ignored => None,
        }
    }
}
