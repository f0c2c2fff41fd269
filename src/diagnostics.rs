// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagnostic indicators.
//!
//! Each unified thermostat exposes three read-only indicators naming the
//! source that currently serves a capability:
//!
//! | Key | Name | Capability |
//! |-----|------|------------|
//! | `temperature_source` | Temperature Source | [`Capability::Temperature`] |
//! | `hvac_source` | HVAC Source | [`Capability::Mode`] |
//! | `fan_source` | Fan Source | [`Capability::FanMode`] |
//!
//! Values are a source label (`"matter"`), a fallback label
//! (`"google (fallback)"`) or `"unavailable"`.
//!
//! The thermostat and its indicators are grouped under one [`DeviceInfo`].

use serde::Serialize;

use crate::types::{Capability, EntryId};

/// Prefix of every unique id issued by this crate.
pub const UNIQUE_ID_PREFIX: &str = "climate_unify";

/// Manufacturer reported for every unified thermostat device.
pub const DEVICE_MANUFACTURER: &str = "Google";

/// Model reported for every unified thermostat device.
pub const DEVICE_MODEL: &str = "Nest Thermostat (Unified)";

/// A diagnostic indicator definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticIndicator {
    /// Stable key, used in unique ids.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// The capability whose active source is reported.
    pub capability: Capability,
}

/// The indicators every unified thermostat exposes.
pub const INDICATORS: [DiagnosticIndicator; 3] = [
    DiagnosticIndicator {
        key: "temperature_source",
        name: "Temperature Source",
        capability: Capability::Temperature,
    },
    DiagnosticIndicator {
        key: "hvac_source",
        name: "HVAC Source",
        capability: Capability::Mode,
    },
    DiagnosticIndicator {
        key: "fan_source",
        name: "Fan Source",
        capability: Capability::FanMode,
    },
];

/// One indicator's current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReading {
    /// Indicator key.
    pub key: &'static str,
    /// Indicator display name.
    pub name: &'static str,
    /// Stable unique id of the indicator.
    pub unique_id: String,
    /// Active source description.
    pub value: String,
}

/// Device registry entry shared by a thermostat and its indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Stable device identifier, the thermostat's unique id.
    pub identifier: String,
    /// Display name.
    pub name: String,
    /// Manufacturer.
    pub manufacturer: &'static str,
    /// Model.
    pub model: &'static str,
}

impl DeviceInfo {
    /// Describes the device of the thermostat with `entry_id`.
    #[must_use]
    pub fn new(entry_id: EntryId, name: impl Into<String>) -> Self {
        Self {
            identifier: thermostat_unique_id(entry_id),
            name: name.into(),
            manufacturer: DEVICE_MANUFACTURER,
            model: DEVICE_MODEL,
        }
    }
}

/// Returns the unique id of a unified thermostat.
#[must_use]
pub fn thermostat_unique_id(entry_id: EntryId) -> String {
    format!("{UNIQUE_ID_PREFIX}_{}", entry_id.simple())
}

/// Returns the unique id of one of a thermostat's indicators.
#[must_use]
pub fn indicator_unique_id(entry_id: EntryId, key: &str) -> String {
    format!("{}_{key}", thermostat_unique_id(entry_id))
}
