// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pair configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{EntityRef, SourceLabels, SourceRole, TemperatureUnit};

/// Default display name of a unified thermostat.
pub const DEFAULT_PAIR_NAME: &str = "Unified Thermostat";

/// Configuration of one unified thermostat.
///
/// # Examples
///
/// ```
/// use climate_unify::pairing::PairConfig;
/// use climate_unify::types::{EntityRef, SourceLabels};
///
/// let config = PairConfig::new(
///     EntityRef::new("climate.office_matter").unwrap(),
///     EntityRef::new("climate.office").unwrap(),
/// )
/// .with_name("Office Unified")
/// .with_labels(SourceLabels::new("local", "cloud"));
///
/// assert_eq!(config.unique_id(), "climate.office_matter_climate.office");
/// ```
///
/// Stored configurations use the entity keys of the setup flow:
///
/// ```
/// use climate_unify::pairing::PairConfig;
///
/// let config = PairConfig::from_json(
///     r#"{"name": "Den", "matter_entity": "climate.den_matter", "google_entity": "climate.den"}"#,
/// )
/// .unwrap();
/// assert_eq!(config.primary.as_str(), "climate.den_matter");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairConfig {
    /// Display name of the unified thermostat.
    #[serde(default = "default_name")]
    pub name: String,
    /// The primary (fast, local) source.
    #[serde(alias = "matter_entity")]
    pub primary: EntityRef,
    /// The secondary (full-featured, cloud) source.
    #[serde(alias = "google_entity")]
    pub secondary: EntityRef,
    /// Labels reported by diagnostics.
    #[serde(default)]
    pub labels: SourceLabels,
    /// Unit both sources report in.
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
}

fn default_name() -> String {
    DEFAULT_PAIR_NAME.to_string()
}

impl PairConfig {
    /// Creates a configuration with the default name and labels.
    #[must_use]
    pub fn new(primary: EntityRef, secondary: EntityRef) -> Self {
        Self {
            name: default_name(),
            primary,
            secondary,
            labels: SourceLabels::default(),
            temperature_unit: TemperatureUnit::default(),
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not valid JSON, is
    /// missing an entity, or carries a malformed entity id.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::from)
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the diagnostic labels.
    #[must_use]
    pub fn with_labels(mut self, labels: SourceLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the temperature unit.
    #[must_use]
    pub fn with_temperature_unit(mut self, unit: TemperatureUnit) -> Self {
        self.temperature_unit = unit;
        self
    }

    /// Returns the composite key identifying this pair.
    #[must_use]
    pub fn unique_id(&self) -> String {
        composite_key(&self.primary, &self.secondary)
    }

    /// Returns the entity playing `role`.
    #[must_use]
    pub fn entity(&self, role: SourceRole) -> &EntityRef {
        match role {
            SourceRole::Primary => &self.primary,
            SourceRole::Secondary => &self.secondary,
        }
    }

    /// Returns `true` if `entity` is one of the two sources.
    #[must_use]
    pub fn watches(&self, entity: &EntityRef) -> bool {
        &self.primary == entity || &self.secondary == entity
    }
}

/// Builds the composite key `"{primary}_{secondary}"` of a pair.
#[must_use]
pub fn composite_key(primary: &EntityRef, secondary: &EntityRef) -> String {
    format!("{primary}_{secondary}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str) -> EntityRef {
        EntityRef::new(id).unwrap()
    }

    #[test]
    fn defaults() {
        let config = PairConfig::new(entity("climate.a_matter"), entity("climate.a"));
        assert_eq!(config.name, "Unified Thermostat");
        assert_eq!(config.labels, SourceLabels::default());
        assert_eq!(config.temperature_unit, TemperatureUnit::Celsius);
    }

    #[test]
    fn watches_both_sources() {
        let config = PairConfig::new(entity("climate.a_matter"), entity("climate.a"));
        assert!(config.watches(&entity("climate.a_matter")));
        assert!(config.watches(&entity("climate.a")));
        assert!(!config.watches(&entity("climate.b")));
    }

    #[test]
    fn from_json_with_plain_keys() {
        let config = PairConfig::from_json(
            r#"{"primary": "climate.x_matter", "secondary": "climate.x",
                "labels": {"primary": "thread", "secondary": "cloud"}}"#,
        )
        .unwrap();
        assert_eq!(config.name, DEFAULT_PAIR_NAME);
        assert_eq!(config.labels.primary, "thread");
        assert_eq!(config.temperature_unit, TemperatureUnit::Celsius);
    }

    #[test]
    fn from_json_with_temperature_unit() {
        let config = PairConfig::from_json(
            r#"{"primary": "climate.x_matter", "secondary": "climate.x",
                "temperature_unit": "fahrenheit"}"#,
        )
        .unwrap();
        assert_eq!(config.temperature_unit, TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn from_json_rejects_malformed_entity() {
        let err = PairConfig::from_json(r#"{"primary": "nodot", "secondary": "climate.x"}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn serializes_with_plain_keys() {
        let config = PairConfig::new(entity("climate.a_matter"), entity("climate.a"));
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["primary"], "climate.a_matter");
        assert_eq!(value["secondary"], "climate.a");
    }
}
