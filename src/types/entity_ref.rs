// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity identifier type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Identifier of a source entity in the host's state store.
///
/// Entity ids have the form `domain.object_id`, for example
/// `climate.living_room`. The reference is otherwise opaque: the engine only
/// compares, hashes and displays it.
///
/// # Examples
///
/// ```
/// use climate_unify::types::EntityRef;
///
/// let entity = EntityRef::new("climate.living_room_matter").unwrap();
/// assert_eq!(entity.domain(), "climate");
/// assert_eq!(entity.object_id(), "living_room_matter");
///
/// assert!(EntityRef::new("living_room").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityRef(String);

impl EntityRef {
    /// Creates an entity reference, checking the `domain.object_id` shape.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedEntityRef`] if either part is empty or
    /// the separator is missing.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        match id.split_once('.') {
            Some((domain, object_id)) if !domain.is_empty() && !object_id.is_empty() => {
                Ok(Self(id))
            }
            _ => Err(ConfigError::MalformedEntityRef(id)),
        }
    }

    /// Returns the full entity id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the domain part (before the first `.`).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('.').map_or("", |(domain, _)| domain)
    }

    /// Returns the object id part (after the first `.`).
    #[must_use]
    pub fn object_id(&self) -> &str {
        self.0.split_once('.').map_or("", |(_, object_id)| object_id)
    }

    /// Returns `true` if this entity belongs to the `climate` domain.
    #[must_use]
    pub fn is_climate(&self) -> bool {
        self.domain() == "climate"
    }

    /// Returns this reference with `suffix` removed from the end of the id.
    ///
    /// Returns `None` if the id does not end with the suffix or if stripping
    /// would leave a malformed id.
    #[must_use]
    pub fn strip_suffix(&self, suffix: &str) -> Option<Self> {
        self.0
            .strip_suffix(suffix)
            .and_then(|base| Self::new(base).ok())
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityRef({})", self.0)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityRef {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntityRef {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityRef> for String {
    fn from(entity: EntityRef) -> Self {
        entity.0
    }
}

impl AsRef<str> for EntityRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_domain_and_object_id() {
        let entity = EntityRef::new("climate.hallway").unwrap();
        assert_eq!(entity.domain(), "climate");
        assert_eq!(entity.object_id(), "hallway");
        assert!(entity.is_climate());
    }

    #[test]
    fn object_id_may_contain_dots() {
        let entity = EntityRef::new("sensor.a.b").unwrap();
        assert_eq!(entity.domain(), "sensor");
        assert_eq!(entity.object_id(), "a.b");
        assert!(!entity.is_climate());
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in ["", "climate", "climate.", ".hallway"] {
            assert!(
                matches!(EntityRef::new(bad), Err(ConfigError::MalformedEntityRef(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn strip_suffix() {
        let entity = EntityRef::new("climate.office_matter").unwrap();
        let base = entity.strip_suffix("_matter").unwrap();
        assert_eq!(base.as_str(), "climate.office");

        assert!(entity.strip_suffix("_cloud").is_none());
        let only_suffix = EntityRef::new("climate._matter").unwrap();
        assert!(only_suffix.strip_suffix("_matter").is_none());
    }

    #[test]
    fn serde_validates() {
        let entity: EntityRef = serde_json::from_str("\"climate.den\"").unwrap();
        assert_eq!(entity.as_str(), "climate.den");
        assert!(serde_json::from_str::<EntityRef>("\"den\"").is_err());
        assert_eq!(serde_json::to_string(&entity).unwrap(), "\"climate.den\"");
    }

    #[test]
    fn debug_format() {
        let entity = EntityRef::new("climate.den").unwrap();
        assert_eq!(format!("{entity:?}"), "EntityRef(climate.den)");
    }
}
