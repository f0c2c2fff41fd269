// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pair entry identifier type.

use std::fmt;

use uuid::Uuid;

/// Unique identifier of a configured thermostat pair.
///
/// Every [`UnifiedThermostat`](crate::UnifiedThermostat) gets one when it is
/// created. Stable unique ids for the thermostat and its diagnostic
/// indicators are derived from it.
///
/// # Examples
///
/// ```
/// use climate_unify::types::EntryId;
///
/// let id = EntryId::new();
/// assert_ne!(id, EntryId::new());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Creates a new unique entry identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an entry identifier from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the id in the compact form used inside unique ids.
    #[must_use]
    pub fn simple(&self) -> String {
        self.0.simple().to_string()
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = &self.0.to_string()[..8];
        write!(f, "EntryId({short}...)")
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EntryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_unique_ids() {
        assert_ne!(EntryId::new(), EntryId::new());
    }

    #[test]
    fn simple_has_no_hyphens() {
        let uuid = Uuid::parse_str("a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8").unwrap();
        let id = EntryId::from_uuid(uuid);
        assert_eq!(id.simple(), "a1a2a3a4b1b2c1c2d1d2d3d4d5d6d7d8");
        assert_eq!(id.to_string(), "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8");
    }

    #[test]
    fn debug_is_shortened() {
        let debug = format!("{:?}", EntryId::new());
        assert!(debug.starts_with("EntryId("));
        assert!(debug.ends_with("...)"));
    }
}
