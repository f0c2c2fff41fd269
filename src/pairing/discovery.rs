// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Naming-convention pair discovery.

use std::collections::{BTreeSet, HashSet};

use super::pair_config::{PairConfig, composite_key};
use crate::types::EntityRef;

/// Default suffix that marks a primary entity.
pub const DEFAULT_PRIMARY_SUFFIX: &str = "_matter";

/// Options for [`discover_pairs`].
///
/// # Examples
///
/// ```
/// use climate_unify::pairing::DiscoveryOptions;
///
/// let options = DiscoveryOptions::new().with_suffix("_thread");
/// assert_eq!(options.suffix(), "_thread");
/// assert_eq!(DiscoveryOptions::default().suffix(), "_matter");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Suffix identifying primary entities.
    suffix: Option<String>,
}

impl DiscoveryOptions {
    /// Creates options with default settings.
    ///
    /// The default suffix is `_matter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the suffix that marks a primary entity.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Returns the effective suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or(DEFAULT_PRIMARY_SUFFIX)
    }
}

/// A candidate pair found by [`discover_pairs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPair {
    /// Room name derived from the secondary entity, e.g. `"Living Room"`.
    pub room: String,
    /// The primary entity (carries the suffix).
    pub primary: EntityRef,
    /// The secondary entity.
    pub secondary: EntityRef,
}

impl DiscoveredPair {
    /// Returns the proposed display name, e.g. `"Living Room Unified"`.
    #[must_use]
    pub fn proposed_name(&self) -> String {
        format!("{} Unified", self.room)
    }

    /// Returns the composite key of the pair.
    #[must_use]
    pub fn unique_id(&self) -> String {
        composite_key(&self.primary, &self.secondary)
    }

    /// Turns the candidate into a configuration named after its room.
    #[must_use]
    pub fn into_config(self) -> PairConfig {
        let name = self.proposed_name();
        PairConfig::new(self.primary, self.secondary).with_name(name)
    }
}

/// Finds candidate pairs among `entities` by naming convention.
///
/// An entity `climate.<x><suffix>` pairs with `climate.<x>` when both exist.
/// Only `climate` entities are considered, and pairs whose composite key is
/// in `configured` are skipped. Results are ordered by primary entity id.
///
/// # Examples
///
/// ```
/// use climate_unify::pairing::{DiscoveryOptions, discover_pairs};
/// use climate_unify::types::EntityRef;
///
/// let ids = ["climate.living_room", "climate.living_room_matter", "climate.attic"];
/// let entities: Vec<EntityRef> = ids
///     .into_iter()
///     .map(|id| EntityRef::new(id).unwrap())
///     .collect();
///
/// let pairs = discover_pairs(&entities, &[], &DiscoveryOptions::default());
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].room, "Living Room");
/// assert_eq!(pairs[0].proposed_name(), "Living Room Unified");
/// ```
#[must_use]
pub fn discover_pairs(
    entities: &[EntityRef],
    configured: &[String],
    options: &DiscoveryOptions,
) -> Vec<DiscoveredPair> {
    let suffix = options.suffix();
    let climate: BTreeSet<&EntityRef> = entities.iter().filter(|e| e.is_climate()).collect();
    let configured: HashSet<&str> = configured.iter().map(String::as_str).collect();

    let pairs: Vec<DiscoveredPair> = climate
        .iter()
        .filter_map(|primary| {
            let secondary = primary.strip_suffix(suffix)?;
            if !climate.contains(&secondary) {
                return None;
            }
            if configured.contains(composite_key(primary, &secondary).as_str()) {
                return None;
            }
            Some(DiscoveredPair {
                room: room_name(&secondary),
                primary: (*primary).clone(),
                secondary,
            })
        })
        .collect();

    tracing::debug!(count = pairs.len(), suffix, "Discovered thermostat pairs");
    pairs
}

/// Derives a display name from an entity's object id.
///
/// `climate.living_room` becomes `"Living Room"`.
#[must_use]
pub fn room_name(entity: &EntityRef) -> String {
    entity
        .object_id()
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
