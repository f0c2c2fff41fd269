// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pair validation against the state store.

use super::PairConfig;
use crate::error::ConfigError;
use crate::store::StateStore;
use crate::types::EntityRef;

/// Checks that a pair can be set up.
///
/// The two entities must differ, both must exist in the store, both must be
/// climate entities, and neither may currently be unavailable. The primary
/// entity is checked before the secondary.
///
/// # Errors
///
/// Returns the first [`ConfigError`] found.
pub fn validate_pair<S>(store: &S, config: &PairConfig) -> Result<(), ConfigError>
where
    S: StateStore + ?Sized,
{
    if config.primary == config.secondary {
        return Err(ConfigError::SameEntity(config.primary.clone()));
    }

    validate_entity(store, &config.primary)?;
    validate_entity(store, &config.secondary)
}

fn validate_entity<S>(store: &S, entity: &EntityRef) -> Result<(), ConfigError>
where
    S: StateStore + ?Sized,
{
    let state = store
        .get(entity)
        .ok_or_else(|| ConfigError::InvalidEntity(entity.clone()))?;

    if !entity.is_climate() {
        return Err(ConfigError::NotClimate(entity.clone()));
    }

    if !state.is_available() {
        return Err(ConfigError::EntityUnavailable(entity.clone()));
    }

    Ok(())
}
