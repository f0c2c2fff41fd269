// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Store change notifications.

use crate::state::EntityState;
use crate::types::EntityRef;

/// One mutation of one entity in the state store.
///
/// Consumers only use `entity` to decide whether to react; the pushed
/// `new_state` is informational and both sources are re-read on every
/// notification.
#[derive(Debug, Clone, PartialEq)]
pub struct StateChangedEvent {
    /// The entity that changed.
    pub entity: EntityRef,
    /// The new record, or `None` if the entity was removed.
    pub new_state: Option<EntityState>,
}

impl StateChangedEvent {
    /// Creates an event for an updated entity.
    #[must_use]
    pub fn updated(entity: EntityRef, new_state: EntityState) -> Self {
        Self {
            entity,
            new_state: Some(new_state),
        }
    }

    /// Creates an event for a removed entity.
    #[must_use]
    pub fn removed(entity: EntityRef) -> Self {
        Self {
            entity,
            new_state: None,
        }
    }

    /// Returns `true` if the entity was removed from the store.
    #[must_use]
    pub fn is_removal(&self) -> bool {
        self.new_state.is_none()
    }
}
