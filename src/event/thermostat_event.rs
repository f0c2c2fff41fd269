// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat lifecycle events.

use crate::state::UnifiedView;
use crate::types::EntryId;

/// Events emitted by the thermostat manager.
///
/// # Examples
///
/// ```
/// use climate_unify::event::ThermostatEvent;
/// use climate_unify::types::EntryId;
///
/// let entry_id = EntryId::new();
/// let event = ThermostatEvent::pair_removed(entry_id);
/// assert!(event.is_lifecycle());
/// assert_eq!(event.entry_id(), entry_id);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ThermostatEvent {
    /// A pair was added to the manager.
    PairAdded {
        /// The entry of the new unified thermostat.
        entry_id: EntryId,
        /// The composite key of the pair.
        unique_id: String,
    },

    /// A pair was removed from the manager.
    PairRemoved {
        /// The entry of the removed unified thermostat.
        entry_id: EntryId,
    },

    /// A unified thermostat was reconciled.
    ViewUpdated {
        /// The entry of the unified thermostat.
        entry_id: EntryId,
        /// The new unified view.
        view: UnifiedView,
    },
}

impl ThermostatEvent {
    /// Returns the entry ID associated with this event.
    #[must_use]
    pub fn entry_id(&self) -> EntryId {
        match self {
            Self::PairAdded { entry_id, .. }
            | Self::PairRemoved { entry_id }
            | Self::ViewUpdated { entry_id, .. } => *entry_id,
        }
    }

    /// Returns `true` if this is a lifecycle event (added/removed).
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::PairAdded { .. } | Self::PairRemoved { .. })
    }

    /// Returns `true` if this is a view update.
    #[must_use]
    pub fn is_view_update(&self) -> bool {
        matches!(self, Self::ViewUpdated { .. })
    }

    /// Creates a pair added event.
    #[must_use]
    pub fn pair_added(entry_id: EntryId, unique_id: impl Into<String>) -> Self {
        Self::PairAdded {
            entry_id,
            unique_id: unique_id.into(),
        }
    }

    /// Creates a pair removed event.
    #[must_use]
    pub fn pair_removed(entry_id: EntryId) -> Self {
        Self::PairRemoved { entry_id }
    }

    /// Creates a view updated event.
    #[must_use]
    pub fn view_updated(entry_id: EntryId, view: UnifiedView) -> Self {
        Self::ViewUpdated { entry_id, view }
    }
}
