// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory state store.

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use super::StateStore;
use crate::event::{EventBus, StateChangedEvent};
use crate::state::EntityState;
use crate::types::EntityRef;

/// A [`StateStore`] backed by a map, publishing a [`StateChangedEvent`] for
/// every write.
///
/// The event is published after the write is visible, so a subscriber that
/// re-reads the store on notification always sees the new record.
///
/// # Examples
///
/// ```
/// use climate_unify::state::EntityState;
/// use climate_unify::store::{MemoryStateStore, StateStore};
/// use climate_unify::types::EntityRef;
///
/// let store = MemoryStateStore::new();
/// let mut changes = store.subscribe();
///
/// let hall = EntityRef::new("climate.hall").unwrap();
/// store.set(hall.clone(), EntityState::new("heat"));
///
/// assert_eq!(store.get(&hall).unwrap().state, "heat");
/// assert_eq!(changes.try_recv().unwrap().entity, hall);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    states: RwLock<HashMap<EntityRef, EntityState>>,
    event_bus: EventBus<StateChangedEvent>,
}

impl MemoryStateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the state of `entity` and notifies subscribers.
    pub fn set(&self, entity: EntityRef, state: EntityState) {
        self.states.write().insert(entity.clone(), state.clone());
        tracing::trace!(%entity, state = %state.state, "Entity state written");
        self.event_bus.publish(StateChangedEvent::updated(entity, state));
    }

    /// Marks `entity` unavailable, keeping nothing of its previous payload.
    pub fn set_unavailable(&self, entity: EntityRef) {
        self.set(entity, EntityState::unavailable());
    }

    /// Removes `entity` and notifies subscribers.
    ///
    /// Returns the removed state, or `None` if the entity was unknown.
    pub fn remove(&self, entity: &EntityRef) -> Option<EntityState> {
        let removed = self.states.write().remove(entity);
        if removed.is_some() {
            self.event_bus.publish(StateChangedEvent::removed(entity.clone()));
        }
        removed
    }

    /// Subscribes to change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StateChangedEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the bus the store publishes on.
    #[must_use]
    pub fn event_bus(&self) -> &EventBus<StateChangedEvent> {
        &self.event_bus
    }

    /// Returns the number of entities in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    /// Returns `true` if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, entity: &EntityRef) -> Option<EntityState> {
        self.states.read().get(entity).cloned()
    }

    fn entities(&self) -> Vec<EntityRef> {
        self.states.read().keys().cloned().collect()
    }
}
