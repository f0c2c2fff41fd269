// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting events.

use tokio::sync::broadcast;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Event bus for broadcasting events to multiple subscribers.
///
/// The same bus type carries store notifications
/// ([`StateChangedEvent`](super::StateChangedEvent)) and pair lifecycle
/// events ([`ThermostatEvent`](super::ThermostatEvent)). Each subscriber gets
/// its own copy of each event.
///
/// # Capacity
///
/// The event bus has a fixed capacity (default 256). If the channel fills
/// up because a subscriber is slow, older events are dropped for that
/// subscriber and it receives `RecvError::Lagged`.
///
/// # Examples
///
/// ```
/// use climate_unify::event::{EventBus, StateChangedEvent};
/// use climate_unify::types::EntityRef;
///
/// let bus: EventBus<StateChangedEvent> = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// let entity = EntityRef::new("climate.hall").unwrap();
/// bus.publish(StateChangedEvent::removed(entity));
/// assert!(rx.try_recv().is_ok());
/// ```
#[derive(Debug)]
pub struct EventBus<E> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone> EventBus<E> {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus with the specified capacity.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events that can be buffered
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event to all subscribers.
    ///
    /// If there are no subscribers, the event is silently discarded.
    pub fn publish(&self, event: E) {
        // No subscribers is not an error
        let _ = self.sender.send(event);
    }
}

impl<E: Clone> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
