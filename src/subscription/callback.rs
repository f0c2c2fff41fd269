// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for unified view subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::UnifiedView;

/// Unique identifier for a subscription.
///
/// Returned when registering a callback and used to unsubscribe later. IDs
/// are unique within a thermostat's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Type alias for view change callbacks.
type ViewCallback = Arc<dyn Fn(&UnifiedView) + Send + Sync>;

/// Type alias for availability callbacks.
type AvailabilityCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Registry for unified view callbacks.
///
/// Thread-safe through `parking_lot::RwLock`. Callbacks are cloned out of
/// the registry before they run, so a callback may subscribe or unsubscribe
/// without deadlocking.
pub struct CallbackRegistry {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    /// Called after every reconciliation.
    view_callbacks: RwLock<HashMap<SubscriptionId, ViewCallback>>,
    /// Called when the unified availability flips.
    availability_callbacks: RwLock<HashMap<SubscriptionId, AvailabilityCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            view_callbacks: RwLock::new(HashMap::new()),
            availability_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback run with the new view after every reconciliation.
    pub fn on_view_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&UnifiedView) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.view_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback run when the unified availability changes.
    pub fn on_availability_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.availability_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.view_callbacks.write().remove(&id).is_some()
            || self.availability_callbacks.write().remove(&id).is_some()
    }

    // =========================================================================
    // Dispatch methods
    // =========================================================================

    /// Dispatches a reconciled view.
    ///
    /// View callbacks always run. Availability callbacks run only when
    /// `previous_available` differs from the new view's availability.
    pub fn dispatch(&self, view: &UnifiedView, previous_available: bool) {
        let callbacks: Vec<ViewCallback> = self.view_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(view);
        }

        if view.available != previous_available {
            let callbacks: Vec<AvailabilityCallback> = self
                .availability_callbacks
                .read()
                .values()
                .cloned()
                .collect();
            for callback in callbacks {
                callback(view.available);
            }
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.view_callbacks.read().len() + self.availability_callbacks.read().len()
    }

    /// Returns `true` if no callbacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("view_callbacks", &self.view_callbacks.read().len())
            .field(
                "availability_callbacks",
                &self.availability_callbacks.read().len(),
            )
            .finish_non_exhaustive()
    }
}
