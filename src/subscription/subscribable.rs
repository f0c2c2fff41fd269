// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for types that push unified view changes.

use crate::state::UnifiedView;
use crate::subscription::SubscriptionId;

/// Trait for types that notify subscribers after every reconciliation.
///
/// # Examples
///
/// ```no_run
/// use climate_unify::subscription::Subscribable;
///
/// fn watch(thermostat: &impl Subscribable) {
///     let sub_id = thermostat.on_change(|view| {
///         println!("now {:?} at {:?}", view.mode, view.current_temperature);
///     });
///
///     // Unsubscribe when no longer needed
///     thermostat.unsubscribe(sub_id);
/// }
/// ```
pub trait Subscribable {
    /// Subscribes to unified view changes.
    ///
    /// The callback receives the new view after every reconciliation, even
    /// when nothing in it changed.
    fn on_change<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&UnifiedView) + Send + Sync + 'static;

    /// Subscribes to availability changes.
    ///
    /// The callback is called when the unified thermostat goes from
    /// available to unavailable or back.
    fn on_availability_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
