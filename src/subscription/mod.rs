// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback subscriptions for unified view changes.
//!
//! # Overview
//!
//! - [`SubscriptionId`] - A unique identifier for a subscription, used to unsubscribe
//! - [`CallbackRegistry`] - Registry that stores callbacks and dispatches views
//! - [`Subscribable`] - Trait for types that support view subscriptions
//!
//! Callbacks run synchronously on the task that triggered the
//! reconciliation, after the new view has been stored. A callback that
//! reads the thermostat's view therefore sees the value it was called with
//! or a newer one.

mod callback;
mod subscribable;

pub use callback::{CallbackRegistry, SubscriptionId};
pub use subscribable::Subscribable;
