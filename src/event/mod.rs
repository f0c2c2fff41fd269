// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system.
//!
//! Two kinds of events travel over an [`EventBus`]:
//!
//! - [`StateChangedEvent`] - one per mutation of an entity in the state store.
//!   Thermostats listen to these to know when to reconcile.
//! - [`ThermostatEvent`] - pair lifecycle and view updates published by the
//!   [`ThermostatManager`](crate::manager::ThermostatManager).

mod event_bus;
mod state_changed;
mod thermostat_event;

pub use event_bus::EventBus;
pub use state_changed::StateChangedEvent;
pub use thermostat_event::ThermostatEvent;
