// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Manager for coordinating multiple unified thermostats.
//!
//! # Overview
//!
//! The [`ThermostatManager`] owns every configured pair of a host. It
//! provides:
//!
//! - **Pair management**: discover, add, rename and remove pairs
//! - **Change fan-out**: one store notification stream feeds every pair
//!   watching the changed entity
//! - **Event system**: pair lifecycle and view updates on a broadcast channel
//!
//! # Event Subscription
//!
//! ```no_run
//! use climate_unify::event::ThermostatEvent;
//! use climate_unify::manager::ThermostatManager;
//! # use climate_unify::store::{CommandInvoker, StateStore};
//!
//! # fn example<S, I>(manager: ThermostatManager<S, I>)
//! # where
//! #     S: StateStore + 'static,
//! #     I: CommandInvoker + 'static,
//! # {
//! let mut events = manager.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(event) = events.recv().await {
//!         if let ThermostatEvent::ViewUpdated { entry_id, view } = event {
//!             println!("{entry_id}: {:?} at {:?}", view.mode, view.current_temperature);
//!         }
//!     }
//! });
//! # }
//! ```

mod thermostat_manager;

pub use thermostat_manager::ThermostatManager;
