// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `climate_unify` - Combine two thermostat integrations into one.
//!
//! Many thermostats are reachable twice: through a fast local protocol
//! (Matter) that is good at temperature, and through a cloud integration
//! that knows every mode and fan setting. This library presents the pair as
//! a single climate device and fails over attribute by attribute when one
//! side goes down.
//!
//! # Failover
//!
//! | Capability | Preferred | Fallback |
//! |------------|-----------|----------|
//! | Temperature | primary | secondary |
//! | HVAC mode, on/off | secondary | primary |
//! | Fan mode, humidity | secondary | none |
//!
//! The unified thermostat is available while either source is, and it
//! advertises fan control only while the secondary source is available.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use climate_unify::pairing::PairConfig;
//! use climate_unify::store::{CommandInvoker, MemoryStateStore};
//! use climate_unify::subscription::Subscribable;
//! use climate_unify::types::EntityRef;
//! use climate_unify::UnifiedThermostat;
//!
//! # async fn example<I: CommandInvoker>(invoker: I) -> climate_unify::Result<()> {
//! let store = Arc::new(MemoryStateStore::new());
//! let config = PairConfig::new(
//!     EntityRef::new("climate.living_room_matter")?,
//!     EntityRef::new("climate.living_room")?,
//! )
//! .with_name("Living Room Unified");
//!
//! let changes = store.subscribe();
//! let thermostat = UnifiedThermostat::new(config, store, Arc::new(invoker));
//!
//! thermostat.on_change(|view| {
//!     println!("{:?} at {:?}", view.mode, view.current_temperature);
//! });
//!
//! // Goes to the Matter entity, or to the cloud entity while Matter is down
//! thermostat.set_temperature(21.0).await?;
//!
//! // Keep the view current
//! thermostat.run(changes).await;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod event;
mod features;
pub mod manager;
pub mod pairing;
pub mod state;
pub mod store;
pub mod subscription;
mod thermostat;
pub mod types;

pub use command::{ClimateCommand, CommandOutcome};
pub use engine::{Route, reconcile, route_command};
pub use error::{ConfigError, Error, InvokeError, Result};
pub use features::ClimateFeatures;
pub use manager::ThermostatManager;
pub use pairing::PairConfig;
pub use state::{EntityState, SourceSnapshot, UnifiedView};
pub use store::{CommandInvoker, MemoryStateStore, StateStore};
pub use subscription::{Subscribable, SubscriptionId};
pub use thermostat::UnifiedThermostat;
pub use types::{Capability, EntityRef, EntryId, SourceRole, TemperatureUnit};
