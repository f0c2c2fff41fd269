// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pair setup: configuration, discovery and validation.
//!
//! A pair is created from a [`PairConfig`], either written by hand or
//! produced by [`discover_pairs`], and checked with [`validate_pair`] before
//! a unified thermostat is built from it.
//!
//! # Examples
//!
//! ```
//! use climate_unify::pairing::{DiscoveryOptions, discover_pairs, validate_pair};
//! use climate_unify::state::EntityState;
//! use climate_unify::store::{MemoryStateStore, StateStore};
//! use climate_unify::types::EntityRef;
//!
//! let store = MemoryStateStore::new();
//! store.set(EntityRef::new("climate.den_matter").unwrap(), EntityState::new("heat"));
//! store.set(EntityRef::new("climate.den").unwrap(), EntityState::new("heat"));
//!
//! let pairs = discover_pairs(&store.entities(), &[], &DiscoveryOptions::default());
//! let config = pairs.into_iter().next().unwrap().into_config();
//!
//! assert_eq!(config.name, "Den Unified");
//! assert!(validate_pair(&store, &config).is_ok());
//! ```

mod discovery;
mod pair_config;
mod validation;

pub use discovery::{
    DEFAULT_PRIMARY_SUFFIX, DiscoveredPair, DiscoveryOptions, discover_pairs, room_name,
};
pub use pair_config::{DEFAULT_PAIR_NAME, PairConfig, composite_key};
pub use validation::validate_pair;
