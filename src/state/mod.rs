// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State types, from raw store records to the reconciled view.
//!
//! - [`EntityState`] is what the host's state store holds for one entity.
//! - [`SourceSnapshot`] is a typed, defaulted read of one source.
//! - [`UnifiedView`] is the reconciled output of two snapshots.
//!
//! # Examples
//!
//! ```
//! use climate_unify::engine::reconcile;
//! use climate_unify::state::{EntityState, SourceSnapshot};
//!
//! let primary = EntityState::new("heat").with_attribute("current_temperature", 20.5);
//! let secondary = EntityState::unavailable();
//!
//! let view = reconcile(
//!     &SourceSnapshot::from_state(Some(&primary)),
//!     &SourceSnapshot::from_state(Some(&secondary)),
//! );
//! assert!(view.available);
//! assert_eq!(view.current_temperature, Some(20.5));
//! assert_eq!(view.mode.as_deref(), Some("heat"));
//! ```

mod entity_state;
mod source_snapshot;
mod unified_view;

pub use entity_state::{EntityState, STATE_UNAVAILABLE, STATE_UNKNOWN};
pub use source_snapshot::{DEFAULT_MAX_TEMP, DEFAULT_MIN_TEMP, SourceSnapshot};
pub use unified_view::UnifiedView;
