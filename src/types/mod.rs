// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the crate.
//!
//! # Types
//!
//! - [`EntityRef`] - `domain.object_id` identifier of a source entity
//! - [`EntryId`] - Unique id of a configured pair
//! - [`SourceRole`] - Primary (local) or secondary (cloud) source
//! - [`SourceLabels`] - Display names of the two sources
//! - [`Capability`] - A routable class of command
//! - [`FailoverAssignment`] - Ordered source preference for a capability
//! - [`TemperatureUnit`] - Unit of reported and accepted temperatures

mod capability;
mod entity_ref;
mod entry_id;
mod source;
mod temperature_unit;

pub use capability::{Capability, FailoverAssignment};
pub use entity_ref::EntityRef;
pub use entry_id::EntryId;
pub use source::{SourceLabels, SourceRole};
pub use temperature_unit::TemperatureUnit;
