// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute reconciliation.

use crate::features::ClimateFeatures;
use crate::state::{SourceSnapshot, UnifiedView};
use crate::types::{FailoverAssignment, SourceRole};

/// Computes the unified view of a thermostat pair.
///
/// Pure and total: any two snapshots produce a view, and the same inputs
/// always produce the same view.
///
/// Attributes are taken in blocks, each block from a single source:
///
/// - **Temperature** (current, target, min, max): primary, else secondary,
///   else defaults. The four fields never mix sources.
/// - **Mode** (mode, supported modes): secondary if it is available and
///   reports a mode, else primary if available.
/// - **Fan and humidity**: secondary only.
///
/// The view is available while either source is, and fan control is
/// advertised only while the secondary source is available.
///
/// # Examples
///
/// ```
/// use climate_unify::engine::reconcile;
/// use climate_unify::state::SourceSnapshot;
///
/// let down = SourceSnapshot::unavailable();
/// let view = reconcile(&down, &down);
/// assert!(!view.available);
/// assert_eq!((view.min_temp, view.max_temp), (7.0, 35.0));
/// assert_eq!(view.mode, None);
/// ```
#[must_use]
pub fn reconcile(primary: &SourceSnapshot, secondary: &SourceSnapshot) -> UnifiedView {
    let pick = |role: SourceRole| match role {
        SourceRole::Primary => primary,
        SourceRole::Secondary => secondary,
    };

    let mut view = UnifiedView {
        available: primary.available || secondary.available,
        supported_features: ClimateFeatures::for_availability(secondary.available),
        ..UnifiedView::default()
    };

    if let Some(source) = FailoverAssignment::TEMPERATURE
        .select(primary.available, secondary.available)
        .map(pick)
    {
        view.current_temperature = source.current_temperature;
        view.target_temperature = source.target_temperature;
        view.min_temp = source.min_temp;
        view.max_temp = source.max_temp;
    }

    let mode_source = if secondary.available && secondary.mode.is_some() {
        Some(secondary)
    } else if primary.available {
        Some(primary)
    } else {
        None
    };
    if let Some(source) = mode_source {
        view.mode.clone_from(&source.mode);
        view.supported_modes.clone_from(&source.supported_modes);
    }

    if let Some(source) = FailoverAssignment::FAN
        .select(primary.available, secondary.available)
        .map(pick)
    {
        view.fan_mode.clone_from(&source.fan_mode);
        view.supported_fan_modes.clone_from(&source.supported_fan_modes);
    }

    if let Some(source) = FailoverAssignment::HUMIDITY
        .select(primary.available, secondary.available)
        .map(pick)
    {
        view.humidity = source.humidity;
    }

    view
}
