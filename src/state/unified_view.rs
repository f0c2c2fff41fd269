// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconciled view of a thermostat pair.

use serde::{Deserialize, Serialize};

use super::source_snapshot::{DEFAULT_MAX_TEMP, DEFAULT_MIN_TEMP};
use crate::features::ClimateFeatures;

/// The single thermostat presented to consumers.
///
/// Produced only by [`reconcile`](crate::engine::reconcile) and always
/// replaced as a whole.
///
/// # Examples
///
/// ```
/// use climate_unify::state::UnifiedView;
///
/// let view = UnifiedView::default();
/// assert!(!view.available);
/// assert_eq!((view.min_temp, view.max_temp), (7.0, 35.0));
/// assert!(!view.supported_features.fan_mode);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedView {
    /// `true` while at least one source is available.
    pub available: bool,
    /// Current HVAC mode.
    pub mode: Option<String>,
    /// Measured temperature.
    pub current_temperature: Option<f64>,
    /// Target temperature.
    pub target_temperature: Option<f64>,
    /// Lowest settable temperature.
    pub min_temp: f64,
    /// Highest settable temperature.
    pub max_temp: f64,
    /// Accepted HVAC modes.
    pub supported_modes: Vec<String>,
    /// Current fan mode.
    pub fan_mode: Option<String>,
    /// Accepted fan modes.
    pub supported_fan_modes: Vec<String>,
    /// Measured relative humidity.
    pub humidity: Option<f64>,
    /// Features currently advertised.
    pub supported_features: ClimateFeatures,
}

impl Default for UnifiedView {
    fn default() -> Self {
        Self {
            available: false,
            mode: None,
            current_temperature: None,
            target_temperature: None,
            min_temp: DEFAULT_MIN_TEMP,
            max_temp: DEFAULT_MAX_TEMP,
            supported_modes: Vec::new(),
            fan_mode: None,
            supported_fan_modes: Vec::new(),
            humidity: None,
            supported_features: ClimateFeatures::base(),
        }
    }
}

impl UnifiedView {
    /// Returns `true` if the view advertises fan control.
    #[must_use]
    pub fn supports_fan_mode(&self) -> bool {
        self.supported_features.fan_mode
    }
}
