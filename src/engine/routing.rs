// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command routing with fallback.

use std::fmt;

use crate::types::{Capability, SourceLabels, SourceRole};

/// Diagnostic value reported when no source can serve a capability.
pub const UNAVAILABLE_LABEL: &str = "unavailable";

/// Where a command for a capability should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The preferred source is available.
    Preferred(SourceRole),
    /// The preferred source is down; its fallback is available.
    Fallback(SourceRole),
    /// No source that has the capability is available.
    Unavailable,
}

impl Route {
    /// Returns the target source, if any.
    #[must_use]
    pub const fn target(&self) -> Option<SourceRole> {
        match self {
            Self::Preferred(role) | Self::Fallback(role) => Some(*role),
            Self::Unavailable => None,
        }
    }

    /// Returns `true` if the command goes to the fallback source.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Formats the route for diagnostics.
    ///
    /// Yields the source label, the label followed by ` (fallback)`, or
    /// `unavailable`.
    #[must_use]
    pub fn describe(&self, labels: &SourceLabels) -> String {
        match self {
            Self::Preferred(role) => labels.label(*role).to_string(),
            Self::Fallback(role) => format!("{} (fallback)", labels.label(*role)),
            Self::Unavailable => UNAVAILABLE_LABEL.to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preferred(role) => write!(f, "{role}"),
            Self::Fallback(role) => write!(f, "{role} (fallback)"),
            Self::Unavailable => f.write_str(UNAVAILABLE_LABEL),
        }
    }
}

/// Picks the source a command for `capability` should be sent to.
///
/// Must be called with availability read at dispatch time; availability can
/// change between the last reconciliation and the command.
///
/// # Examples
///
/// ```
/// use climate_unify::engine::{Route, route_command};
/// use climate_unify::types::{Capability, SourceRole};
///
/// assert_eq!(
///     route_command(Capability::Temperature, false, true),
///     Route::Fallback(SourceRole::Secondary),
/// );
/// assert_eq!(route_command(Capability::FanMode, true, false), Route::Unavailable);
/// ```
#[must_use]
pub fn route_command(
    capability: Capability,
    primary_available: bool,
    secondary_available: bool,
) -> Route {
    let assignment = capability.assignment();
    match assignment.select(primary_available, secondary_available) {
        Some(role) if role == assignment.preferred => Route::Preferred(role),
        Some(role) => Route::Fallback(role),
        None => Route::Unavailable,
    }
}
