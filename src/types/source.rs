// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Source roles and their display labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The role a source entity plays in a unified thermostat.
///
/// # Examples
///
/// ```
/// use climate_unify::types::SourceRole;
///
/// assert_eq!(SourceRole::Primary.to_string(), "primary");
/// assert_eq!(SourceRole::Secondary.as_str(), "secondary");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceRole {
    /// The local, low-latency source. Authoritative for temperature.
    Primary,
    /// The cloud source with the fuller feature set. Authoritative for mode,
    /// fan and humidity.
    Secondary,
}

impl SourceRole {
    /// Returns the role name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable names for the two sources, used by diagnostics.
///
/// The defaults name the backends of the usual pairing: a Matter thermostat
/// as primary and the Google cloud entity of the same device as secondary.
///
/// # Examples
///
/// ```
/// use climate_unify::types::{SourceLabels, SourceRole};
///
/// let labels = SourceLabels::default();
/// assert_eq!(labels.label(SourceRole::Primary), "matter");
///
/// let labels = SourceLabels::new("local", "cloud");
/// assert_eq!(labels.label(SourceRole::Secondary), "cloud");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLabels {
    /// Label of the primary source.
    pub primary: String,
    /// Label of the secondary source.
    pub secondary: String,
}

impl SourceLabels {
    /// Creates labels for both sources.
    #[must_use]
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Returns the label for a role.
    #[must_use]
    pub fn label(&self, role: SourceRole) -> &str {
        match role {
            SourceRole::Primary => &self.primary,
            SourceRole::Secondary => &self.secondary,
        }
    }
}

impl Default for SourceLabels {
    fn default() -> Self {
        Self::new("matter", "google")
    }
}
