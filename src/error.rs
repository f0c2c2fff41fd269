// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `climate_unify` library.
//!
//! Errors are split by where they arise: pairing and configuration problems
//! ([`ConfigError`]) are rejected before a unified thermostat exists, while
//! command routing and dispatch failures surface through [`Error`] when a
//! caller executes a command. Nothing here is retried internally.

use thiserror::Error;

use crate::types::{Capability, EntityRef};

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Neither the preferred nor the fallback source for a capability is
    /// reachable.
    ///
    /// Retrying the same command cannot resolve this; callers should surface
    /// it to the user.
    #[error("no source available for {capability}")]
    SourceUnavailable {
        /// The capability that could not be routed.
        capability: Capability,
    },

    /// A command request was missing or carried invalid parameters.
    #[error("invalid capability request: {0}")]
    InvalidCapabilityRequest(String),

    /// The pairing configuration conflicts with itself or an existing pair.
    #[error("configuration conflict: {0}")]
    ConfigurationConflict(#[from] ConfigError),

    /// The routed source rejected or failed the command.
    #[error("command failed on {entity}: {source}")]
    CommandFailed {
        /// The source entity the command was sent to.
        entity: EntityRef,
        /// The failure reported by the command invoker.
        #[source]
        source: InvokeError,
    },

    /// No unified thermostat is registered under the given pair id.
    #[error("pair not found: {0}")]
    PairNotFound(String),
}

/// Errors raised while validating a pair of source entities.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The same entity was chosen for both sources.
    #[error("{0} cannot be used as both primary and secondary source")]
    SameEntity(EntityRef),

    /// A pair with the same composite key is already configured.
    #[error("pair {0} is already configured")]
    AlreadyConfigured(String),

    /// The entity is not known to the state store.
    #[error("entity {0} does not exist")]
    InvalidEntity(EntityRef),

    /// The entity exists but is not a climate entity.
    #[error("entity {0} is not a climate entity")]
    NotClimate(EntityRef),

    /// The entity exists but currently reports itself unavailable.
    #[error("entity {0} is unavailable")]
    EntityUnavailable(EntityRef),

    /// An entity identifier is not of the form `domain.object_id`.
    #[error("malformed entity id: {0:?}")]
    MalformedEntityRef(String),

    /// The configuration document could not be parsed.
    #[error("failed to parse pair configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors reported by a [`CommandInvoker`](crate::store::CommandInvoker).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The backend refused the command.
    #[error("command rejected: {0}")]
    Rejected(String),

    /// The backend did not acknowledge the command in time.
    #[error("command timed out after {0} ms")]
    Timeout(u64),

    /// The transport to the backend is gone.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
