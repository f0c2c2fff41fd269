// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host platform collaborators.
//!
//! A unified thermostat never talks to a thermostat directly. It reads
//! source state through a [`StateStore`] and sends commands through a
//! [`CommandInvoker`]. Hosts implement both; [`MemoryStateStore`] is a
//! ready-made store for embedding and tests.

mod memory;

pub use memory::MemoryStateStore;

use crate::command::ClimateCommand;
use crate::error::InvokeError;
use crate::state::EntityState;
use crate::types::EntityRef;

/// Read access to the host's entity states.
///
/// Reads are synchronous and must not block on I/O: reconciliation runs
/// under a lock and never suspends.
pub trait StateStore: Send + Sync {
    /// Returns the last known state of `entity`, or `None` if the store has
    /// never seen it.
    fn get(&self, entity: &EntityRef) -> Option<EntityState>;

    /// Returns every entity currently known to the store.
    fn entities(&self) -> Vec<EntityRef>;

    /// Returns `true` if the store currently has a record for `entity`.
    fn contains(&self, entity: &EntityRef) -> bool {
        self.get(entity).is_some()
    }
}

/// Sends commands to source entities.
///
/// Implementations own transport, acknowledgement and timeouts. A call
/// resolves once the backend has accepted or rejected the command.
#[allow(async_fn_in_trait)]
pub trait CommandInvoker: Send + Sync {
    /// Invokes `command` on `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError`] if the backend rejects the command, does not
    /// answer in time, or cannot be reached.
    async fn invoke(&self, entity: &EntityRef, command: &ClimateCommand)
    -> Result<(), InvokeError>;
}
