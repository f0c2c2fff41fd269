// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconciliation and failover engine.
//!
//! Two pure functions make up the engine:
//!
//! - [`reconcile`] turns two [`SourceSnapshot`](crate::state::SourceSnapshot)s
//!   into one [`UnifiedView`](crate::state::UnifiedView).
//! - [`route_command`] decides which source a command goes to.
//!
//! Neither keeps state between calls. Source availability is a two-state
//! machine driven from outside; the four combinations give three outcomes:
//!
//! | primary | secondary | view available | fan control |
//! |---------|-----------|----------------|-------------|
//! | down    | down      | no             | no          |
//! | up      | down      | yes            | no          |
//! | down/up | up        | yes            | yes         |

mod reconcile;
mod routing;

pub use reconcile::reconcile;
pub use routing::{Route, UNAVAILABLE_LABEL, route_command};
