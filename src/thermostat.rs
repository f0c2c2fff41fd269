// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The unified thermostat handle.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::command::{ClimateCommand, CommandOutcome};
use crate::diagnostics::{
    DeviceInfo, DiagnosticReading, INDICATORS, indicator_unique_id, thermostat_unique_id,
};
use crate::engine::{Route, reconcile, route_command};
use crate::error::{Error, Result};
use crate::event::StateChangedEvent;
use crate::pairing::PairConfig;
use crate::state::{SourceSnapshot, UnifiedView};
use crate::store::{CommandInvoker, StateStore};
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::types::{Capability, EntityRef, EntryId, SourceRole, TemperatureUnit};

/// One virtual thermostat backed by a primary and a secondary source.
///
/// The handle keeps the last reconciled [`UnifiedView`] and rebuilds it
/// wholesale whenever one of its sources changes. Commands are routed from
/// fresh store reads at dispatch time, never from the cached view.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use climate_unify::command::ClimateCommand;
/// use climate_unify::error::InvokeError;
/// use climate_unify::pairing::PairConfig;
/// use climate_unify::state::EntityState;
/// use climate_unify::store::{CommandInvoker, MemoryStateStore};
/// use climate_unify::types::{Capability, EntityRef};
/// use climate_unify::UnifiedThermostat;
///
/// struct NoopInvoker;
///
/// impl CommandInvoker for NoopInvoker {
///     async fn invoke(&self, _: &EntityRef, _: &ClimateCommand) -> Result<(), InvokeError> {
///         Ok(())
///     }
/// }
///
/// let primary = EntityRef::new("climate.den_matter").unwrap();
/// let secondary = EntityRef::new("climate.den").unwrap();
///
/// let store = Arc::new(MemoryStateStore::new());
/// store.set(
///     primary.clone(),
///     EntityState::new("heat").with_attribute("current_temperature", 19.5),
/// );
/// store.set_unavailable(secondary.clone());
///
/// let thermostat = UnifiedThermostat::new(
///     PairConfig::new(primary, secondary),
///     store,
///     Arc::new(NoopInvoker),
/// );
///
/// let view = thermostat.view();
/// assert!(view.available);
/// assert_eq!(view.current_temperature, Some(19.5));
/// assert!(!view.supported_features.fan_mode);
/// assert_eq!(thermostat.active_source(Capability::Mode), "matter (fallback)");
/// ```
pub struct UnifiedThermostat<S, I> {
    entry_id: EntryId,
    config: PairConfig,
    store: Arc<S>,
    invoker: Arc<I>,
    /// Last reconciled view; held across read, reconcile and store.
    view: Mutex<UnifiedView>,
    callbacks: CallbackRegistry,
}

impl<S, I> UnifiedThermostat<S, I>
where
    S: StateStore,
    I: CommandInvoker,
{
    /// Creates a thermostat with a fresh entry id and reconciles it once.
    #[must_use]
    pub fn new(config: PairConfig, store: Arc<S>, invoker: Arc<I>) -> Self {
        Self::with_entry_id(EntryId::new(), config, store, invoker)
    }

    /// Creates a thermostat under an existing entry id and reconciles it
    /// once.
    #[must_use]
    pub fn with_entry_id(
        entry_id: EntryId,
        config: PairConfig,
        store: Arc<S>,
        invoker: Arc<I>,
    ) -> Self {
        let thermostat = Self {
            entry_id,
            config,
            store,
            invoker,
            view: Mutex::new(UnifiedView::default()),
            callbacks: CallbackRegistry::new(),
        };

        let view = thermostat.refresh();
        tracing::info!(
            entry = %entry_id,
            name = %thermostat.config.name,
            primary = %thermostat.config.primary,
            secondary = %thermostat.config.secondary,
            available = view.available,
            "Unified thermostat attached"
        );
        thermostat
    }

    // ========== Identity ==========

    /// Returns the entry id.
    #[must_use]
    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Returns the pair configuration.
    #[must_use]
    pub fn config(&self) -> &PairConfig {
        &self.config
    }

    /// Returns the stable unique id of this thermostat.
    #[must_use]
    pub fn unique_id(&self) -> String {
        thermostat_unique_id(self.entry_id)
    }

    /// Returns the unit of every temperature in the view and in commands.
    #[must_use]
    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.config.temperature_unit
    }

    /// Returns the device registry entry of this thermostat.
    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo::new(self.entry_id, &self.config.name)
    }

    /// Returns `true` if `entity` is one of this thermostat's sources.
    #[must_use]
    pub fn watches(&self, entity: &EntityRef) -> bool {
        self.config.watches(entity)
    }

    // ========== State ==========

    /// Returns the last reconciled view.
    #[must_use]
    pub fn view(&self) -> UnifiedView {
        self.view.lock().clone()
    }

    /// Reads one source fresh from the store.
    #[must_use]
    pub fn snapshot(&self, role: SourceRole) -> SourceSnapshot {
        SourceSnapshot::from_state(self.store.get(self.config.entity(role)).as_ref())
    }

    /// Returns `true` if the store currently reports the source available.
    ///
    /// An entity the store has never seen counts as unavailable.
    #[must_use]
    pub fn source_available(&self, role: SourceRole) -> bool {
        self.store
            .get(self.config.entity(role))
            .is_some_and(|state| state.is_available())
    }

    /// Re-reads both sources, reconciles, stores the new view and notifies
    /// subscribers.
    ///
    /// Concurrent refreshes of the same thermostat are serialized. Callbacks
    /// run after the lock is released.
    pub fn refresh(&self) -> UnifiedView {
        let (view, previous_available) = {
            let mut current = self.view.lock();
            let primary = self.snapshot(SourceRole::Primary);
            let secondary = self.snapshot(SourceRole::Secondary);
            let view = reconcile(&primary, &secondary);
            let previous = std::mem::replace(&mut *current, view.clone());
            (view, previous.available)
        };

        tracing::debug!(
            entry = %self.entry_id,
            available = view.available,
            mode = ?view.mode,
            current_temperature = ?view.current_temperature,
            fan_control = view.supported_features.fan_mode,
            "Reconciled unified view"
        );

        if view.available != previous_available {
            tracing::info!(
                entry = %self.entry_id,
                available = view.available,
                "Unified thermostat availability changed"
            );
        }

        self.callbacks.dispatch(&view, previous_available);
        view
    }

    /// Reacts to a change of `entity` in the store.
    ///
    /// Returns the new view, or `None` if the entity is not one of this
    /// thermostat's sources.
    pub fn handle_state_change(&self, entity: &EntityRef) -> Option<UnifiedView> {
        if !self.watches(entity) {
            return None;
        }
        tracing::trace!(entry = %self.entry_id, %entity, "Source changed");
        Some(self.refresh())
    }

    /// Consumes a change stream until it closes.
    ///
    /// A lagged stream triggers one full reconciliation, which covers every
    /// skipped notification.
    pub async fn run(&self, mut changes: broadcast::Receiver<StateChangedEvent>) {
        loop {
            match changes.recv().await {
                Ok(event) => {
                    self.handle_state_change(&event.entity);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        entry = %self.entry_id,
                        skipped,
                        "State change stream lagged, reconciling"
                    );
                    self.refresh();
                }
                Err(RecvError::Closed) => {
                    tracing::debug!(entry = %self.entry_id, "State change stream closed");
                    break;
                }
            }
        }
    }

    // ========== Commands ==========

    /// Returns where a command for `capability` would go right now.
    #[must_use]
    pub fn route(&self, capability: Capability) -> Route {
        route_command(
            capability,
            self.source_available(SourceRole::Primary),
            self.source_available(SourceRole::Secondary),
        )
    }

    /// Routes `command` to a source and invokes it.
    ///
    /// A set-temperature without a temperature is ignored and reported as
    /// [`CommandOutcome::Ignored`]. Failures are returned once and never
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`] if no source can serve the
    /// command, or [`Error::CommandFailed`] if the chosen source fails it.
    pub async fn execute(&self, command: &ClimateCommand) -> Result<CommandOutcome> {
        if !command.is_actionable() {
            tracing::debug!(entry = %self.entry_id, %command, "Ignoring incomplete command");
            return Ok(CommandOutcome::Ignored);
        }

        let capability = command.capability();
        let route = self.route(capability);
        let Some(role) = route.target() else {
            tracing::debug!(entry = %self.entry_id, %capability, "No source for command");
            return Err(Error::SourceUnavailable { capability });
        };

        let entity = self.config.entity(role);
        tracing::debug!(
            entry = %self.entry_id,
            %command,
            %entity,
            source = %role,
            fallback = route.is_fallback(),
            "Dispatching command"
        );

        match self.invoker.invoke(entity, command).await {
            Ok(()) => Ok(CommandOutcome::Dispatched {
                entity: entity.clone(),
                route,
            }),
            Err(source) => {
                tracing::warn!(
                    entry = %self.entry_id,
                    %command,
                    %entity,
                    error = %source,
                    "Command failed"
                );
                Err(Error::CommandFailed {
                    entity: entity.clone(),
                    source,
                })
            }
        }
    }

    /// Sets the target temperature.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_temperature(&self, temperature: f64) -> Result<CommandOutcome> {
        self.execute(&ClimateCommand::set_temperature(temperature)).await
    }

    /// Sets the HVAC mode.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_hvac_mode(&self, mode: &str) -> Result<CommandOutcome> {
        self.execute(&ClimateCommand::set_hvac_mode(mode)).await
    }

    /// Sets the fan mode.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_fan_mode(&self, mode: &str) -> Result<CommandOutcome> {
        self.execute(&ClimateCommand::set_fan_mode(mode)).await
    }

    /// Turns the thermostat on.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn turn_on(&self) -> Result<CommandOutcome> {
        self.execute(&ClimateCommand::TurnOn).await
    }

    /// Turns the thermostat off.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn turn_off(&self) -> Result<CommandOutcome> {
        self.execute(&ClimateCommand::TurnOff).await
    }

    // ========== Diagnostics ==========

    /// Describes the source currently serving `capability`.
    ///
    /// Yields a source label, `"<label> (fallback)"`, or `"unavailable"`.
    #[must_use]
    pub fn active_source(&self, capability: Capability) -> String {
        self.route(capability).describe(&self.config.labels)
    }

    /// Reads every diagnostic indicator.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<DiagnosticReading> {
        INDICATORS
            .iter()
            .map(|indicator| DiagnosticReading {
                key: indicator.key,
                name: indicator.name,
                unique_id: indicator_unique_id(self.entry_id, indicator.key),
                value: self.active_source(indicator.capability),
            })
            .collect()
    }
}

impl<S, I> Subscribable for UnifiedThermostat<S, I> {
    fn on_change<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&UnifiedView) + Send + Sync + 'static,
    {
        self.callbacks.on_view_changed(callback)
    }

    fn on_availability_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.callbacks.on_availability_changed(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}

impl<S, I> fmt::Debug for UnifiedThermostat<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnifiedThermostat")
            .field("entry_id", &self.entry_id)
            .field("config", &self.config)
            .field("view", &*self.view.lock())
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
