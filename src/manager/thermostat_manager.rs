// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Manager for coordinating multiple unified thermostats.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::command::{ClimateCommand, CommandOutcome};
use crate::error::{ConfigError, Error, Result};
use crate::event::{EventBus, StateChangedEvent, ThermostatEvent};
use crate::pairing::{DiscoveredPair, DiscoveryOptions, PairConfig, discover_pairs, validate_pair};
use crate::state::UnifiedView;
use crate::store::{CommandInvoker, StateStore};
use crate::subscription::Subscribable;
use crate::thermostat::UnifiedThermostat;
use crate::types::{EntityRef, EntryId};

type Thermostats<S, I> = HashMap<EntryId, Arc<UnifiedThermostat<S, I>>>;

/// Manager for many unified thermostats sharing one store and invoker.
///
/// Every reconciliation of a managed thermostat is published as
/// [`ThermostatEvent::ViewUpdated`], next to the `PairAdded` and
/// `PairRemoved` lifecycle events.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use climate_unify::manager::ThermostatManager;
/// use climate_unify::pairing::DiscoveryOptions;
/// use climate_unify::store::{CommandInvoker, MemoryStateStore};
///
/// # async fn example<I: CommandInvoker + 'static>(invoker: I) -> climate_unify::Result<()> {
/// let store = Arc::new(MemoryStateStore::new());
/// let manager = ThermostatManager::new(Arc::clone(&store), Arc::new(invoker));
///
/// // Feed store notifications to every thermostat
/// let changes = store.subscribe();
/// let runner = manager.clone();
/// tokio::spawn(async move { runner.run(changes).await });
///
/// for pair in manager.discover(&DiscoveryOptions::default()).await {
///     manager.add_pair(pair.into_config()).await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct ThermostatManager<S, I> {
    store: Arc<S>,
    invoker: Arc<I>,
    /// Managed thermostats, keyed by entry id.
    thermostats: Arc<RwLock<Thermostats<S, I>>>,
    /// Event bus for pair lifecycle and view updates.
    event_bus: EventBus<ThermostatEvent>,
}

impl<S, I> ThermostatManager<S, I>
where
    S: StateStore + 'static,
    I: CommandInvoker + 'static,
{
    /// Creates an empty manager.
    #[must_use]
    pub fn new(store: Arc<S>, invoker: Arc<I>) -> Self {
        Self::with_capacity(store, invoker, 256)
    }

    /// Creates an empty manager with a custom event bus capacity.
    #[must_use]
    pub fn with_capacity(store: Arc<S>, invoker: Arc<I>, event_capacity: usize) -> Self {
        Self {
            store,
            invoker,
            thermostats: Arc::new(RwLock::new(HashMap::new())),
            event_bus: EventBus::with_capacity(event_capacity),
        }
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribes to thermostat events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ThermostatEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    // =========================================================================
    // Pair Management
    // =========================================================================

    /// Proposes pairs found in the store that are not configured yet.
    pub async fn discover(&self, options: &DiscoveryOptions) -> Vec<DiscoveredPair> {
        let configured = self.configured_ids().await;
        discover_pairs(&self.store.entities(), &configured, options)
    }

    /// Validates `config` and starts a unified thermostat for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationConflict`] if validation fails or a
    /// pair with the same composite key is already managed.
    pub async fn add_pair(&self, config: PairConfig) -> Result<EntryId> {
        validate_pair(self.store.as_ref(), &config)?;

        let unique_id = config.unique_id();
        let mut thermostats = self.thermostats.write().await;
        if thermostats.values().any(|t| t.config().unique_id() == unique_id) {
            return Err(ConfigError::AlreadyConfigured(unique_id).into());
        }

        let entry_id = EntryId::new();
        thermostats.insert(entry_id, self.build(entry_id, config));
        drop(thermostats);

        tracing::info!(entry = %entry_id, pair = %unique_id, "Pair added");
        self.event_bus.publish(ThermostatEvent::pair_added(entry_id, unique_id));
        Ok(entry_id)
    }

    /// Stops and removes a thermostat.
    ///
    /// Returns `true` if the thermostat was found and removed.
    pub async fn remove_pair(&self, entry_id: EntryId) -> bool {
        let removed = self.thermostats.write().await.remove(&entry_id).is_some();

        if removed {
            tracing::info!(entry = %entry_id, "Pair removed");
            self.event_bus.publish(ThermostatEvent::pair_removed(entry_id));
        }

        removed
    }

    /// Renames a thermostat.
    ///
    /// The thermostat is rebuilt under the same entry id with the new name
    /// and reconciled afresh. Callbacks registered on the old handle are
    /// dropped with it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PairNotFound`] if no thermostat has this entry id.
    pub async fn rename_pair(&self, entry_id: EntryId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        let mut thermostats = self.thermostats.write().await;
        let config = thermostats
            .get(&entry_id)
            .ok_or_else(|| Error::PairNotFound(entry_id.to_string()))?
            .config()
            .clone()
            .with_name(name.clone());

        thermostats.insert(entry_id, self.build(entry_id, config));
        tracing::info!(entry = %entry_id, %name, "Pair renamed");
        Ok(())
    }

    /// Returns the thermostat for an entry id.
    pub async fn get(&self, entry_id: EntryId) -> Option<Arc<UnifiedThermostat<S, I>>> {
        self.thermostats.read().await.get(&entry_id).cloned()
    }

    /// Returns the last reconciled view of a thermostat.
    pub async fn view(&self, entry_id: EntryId) -> Option<UnifiedView> {
        self.get(entry_id).await.map(|t| t.view())
    }

    /// Returns all entry ids.
    pub async fn entry_ids(&self) -> Vec<EntryId> {
        self.thermostats.read().await.keys().copied().collect()
    }

    /// Returns the composite keys of all managed pairs.
    pub async fn configured_ids(&self) -> Vec<String> {
        self.thermostats
            .read()
            .await
            .values()
            .map(|t| t.config().unique_id())
            .collect()
    }

    /// Returns the number of managed thermostats.
    pub async fn pair_count(&self) -> usize {
        self.thermostats.read().await.len()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Executes a command on one thermostat.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PairNotFound`] for an unknown entry id, otherwise
    /// whatever [`UnifiedThermostat::execute`] returns.
    pub async fn execute(
        &self,
        entry_id: EntryId,
        command: &ClimateCommand,
    ) -> Result<CommandOutcome> {
        let thermostat = self
            .get(entry_id)
            .await
            .ok_or_else(|| Error::PairNotFound(entry_id.to_string()))?;
        thermostat.execute(command).await
    }

    // =========================================================================
    // State Changes
    // =========================================================================

    /// Reconciles every thermostat watching `entity`.
    ///
    /// Returns the number of thermostats reconciled.
    pub async fn handle_state_change(&self, entity: &EntityRef) -> usize {
        let watching: Vec<_> = self
            .thermostats
            .read()
            .await
            .values()
            .filter(|t| t.watches(entity))
            .cloned()
            .collect();

        for thermostat in &watching {
            thermostat.refresh();
        }
        watching.len()
    }

    /// Reconciles every thermostat.
    pub async fn refresh_all(&self) {
        let all: Vec<_> = self.thermostats.read().await.values().cloned().collect();
        for thermostat in all {
            thermostat.refresh();
        }
    }

    /// Consumes a change stream until it closes.
    ///
    /// A lagged stream triggers a reconciliation of every thermostat.
    pub async fn run(&self, mut changes: broadcast::Receiver<StateChangedEvent>) {
        tracing::debug!("Starting state change handler");
        loop {
            match changes.recv().await {
                Ok(event) => {
                    self.handle_state_change(&event.entity).await;
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "State change stream lagged, reconciling all pairs");
                    self.refresh_all().await;
                }
                Err(RecvError::Closed) => {
                    tracing::debug!("State change stream closed");
                    break;
                }
            }
        }
    }

    fn build(&self, entry_id: EntryId, config: PairConfig) -> Arc<UnifiedThermostat<S, I>> {
        let thermostat = UnifiedThermostat::with_entry_id(
            entry_id,
            config,
            Arc::clone(&self.store),
            Arc::clone(&self.invoker),
        );

        let event_bus = self.event_bus.clone();
        thermostat.on_change(move |view| {
            event_bus.publish(ThermostatEvent::view_updated(entry_id, view.clone()));
        });

        Arc::new(thermostat)
    }
}

impl<S, I> Clone for ThermostatManager<S, I> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            invoker: Arc::clone(&self.invoker),
            thermostats: Arc::clone(&self.thermostats),
            event_bus: self.event_bus.clone(),
        }
    }
}

impl<S, I> fmt::Debug for ThermostatManager<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThermostatManager")
            .field("event_bus", &self.event_bus)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvokeError;
    use crate::state::EntityState;
    use crate::store::MemoryStateStore;

    struct AcceptAll;

    impl CommandInvoker for AcceptAll {
        async fn invoke(
            &self,
            _entity: &EntityRef,
            _command: &ClimateCommand,
        ) -> std::result::Result<(), InvokeError> {
            Ok(())
        }
    }

    fn entity(id: &str) -> EntityRef {
        EntityRef::new(id).unwrap()
    }

    fn setup() -> (Arc<MemoryStateStore>, ThermostatManager<MemoryStateStore, AcceptAll>) {
        let store = Arc::new(MemoryStateStore::new());
        for id in ["climate.den_matter", "climate.den", "climate.loft_matter", "climate.loft"] {
            store.set(entity(id), EntityState::new("heat"));
        }
        let manager = ThermostatManager::new(Arc::clone(&store), Arc::new(AcceptAll));
        (store, manager)
    }

    fn den() -> PairConfig {
        PairConfig::new(entity("climate.den_matter"), entity("climate.den"))
    }

    #[tokio::test]
    async fn new_manager_is_empty() {
        let (_, manager) = setup();
        assert_eq!(manager.pair_count().await, 0);
        assert_eq!(manager.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn add_pair_publishes_event() {
        let (_, manager) = setup();
        let mut events = manager.subscribe();

        let entry_id = manager.add_pair(den()).await.unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(
            event,
            ThermostatEvent::pair_added(entry_id, "climate.den_matter_climate.den")
        );
        assert_eq!(manager.pair_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_pair_is_rejected() {
        let (_, manager) = setup();
        manager.add_pair(den()).await.unwrap();

        let err = manager.add_pair(den().with_name("Again")).await.unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigurationConflict(ConfigError::AlreadyConfigured(_))
        ));
        assert_eq!(manager.pair_count().await, 1);
    }

    #[tokio::test]
    async fn invalid_pair_is_rejected() {
        let (_, manager) = setup();
        let config = PairConfig::new(entity("climate.den"), entity("climate.den"));
        assert!(manager.add_pair(config).await.is_err());
        assert_eq!(manager.pair_count().await, 0);
    }

    #[tokio::test]
    async fn remove_pair_publishes_event() {
        let (_, manager) = setup();
        let entry_id = manager.add_pair(den()).await.unwrap();
        let mut events = manager.subscribe();

        assert!(manager.remove_pair(entry_id).await);
        assert!(!manager.remove_pair(entry_id).await);

        let event = events.recv().await.unwrap();
        assert_eq!(event, ThermostatEvent::pair_removed(entry_id));
        assert!(manager.get(entry_id).await.is_none());
    }

    #[tokio::test]
    async fn rename_keeps_entry_id() {
        let (_, manager) = setup();
        let entry_id = manager.add_pair(den()).await.unwrap();

        manager.rename_pair(entry_id, "Den Unified").await.unwrap();

        let thermostat = manager.get(entry_id).await.unwrap();
        assert_eq!(thermostat.name(), "Den Unified");
        assert_eq!(thermostat.entry_id(), entry_id);
        assert_eq!(thermostat.device_info().name, "Den Unified");
    }

    #[tokio::test]
    async fn rename_unknown_pair_fails() {
        let (_, manager) = setup();
        let err = manager.rename_pair(EntryId::new(), "x").await.unwrap_err();
        assert!(matches!(err, Error::PairNotFound(_)));
    }

    #[tokio::test]
    async fn discover_skips_configured_pairs() {
        let (_, manager) = setup();
        assert_eq!(manager.discover(&DiscoveryOptions::default()).await.len(), 2);

        manager.add_pair(den()).await.unwrap();
        let remaining = manager.discover(&DiscoveryOptions::default()).await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].room, "Loft");
    }

    #[tokio::test]
    async fn state_change_reaches_watching_pairs_only() {
        let (store, manager) = setup();
        let den_id = manager.add_pair(den()).await.unwrap();
        manager
            .add_pair(PairConfig::new(entity("climate.loft_matter"), entity("climate.loft")))
            .await
            .unwrap();
        let mut events = manager.subscribe();

        store.set(entity("climate.den"), EntityState::new("cool"));
        assert_eq!(manager.handle_state_change(&entity("climate.den")).await, 1);

        match events.recv().await.unwrap() {
            ThermostatEvent::ViewUpdated { entry_id, view } => {
                assert_eq!(entry_id, den_id);
                assert_eq!(view.mode.as_deref(), Some("cool"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn execute_unknown_pair_fails() {
        let (_, manager) = setup();
        let err = manager
            .execute(EntryId::new(), &ClimateCommand::TurnOff)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PairNotFound(_)));
    }
}
