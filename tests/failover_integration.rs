// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for a unified thermostat over an in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use climate_unify::command::{ClimateCommand, CommandOutcome};
use climate_unify::engine::Route;
use climate_unify::error::{Error, InvokeError};
use climate_unify::event::{EventBus, StateChangedEvent, ThermostatEvent};
use climate_unify::manager::ThermostatManager;
use climate_unify::pairing::{DiscoveryOptions, PairConfig};
use climate_unify::state::EntityState;
use climate_unify::store::{CommandInvoker, MemoryStateStore};
use climate_unify::subscription::Subscribable;
use climate_unify::types::{Capability, EntityRef, SourceLabels, SourceRole, TemperatureUnit};
use climate_unify::UnifiedThermostat;
use parking_lot::Mutex;
use serde_json::json;
use tokio::time::timeout;

/// Invoker that records every call and optionally fails them.
#[derive(Default)]
struct RecordingInvoker {
    calls: Mutex<Vec<(EntityRef, ClimateCommand)>>,
    failure: Mutex<Option<InvokeError>>,
}

impl RecordingInvoker {
    fn failing(error: InvokeError) -> Self {
        Self {
            failure: Mutex::new(Some(error)),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<(EntityRef, ClimateCommand)> {
        self.calls.lock().clone()
    }
}

impl CommandInvoker for RecordingInvoker {
    async fn invoke(
        &self,
        entity: &EntityRef,
        command: &ClimateCommand,
    ) -> Result<(), InvokeError> {
        self.calls.lock().push((entity.clone(), command.clone()));
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn matter() -> EntityRef {
    EntityRef::new("climate.living_room_matter").unwrap()
}

fn google() -> EntityRef {
    EntityRef::new("climate.living_room").unwrap()
}

fn matter_state() -> EntityState {
    EntityState::new("heat").with_attributes(json!({
        "current_temperature": 21.5,
        "temperature": 22.0,
        "min_temp": 10.0,
        "max_temp": 30.0,
        "hvac_modes": ["off", "heat"],
    }))
}

fn google_state() -> EntityState {
    EntityState::new("heat").with_attributes(json!({
        "current_temperature": 20.0,
        "temperature": 21.0,
        "min_temp": 9.0,
        "max_temp": 32.0,
        "hvac_modes": ["off", "heat", "cool", "heat_cool"],
        "fan_mode": "auto",
        "fan_modes": ["auto", "low"],
        "current_humidity": 45,
    }))
}

struct Harness {
    store: Arc<MemoryStateStore>,
    invoker: Arc<RecordingInvoker>,
    thermostat: Arc<UnifiedThermostat<MemoryStateStore, RecordingInvoker>>,
}

fn harness_with(
    invoker: RecordingInvoker,
    matter: Option<EntityState>,
    google: Option<EntityState>,
) -> Harness {
    let store = Arc::new(MemoryStateStore::new());
    if let Some(state) = matter {
        store.set(self::matter(), state);
    }
    if let Some(state) = google {
        store.set(self::google(), state);
    }

    let invoker = Arc::new(invoker);
    let thermostat = Arc::new(UnifiedThermostat::new(
        PairConfig::new(self::matter(), self::google()).with_name("Living Room Unified"),
        Arc::clone(&store),
        Arc::clone(&invoker),
    ));

    Harness {
        store,
        invoker,
        thermostat,
    }
}

fn harness() -> Harness {
    harness_with(
        RecordingInvoker::default(),
        Some(matter_state()),
        Some(google_state()),
    )
}

// ============================================================================
// Reconciliation
// ============================================================================

mod reconciliation {
    use super::*;

    #[test]
    fn both_sources_available() {
        let h = harness();
        let view = h.thermostat.view();

        assert!(view.available);
        assert_eq!(view.current_temperature, Some(21.5));
        assert_eq!(view.target_temperature, Some(22.0));
        assert_eq!((view.min_temp, view.max_temp), (10.0, 30.0));
        assert_eq!(view.mode.as_deref(), Some("heat"));
        assert_eq!(view.supported_modes.len(), 4);
        assert_eq!(view.fan_mode.as_deref(), Some("auto"));
        assert_eq!(view.supported_fan_modes, vec!["auto", "low"]);
        assert_eq!(view.humidity, Some(45.0));
        assert!(view.supports_fan_mode());
    }

    #[test]
    fn both_sources_unavailable() {
        let h = harness_with(
            RecordingInvoker::default(),
            Some(EntityState::unavailable()),
            Some(EntityState::unavailable()),
        );
        let view = h.thermostat.view();

        assert!(!view.available);
        assert_eq!((view.min_temp, view.max_temp), (7.0, 35.0));
        assert_eq!(view.mode, None);
        assert_eq!(view.fan_mode, None);
        assert!(!view.supports_fan_mode());
    }

    #[test]
    fn matter_outage_fails_temperature_over() {
        let h = harness();

        h.store.set_unavailable(matter());
        let view = h.thermostat.handle_state_change(&matter()).unwrap();

        assert!(view.available);
        assert_eq!(view.current_temperature, Some(20.0));
        assert_eq!(view.target_temperature, Some(21.0));
        assert_eq!((view.min_temp, view.max_temp), (9.0, 32.0));
        assert_eq!(view.fan_mode.as_deref(), Some("auto"));
    }

    #[test]
    fn google_outage_drops_fan_control() {
        let h = harness();

        h.store.set_unavailable(google());
        let view = h.thermostat.handle_state_change(&google()).unwrap();

        assert!(view.available);
        assert_eq!(view.current_temperature, Some(21.5));
        assert_eq!(view.supported_modes, vec!["off", "heat"]);
        assert_eq!(view.fan_mode, None);
        assert_eq!(view.humidity, None);
        assert!(!view.supports_fan_mode());
    }

    #[test]
    fn fan_control_follows_google_availability() {
        let h = harness();
        let mut seen = vec![h.thermostat.view().supports_fan_mode()];

        h.store.set_unavailable(google());
        seen.push(h.thermostat.refresh().supports_fan_mode());

        h.store.set(google(), google_state());
        seen.push(h.thermostat.refresh().supports_fan_mode());

        assert_eq!(seen, vec![true, false, true]);
    }

    #[test]
    fn removed_source_counts_as_unavailable() {
        let h = harness();

        h.store.remove(&google());
        let view = h.thermostat.refresh();

        assert!(view.available);
        assert!(!view.supports_fan_mode());
        assert_eq!(h.thermostat.active_source(Capability::FanMode), "unavailable");
    }
}

// ============================================================================
// Command Routing
// ============================================================================

mod command_routing {
    use super::*;

    #[tokio::test]
    async fn temperature_goes_to_matter() {
        let h = harness();

        let outcome = h.thermostat.set_temperature(20.5).await.unwrap();

        assert_eq!(
            outcome,
            CommandOutcome::Dispatched {
                entity: matter(),
                route: Route::Preferred(SourceRole::Primary),
            }
        );
        assert_eq!(
            h.invoker.calls(),
            vec![(matter(), ClimateCommand::set_temperature(20.5))]
        );
    }

    #[tokio::test]
    async fn temperature_falls_back_to_google() {
        let h = harness();
        h.store.set_unavailable(matter());

        let outcome = h.thermostat.set_temperature(20.5).await.unwrap();

        assert_eq!(outcome.entity(), Some(&google()));
        assert_eq!(h.invoker.calls()[0].0, google());
    }

    #[tokio::test]
    async fn mode_and_power_go_to_google() {
        let h = harness();

        h.thermostat.set_hvac_mode("cool").await.unwrap();
        h.thermostat.turn_off().await.unwrap();

        let targets: Vec<_> = h.invoker.calls().into_iter().map(|(e, _)| e).collect();
        assert_eq!(targets, vec![google(), google()]);
    }

    #[tokio::test]
    async fn mode_falls_back_to_matter() {
        let h = harness();
        h.store.set_unavailable(google());

        let outcome = h.thermostat.turn_on().await.unwrap();

        assert!(matches!(
            outcome,
            CommandOutcome::Dispatched {
                route: Route::Fallback(SourceRole::Primary),
                ..
            }
        ));
        assert_eq!(h.invoker.calls(), vec![(matter(), ClimateCommand::TurnOn)]);
    }

    #[tokio::test]
    async fn fan_without_google_is_unavailable() {
        let h = harness();
        h.store.set_unavailable(google());

        let err = h.thermostat.set_fan_mode("low").await.unwrap_err();

        assert!(matches!(
            err,
            Error::SourceUnavailable {
                capability: Capability::FanMode
            }
        ));
        assert!(h.invoker.calls().is_empty());
    }

    #[tokio::test]
    async fn routing_uses_fresh_availability() {
        let h = harness();

        // The cached view still shows the matter source as available
        h.store.set_unavailable(matter());
        assert_eq!(h.thermostat.view().current_temperature, Some(21.5));

        h.thermostat.set_temperature(19.0).await.unwrap();
        assert_eq!(h.invoker.calls()[0].0, google());
    }

    #[tokio::test]
    async fn missing_temperature_is_ignored() {
        let h = harness();

        let command = ClimateCommand::from_service("set_temperature", &json!({})).unwrap();
        let outcome = h.thermostat.execute(&command).await.unwrap();

        assert_eq!(outcome, CommandOutcome::Ignored);
        assert!(h.invoker.calls().is_empty());
    }

    #[tokio::test]
    async fn invoker_failure_surfaces_once() {
        let h = harness_with(
            RecordingInvoker::failing(InvokeError::Timeout(10_000)),
            Some(matter_state()),
            Some(google_state()),
        );

        let err = h.thermostat.set_hvac_mode("heat").await.unwrap_err();

        match err {
            Error::CommandFailed { entity, source } => {
                assert_eq!(entity, google());
                assert_eq!(source, InvokeError::Timeout(10_000));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(h.invoker.calls().len(), 1);
    }
}

// ============================================================================
// Subscriptions and Change Stream
// ============================================================================

mod change_stream {
    use super::*;

    #[tokio::test]
    async fn run_reconciles_on_store_changes() {
        let h = harness();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        h.thermostat.on_change(move |view| {
            let _ = tx.send(view.clone());
        });

        let thermostat = Arc::clone(&h.thermostat);
        let changes = h.store.subscribe();
        let runner = tokio::spawn(async move { thermostat.run(changes).await });

        h.store.set(google(), google_state().with_attribute("fan_mode", "low"));

        let view = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(view.fan_mode.as_deref(), Some("low"));
        assert_eq!(h.thermostat.view(), view);

        runner.abort();
    }

    #[tokio::test]
    async fn unrelated_changes_do_not_notify() {
        let h = harness();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        h.thermostat.on_change(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        let bus = EventBus::new();
        let changes = bus.subscribe();
        bus.publish(StateChangedEvent::removed(EntityRef::new("climate.attic").unwrap()));
        drop(bus);

        h.thermostat.run(changes).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lagged_stream_triggers_full_reconciliation() {
        let h = harness();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        h.thermostat.on_change(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        let bus = EventBus::with_capacity(1);
        let changes = bus.subscribe();
        for _ in 0..3 {
            bus.publish(StateChangedEvent::updated(google(), google_state()));
        }
        drop(bus);

        h.store.set_unavailable(google());
        h.thermostat.run(changes).await;

        // One reconciliation for the lag, one for the retained event
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(!h.thermostat.view().supports_fan_mode());
    }

    #[test]
    fn availability_callback_fires_on_transitions() {
        let h = harness();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let id = h.thermostat.on_availability_changed(move |available| {
            seen_clone.lock().push(available);
        });

        h.store.set_unavailable(matter());
        h.thermostat.refresh();
        h.store.set_unavailable(google());
        h.thermostat.refresh();
        h.store.set(matter(), matter_state());
        h.thermostat.refresh();

        assert_eq!(*seen.lock(), vec![false, true]);
        assert!(h.thermostat.unsubscribe(id));
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

mod diagnostics {
    use super::*;

    fn values(h: &Harness) -> Vec<String> {
        h.thermostat
            .diagnostics()
            .into_iter()
            .map(|reading| reading.value)
            .collect()
    }

    #[test]
    fn both_available() {
        let h = harness();
        assert_eq!(values(&h), vec!["matter", "google", "google"]);
    }

    #[test]
    fn matter_down() {
        let h = harness();
        h.store.set_unavailable(matter());
        assert_eq!(values(&h), vec!["google (fallback)", "google", "google"]);
    }

    #[test]
    fn google_down() {
        let h = harness();
        h.store.set_unavailable(google());
        assert_eq!(values(&h), vec!["matter", "matter (fallback)", "unavailable"]);
    }

    #[test]
    fn custom_labels() {
        let store = Arc::new(MemoryStateStore::new());
        store.set(google(), google_state());
        let thermostat = UnifiedThermostat::new(
            PairConfig::new(matter(), google()).with_labels(SourceLabels::new("local", "cloud")),
            store,
            Arc::new(RecordingInvoker::default()),
        );

        assert_eq!(thermostat.active_source(Capability::Temperature), "cloud (fallback)");
    }

    #[test]
    fn readings_have_stable_ids() {
        let h = harness();
        let readings = h.thermostat.diagnostics();
        let names: Vec<_> = readings.iter().map(|r| r.name).collect();

        assert_eq!(names, vec!["Temperature Source", "HVAC Source", "Fan Source"]);
        assert_eq!(readings[1].unique_id, format!("{}_hvac_source", h.thermostat.unique_id()));
    }

    #[test]
    fn device_identity_groups_indicators() {
        let h = harness();
        let info = h.thermostat.device_info();

        assert_eq!(info.manufacturer, "Google");
        assert_eq!(info.model, "Nest Thermostat (Unified)");
        assert_eq!(info.name, h.thermostat.name());
        for reading in h.thermostat.diagnostics() {
            assert!(reading.unique_id.starts_with(&info.identifier));
        }
        assert_eq!(h.thermostat.temperature_unit(), TemperatureUnit::Celsius);
    }
}

// ============================================================================
// Manager
// ============================================================================

mod manager {
    use super::*;

    #[tokio::test]
    async fn discover_add_and_control() {
        let store = Arc::new(MemoryStateStore::new());
        store.set(matter(), matter_state());
        store.set(google(), google_state());
        let invoker = Arc::new(RecordingInvoker::default());
        let manager = ThermostatManager::new(Arc::clone(&store), Arc::clone(&invoker));

        let pairs = manager.discover(&DiscoveryOptions::default()).await;
        assert_eq!(pairs.len(), 1);
        let config = pairs.into_iter().next().unwrap().into_config();
        assert_eq!(config.name, "Living Room Unified");

        let entry_id = manager.add_pair(config).await.unwrap();
        assert!(manager.discover(&DiscoveryOptions::default()).await.is_empty());

        manager
            .execute(entry_id, &ClimateCommand::set_fan_mode("low"))
            .await
            .unwrap();
        assert_eq!(invoker.calls(), vec![(google(), ClimateCommand::set_fan_mode("low"))]);
    }

    #[tokio::test]
    async fn run_publishes_view_updates() {
        let store = Arc::new(MemoryStateStore::new());
        store.set(matter(), matter_state());
        store.set(google(), google_state());
        let manager =
            ThermostatManager::new(Arc::clone(&store), Arc::new(RecordingInvoker::default()));
        let entry_id = manager
            .add_pair(PairConfig::new(matter(), google()))
            .await
            .unwrap();

        let mut events = manager.subscribe();
        let runner = manager.clone();
        let changes = store.subscribe();
        let task = tokio::spawn(async move { runner.run(changes).await });

        store.set_unavailable(matter());

        let event = timeout(Duration::from_secs(1), events.recv())
            .await
            .unwrap()
            .unwrap();
        match event {
            ThermostatEvent::ViewUpdated { entry_id: id, view } => {
                assert_eq!(id, entry_id);
                assert_eq!(view.current_temperature, Some(20.0));
            }
            other => panic!("unexpected event: {other:?}"),
        }

        task.abort();
    }

    #[tokio::test]
    async fn add_pair_rejects_unavailable_entity() {
        let store = Arc::new(MemoryStateStore::new());
        store.set(matter(), matter_state());
        store.set_unavailable(google());
        let manager = ThermostatManager::new(store, Arc::new(RecordingInvoker::default()));

        let err = manager
            .add_pair(PairConfig::new(matter(), google()))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration conflict: entity climate.living_room is unavailable"
        );
    }
}
