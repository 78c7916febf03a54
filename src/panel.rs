//! `Panel`: owns the registry, state machine, and timer manager, and runs
//! the single dispatch loop that serializes every event. Keeps this state
//! in one struct passed explicitly to the bus adapter rather than behind
//! process-wide globals.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::{self, Registry};
use crate::events::PanelEvent;
use crate::state_machine::{ActuatorCommand, StateMachine};
use crate::state_store::StateStore;
use crate::timer::TimerManager;

pub struct Panel {
    config_path: PathBuf,
    registry: Arc<RwLock<Registry>>,
    state_machine: StateMachine,
    ingress: mpsc::Receiver<PanelEvent>,
}

impl Panel {
    pub fn new(
        config_path: PathBuf,
        registry: Arc<RwLock<Registry>>,
        store: StateStore,
        actuators: mpsc::Sender<ActuatorCommand>,
        timer_events: mpsc::UnboundedSender<PanelEvent>,
        ingress: mpsc::Receiver<PanelEvent>,
    ) -> Self {
        let initial = store.load_or_default();
        let timers = TimerManager::new(timer_events);
        let state_machine = StateMachine::new(registry.clone(), timers, store, actuators, initial);
        Self {
            config_path,
            registry,
            state_machine,
            ingress,
        }
    }

    pub fn registry_handle(&self) -> Arc<RwLock<Registry>> {
        self.registry.clone()
    }

    /// Drain the ingress queue forever, processing one event fully (state
    /// transition, actuator publishes, persistence) before accepting the
    /// next. `ReloadConfig` is intercepted here rather than forwarded to
    /// the state machine, since swapping the registry belongs to the
    /// config loader, not the state machine, and this is the safe point
    /// to do it at.
    pub async fn run(mut self) {
        while let Some(event) = self.ingress.recv().await {
            match event {
                PanelEvent::ReloadConfig => self.reload().await,
                other => self.state_machine.handle(other),
            }
        }
        warn!("dispatch loop ingress queue closed; panel shutting down");
    }

    async fn reload(&self) {
        match config::reload(&self.config_path) {
            Ok(registry) => {
                let mut guard = self.registry.write().unwrap();
                *guard = registry;
                info!("registry reloaded");
            }
            Err(err) => {
                error!(%err, "reload failed; keeping prior registry");
            }
        }
    }

    pub fn current_state(&self) -> crate::state_machine::AlarmState {
        self.state_machine.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoggingConfig, NotifyConfig, PanelTimings, StateConfig};
    use std::collections::BTreeMap;
    use std::io::Write;

    fn registry_with_codes(codes: BTreeMap<u32, String>) -> Registry {
        Registry {
            codes,
            timings: PanelTimings::default(),
            sensors: vec![],
            keypads: vec![],
            sirens: vec![],
            keyfobs: vec![],
            buttons: vec![],
            notify: NotifyConfig::default(),
            logging: LoggingConfig::default(),
            state: StateConfig::default(),
        }
    }

    fn panel_with(config_path: PathBuf, registry: Registry) -> Panel {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join(".state"));
        let (actuator_tx, _actuator_rx) = mpsc::channel(16);
        let (timer_tx, _timer_rx) = mpsc::unbounded_channel();
        let (_ingress_tx, ingress_rx) = mpsc::channel(16);
        // `dir` must outlive the returned `Panel` for the state file path to
        // stay valid; leaking it is fine in a short-lived test process.
        std::mem::forget(dir);
        Panel::new(
            config_path,
            Arc::new(RwLock::new(registry)),
            store,
            actuator_tx,
            timer_tx,
            ingress_rx,
        )
    }

    #[tokio::test]
    async fn reload_with_missing_file_keeps_prior_registry() {
        let mut original_codes = BTreeMap::new();
        original_codes.insert(1234, "alice".to_string());
        let panel = panel_with(
            PathBuf::from("/nonexistent/config.yaml"),
            registry_with_codes(original_codes.clone()),
        );

        panel.reload().await;

        let registry = panel.registry_handle();
        let guard = registry.read().unwrap();
        assert_eq!(guard.codes, original_codes);
    }

    #[tokio::test]
    async fn reload_with_malformed_file_keeps_prior_registry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"mqtt: [this is not a mapping").unwrap();

        let mut original_codes = BTreeMap::new();
        original_codes.insert(4321, "bob".to_string());
        let panel = panel_with(
            file.path().to_path_buf(),
            registry_with_codes(original_codes.clone()),
        );

        panel.reload().await;

        let registry = panel.registry_handle();
        let guard = registry.read().unwrap();
        assert_eq!(guard.codes, original_codes);
    }
}
