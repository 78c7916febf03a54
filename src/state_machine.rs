//! Evaluates transitions given an event, the current state, and the panel
//! timings, invoking actuator side-effects and persisting state through
//! the timer manager and state store.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Sender;
use tracing::{debug, info, warn};

use crate::config::{ModeTimings, Registry};
use crate::events::PanelEvent;
use crate::state_store::{PersistedState, StateStore};
use crate::timer::{Role, TimerManager};

/// Re-exported so `config.rs` and callers can write
/// `crate::state_machine::ArmedMode` without reaching into `events`.
pub use crate::events::ArmedMode;

/// One of the seven alarm states the panel can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmState {
    Disarmed,
    Arming,
    ArmedHome,
    ArmedNight,
    ArmedAway,
    Pending,
    Triggered,
}

impl AlarmState {
    pub fn as_str(self) -> &'static str {
        match self {
            AlarmState::Disarmed => "disarmed",
            AlarmState::Arming => "arming",
            AlarmState::ArmedHome => "armed_home",
            AlarmState::ArmedNight => "armed_night",
            AlarmState::ArmedAway => "armed_away",
            AlarmState::Pending => "pending",
            AlarmState::Triggered => "triggered",
        }
    }

    pub fn from_mode(mode: ArmedMode) -> Self {
        match mode {
            ArmedMode::Home => AlarmState::ArmedHome,
            ArmedMode::Night => AlarmState::ArmedNight,
            ArmedMode::Away => AlarmState::ArmedAway,
        }
    }

    /// The armed mode this state corresponds to, if it is one of the three
    /// `armed_*` states.
    pub fn mode(self) -> Option<ArmedMode> {
        match self {
            AlarmState::ArmedHome => Some(ArmedMode::Home),
            AlarmState::ArmedNight => Some(ArmedMode::Night),
            AlarmState::ArmedAway => Some(ArmedMode::Away),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlarmState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actuator side-effects emitted by the state machine. Pushed onto a
/// bounded channel so a slow bus publish cannot stall the dispatch loop
/// past the buffer's capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActuatorCommand {
    /// Publish an `arm_mode` LED command to one keypad.
    KeypadLed { keypad: String, verb: &'static str },
    /// Publish an `arm_mode` LED command to every configured keypad.
    KeypadLedAll { verb: &'static str },
    /// Start a siren's warning output for `duration_s` seconds.
    SirenStart { siren: String, duration_s: u64 },
    /// Stop a siren's warning output.
    SirenStop { siren: String },
    /// Publish the retained alarm-state topic.
    PublishState { state: AlarmState },
}

/// The alarm state machine. Owns the current/previous state and the timer
/// handles; reads the registry under a read lock rather than owning it
/// outright, since the bus adapter needs its own read access.
pub struct StateMachine {
    registry: Arc<RwLock<Registry>>,
    timers: TimerManager,
    store: StateStore,
    actuators: Sender<ActuatorCommand>,
    current: AlarmState,
    previous: AlarmState,
}

impl StateMachine {
    pub fn new(
        registry: Arc<RwLock<Registry>>,
        timers: TimerManager,
        store: StateStore,
        actuators: Sender<ActuatorCommand>,
        initial: PersistedState,
    ) -> Self {
        Self {
            registry,
            timers,
            store,
            actuators,
            current: initial.current_state,
            previous: initial.previous_state,
        }
    }

    pub fn current(&self) -> AlarmState {
        self.current
    }

    pub fn previous(&self) -> AlarmState {
        self.previous
    }

    fn persist(&self) {
        self.store.save(PersistedState {
            current_state: self.current,
            previous_state: self.previous,
        });
        self.emit(ActuatorCommand::PublishState {
            state: self.current,
        });
    }

    fn emit(&self, command: ActuatorCommand) {
        if let Err(err) = self.actuators.try_send(command) {
            warn!(%err, "actuator command buffer full or closed; dropping command");
        }
    }

    fn set_state(&mut self, new_state: AlarmState) {
        self.previous = self.current;
        self.current = new_state;
    }

    fn timings_for(&self, mode: ArmedMode) -> ModeTimings {
        self.registry.read().unwrap().timings.for_mode(mode)
    }

    /// Process one event to completion, including every actuator publish
    /// and the state persist, before the caller accepts the next one.
    pub fn handle(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::Arm { mode, actor, keypad } => self.on_arm(mode, actor, keypad),
            PanelEvent::Disarm { actor } => self.on_disarm(actor),
            PanelEvent::Panic { actor } => self.on_panic(actor),
            PanelEvent::SensorTrip { sensor, description } => {
                self.on_sensor_trip(sensor, description)
            }
            PanelEvent::SensorTamper { sensor } => self.on_sensor_tamper(sensor),
            PanelEvent::ArmComplete { mode, actor } => self.on_arm_complete(mode, actor),
            PanelEvent::EntryExpired { sensor } => self.on_entry_expired(sensor),
            PanelEvent::SirenExpired => self.on_siren_expired(),
            PanelEvent::ReloadConfig => {
                debug!("reload_config event reached the state machine with no dedicated action");
            }
        }
    }

    fn on_arm(&mut self, mode: ArmedMode, actor: String, keypad: Option<String>) {
        if self.current != AlarmState::Disarmed {
            debug!(state = %self.current, "ignoring Arm: not disarmed");
            return;
        }

        let timings = self.timings_for(mode);
        if timings.exit_delay == 0 {
            self.set_state(AlarmState::from_mode(mode));
            self.persist();
            if mode == ArmedMode::Away {
                // No exit delay means no later ArmComplete to defer to, so
                // the arm_all_zones LED has to go out in this transition.
                self.emit(ActuatorCommand::KeypadLedAll {
                    verb: "arm_all_zones",
                });
            } else {
                self.publish_arm_mode_leds(mode, &keypad);
            }
            info!(%actor, mode = %mode, "armed immediately (no exit delay)");
            return;
        }

        self.set_state(AlarmState::Arming);
        self.persist();
        self.timers.schedule(
            Role::Exit,
            Duration::from_secs(timings.exit_delay),
            PanelEvent::ArmComplete {
                mode,
                actor: actor.clone(),
            },
        );

        if mode == ArmedMode::Away {
            if let Some(keypad) = &keypad {
                self.emit(ActuatorCommand::KeypadLed {
                    keypad: keypad.clone(),
                    verb: "arming_away",
                });
            }
        } else {
            self.publish_arm_mode_leds(mode, &keypad);
        }
        info!(%actor, mode = %mode, exit_delay_s = timings.exit_delay, "exit delay started");
    }

    fn on_arm_complete(&mut self, mode: ArmedMode, actor: String) {
        if self.current != AlarmState::Arming {
            debug!(state = %self.current, "ignoring stray ArmComplete");
            return;
        }
        self.set_state(AlarmState::from_mode(mode));
        self.persist();
        if mode == ArmedMode::Away {
            self.emit(ActuatorCommand::KeypadLedAll {
                verb: "arm_all_zones",
            });
        }
        info!(%actor, mode = %mode, "exit delay elapsed, now armed");
    }

    fn on_disarm(&mut self, actor: String) {
        match self.current {
            AlarmState::Arming => {
                let cancelled = self.timers.cancel(Role::Exit);
                if cancelled {
                    info!(%actor, "Exit delay canceled by {actor}");
                }
                self.set_state(AlarmState::Disarmed);
                self.persist();
                self.emit(ActuatorCommand::KeypadLedAll { verb: "disarm" });
            }
            AlarmState::Pending => {
                let cancelled = self.timers.cancel(Role::Entry);
                if cancelled {
                    info!(%actor, "Entry delay canceled by {actor}");
                }
                self.set_state(AlarmState::Disarmed);
                self.persist();
                self.emit(ActuatorCommand::KeypadLedAll { verb: "disarm" });
            }
            AlarmState::Triggered => {
                for siren in self.registry.read().unwrap().sirens.iter() {
                    self.emit(ActuatorCommand::SirenStop {
                        siren: siren.name.clone(),
                    });
                }
                self.timers.cancel(Role::Siren);
                self.set_state(AlarmState::Disarmed);
                self.persist();
                self.emit(ActuatorCommand::KeypadLedAll { verb: "disarm" });
                info!(%actor, "disarmed after trigger");
            }
            AlarmState::ArmedHome | AlarmState::ArmedNight | AlarmState::ArmedAway => {
                self.set_state(AlarmState::Disarmed);
                self.persist();
                self.emit(ActuatorCommand::KeypadLedAll { verb: "disarm" });
                info!(%actor, "disarmed");
            }
            AlarmState::Disarmed => {
                debug!("ignoring Disarm: already disarmed");
            }
        }
    }

    fn on_panic(&mut self, actor: String) {
        if self.current == AlarmState::Triggered {
            debug!("ignoring Panic: already triggered");
            return;
        }
        let previous = if self.current == AlarmState::Disarmed {
            AlarmState::Disarmed
        } else {
            self.current
        };
        self.enter_triggered(previous, &format!("panic by {actor}"), false);
    }

    fn on_sensor_trip(&mut self, sensor: String, description: &'static str) {
        if self.current == AlarmState::Disarmed {
            debug!(sensor, "sensor trip dropped: alarm is disarmed");
            return;
        }
        let Some(mode) = self.current.mode() else {
            debug!(
                sensor,
                state = %self.current,
                "sensor trip received in transient state; ignored (first qualified trip already owns the timer)"
            );
            return;
        };

        let qualifies = {
            let registry = self.registry.read().unwrap();
            registry
                .sensor(&sensor)
                .map(|cfg| cfg.active.includes(mode))
                .unwrap_or(false)
        };
        if !qualifies {
            debug!(sensor, mode = %mode, "sensor not active in current mode; ignored");
            return;
        }

        let instant = {
            let registry = self.registry.read().unwrap();
            registry.sensor(&sensor).map(|cfg| cfg.instant).unwrap_or(false)
        };
        let timings = self.timings_for(mode);

        if instant || timings.entry_delay == 0 {
            self.enter_triggered(self.current, &format!("sensor {sensor} {description}"), false);
            return;
        }

        self.set_state(AlarmState::Pending);
        self.persist();
        self.timers.schedule(
            Role::Entry,
            Duration::from_secs(timings.entry_delay),
            PanelEvent::EntryExpired { sensor: sensor.clone() },
        );
        info!(sensor, entry_delay_s = timings.entry_delay, "entry delay started");
    }

    fn on_sensor_tamper(&mut self, sensor: String) {
        if self.current == AlarmState::Disarmed {
            debug!(sensor, "tamper dropped: alarm is disarmed");
            return;
        }
        let monitored = {
            let registry = self.registry.read().unwrap();
            registry.sensor(&sensor).map(|cfg| cfg.tamper).unwrap_or(false)
        };
        if !monitored {
            debug!(sensor, "tamper field ignored: sensor is not tamper_monitored");
            return;
        }
        self.enter_triggered(self.current, &format!("sensor {sensor} tampering"), true);
    }

    fn on_entry_expired(&mut self, sensor: String) {
        if self.current != AlarmState::Pending {
            debug!(state = %self.current, "ignoring stray EntryExpired");
            return;
        }
        self.enter_triggered(self.previous, &format!("sensor {sensor} (entry delay elapsed)"), false);
    }

    fn enter_triggered(&mut self, previous: AlarmState, reason: &str, tamper: bool) {
        self.previous = previous;
        self.current = AlarmState::Triggered;
        self.persist();

        let mode = previous.mode();
        let alarm_time = mode
            .map(|m| self.timings_for(m).alarm_time)
            .unwrap_or(0);

        self.timers
            .schedule(Role::Siren, Duration::from_secs(alarm_time), PanelEvent::SirenExpired);

        for siren in self.registry.read().unwrap().sirens.iter() {
            self.emit(ActuatorCommand::SirenStart {
                siren: siren.name.clone(),
                duration_s: alarm_time,
            });
        }

        let tamper_note = if tamper { " (tampering)" } else { "" };
        warn!(reason, tamper, "alarm triggered{tamper_note}");
    }

    fn on_siren_expired(&mut self) {
        if self.current != AlarmState::Triggered {
            debug!(state = %self.current, "ignoring stray SirenExpired");
            return;
        }
        let restored = self.previous;
        self.previous = AlarmState::Triggered;
        self.current = restored;
        self.persist();
        info!(restored = %restored, "siren timer elapsed, state restored");
    }

    /// Home/Night LED publication only — callers handle `Away` themselves,
    /// since whether its `arm_all_zones` LED fires now or is deferred to
    /// `ArmComplete` depends on whether there's an exit delay at all.
    fn publish_arm_mode_leds(&self, mode: ArmedMode, keypad: &Option<String>) {
        let verb = match mode {
            ArmedMode::Home => "arm_day_zones",
            ArmedMode::Night => "arm_night_zones",
            ArmedMode::Away => unreachable!("Away is handled by the caller"),
        };
        let _ = keypad;
        self.emit(ActuatorCommand::KeypadLedAll { verb });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModeTimings, PanelTimings, SensorActive, SensorConfig, SensorKind, SirenConfig};
    use std::time::Duration as StdDuration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    fn registry_with(timings: PanelTimings, sensors: Vec<SensorConfig>) -> Arc<RwLock<Registry>> {
        Arc::new(RwLock::new(Registry {
            codes: Default::default(),
            timings,
            sensors,
            keypads: vec![],
            sirens: vec![SirenConfig {
                name: "siren1".to_string(),
            }],
            keyfobs: vec![],
            buttons: vec![],
            notify: Default::default(),
            logging: Default::default(),
            state: Default::default(),
        }))
    }

    fn harness(
        timings: PanelTimings,
        sensors: Vec<SensorConfig>,
    ) -> (StateMachine, mpsc::Receiver<ActuatorCommand>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
        let (act_tx, act_rx) = mpsc::channel(64);
        let registry = registry_with(timings, sensors);
        let store = StateStore::new(dir.path().join(".state"));
        let sm = StateMachine::new(
            registry,
            TimerManager::new(timer_tx),
            store,
            act_tx,
            PersistedState::default(),
        );
        // Drain the internal timer->event channel is the caller's job in
        // production (the dispatch loop); tests call `handle` directly for
        // synthetic timer events, so leak the receiver to keep senders
        // alive without routing them anywhere.
        tokio::spawn(async move { while timer_rx.recv().await.is_some() {} });
        (sm, act_rx, dir)
    }

    fn away_timings(exit: u64, entry: u64, alarm: u64) -> PanelTimings {
        PanelTimings {
            armed_home: ModeTimings::default(),
            armed_night: ModeTimings::default(),
            armed_away: ModeTimings {
                exit_delay: exit,
                entry_delay: entry,
                alarm_time: alarm,
            },
        }
    }

    #[tokio::test]
    async fn arm_away_with_zero_exit_delay_publishes_arm_all_zones_immediately() {
        let (mut sm, mut acts, _dir) = harness(away_timings(0, 30, 180), vec![]);
        sm.handle(PanelEvent::Arm {
            mode: ArmedMode::Away,
            actor: "alice".to_string(),
            keypad: None,
        });
        assert_eq!(sm.current(), AlarmState::ArmedAway);

        let mut seen = Vec::new();
        while let Ok(cmd) = acts.try_recv() {
            seen.push(cmd);
        }
        assert!(seen.contains(&ActuatorCommand::KeypadLedAll {
            verb: "arm_all_zones"
        }));
        assert!(seen.contains(&ActuatorCommand::PublishState {
            state: AlarmState::ArmedAway
        }));
    }

    #[tokio::test]
    async fn s1_arm_away_with_exit_delay() {
        let (mut sm, mut acts, _dir) = harness(away_timings(30, 30, 180), vec![]);
        sm.handle(PanelEvent::Arm {
            mode: ArmedMode::Away,
            actor: "alice".to_string(),
            keypad: Some("keypad1".to_string()),
        });
        assert_eq!(sm.current(), AlarmState::Arming);
        assert_eq!(
            acts.recv().await,
            Some(ActuatorCommand::KeypadLed {
                keypad: "keypad1".to_string(),
                verb: "arming_away"
            })
        );
        assert_eq!(
            acts.recv().await,
            Some(ActuatorCommand::PublishState {
                state: AlarmState::Arming
            })
        );

        sm.handle(PanelEvent::ArmComplete {
            mode: ArmedMode::Away,
            actor: "alice".to_string(),
        });
        assert_eq!(sm.current(), AlarmState::ArmedAway);
        assert_eq!(
            acts.recv().await,
            Some(ActuatorCommand::KeypadLedAll {
                verb: "arm_all_zones"
            })
        );
        assert_eq!(
            acts.recv().await,
            Some(ActuatorCommand::PublishState {
                state: AlarmState::ArmedAway
            })
        );
    }

    #[tokio::test]
    async fn s2_entry_delay_then_trigger() {
        let sensor = SensorConfig {
            name: "front_door".to_string(),
            kind: SensorKind::Contact,
            active: SensorActive::Always(crate::config::AlwaysTag),
            instant: false,
            tamper: false,
        };
        let (mut sm, mut acts, _dir) = harness(away_timings(0, 1, 2), vec![sensor]);
        sm.handle(PanelEvent::Arm {
            mode: ArmedMode::Away,
            actor: "alice".to_string(),
            keypad: None,
        });
        assert_eq!(sm.current(), AlarmState::ArmedAway);
        while acts.try_recv().is_ok() {}

        sm.handle(PanelEvent::SensorTrip {
            sensor: "front_door".to_string(),
            description: "opened",
        });
        assert_eq!(sm.current(), AlarmState::Pending);

        sm.handle(PanelEvent::EntryExpired {
            sensor: "front_door".to_string(),
        });
        assert_eq!(sm.current(), AlarmState::Triggered);
        assert_eq!(sm.previous(), AlarmState::ArmedAway);

        let mut saw_siren_start = false;
        while let Ok(cmd) = timeout(StdDuration::from_millis(20), acts.recv()).await {
            match cmd {
                Some(ActuatorCommand::SirenStart { duration_s, .. }) => {
                    saw_siren_start = true;
                    assert_eq!(duration_s, 2);
                }
                None => break,
                _ => {}
            }
        }
        assert!(saw_siren_start);

        sm.handle(PanelEvent::SirenExpired);
        assert_eq!(sm.current(), AlarmState::ArmedAway);
        assert_eq!(sm.previous(), AlarmState::Triggered);
    }

    #[tokio::test]
    async fn s3_disarm_during_pending_cancels_entry_timer() {
        let sensor = SensorConfig {
            name: "front_door".to_string(),
            kind: SensorKind::Contact,
            active: SensorActive::Always(crate::config::AlwaysTag),
            instant: false,
            tamper: false,
        };
        let (mut sm, _acts, _dir) = harness(away_timings(0, 30, 180), vec![sensor]);
        sm.handle(PanelEvent::Arm {
            mode: ArmedMode::Away,
            actor: "alice".to_string(),
            keypad: None,
        });
        sm.handle(PanelEvent::SensorTrip {
            sensor: "front_door".to_string(),
            description: "opened",
        });
        assert_eq!(sm.current(), AlarmState::Pending);

        sm.handle(PanelEvent::Disarm {
            actor: "bob".to_string(),
        });
        assert_eq!(sm.current(), AlarmState::Disarmed);
    }

    #[tokio::test]
    async fn s4_instant_tamper_bypasses_delays_regardless_of_instant_field() {
        let sensor = SensorConfig {
            name: "safe".to_string(),
            kind: SensorKind::Contact,
            active: SensorActive::Always(crate::config::AlwaysTag),
            instant: false,
            tamper: true,
        };
        let timings = PanelTimings {
            armed_home: ModeTimings {
                exit_delay: 0,
                entry_delay: 30,
                alarm_time: 60,
            },
            ..Default::default()
        };
        let (mut sm, _acts, _dir) = harness(timings, vec![sensor]);
        sm.handle(PanelEvent::Arm {
            mode: ArmedMode::Home,
            actor: "alice".to_string(),
            keypad: None,
        });
        assert_eq!(sm.current(), AlarmState::ArmedHome);

        sm.handle(PanelEvent::SensorTamper {
            sensor: "safe".to_string(),
        });
        assert_eq!(sm.current(), AlarmState::Triggered);
        assert_eq!(sm.previous(), AlarmState::ArmedHome);
    }

    #[tokio::test]
    async fn sensor_trip_in_disarmed_state_is_dropped() {
        let sensor = SensorConfig {
            name: "front_door".to_string(),
            kind: SensorKind::Contact,
            active: SensorActive::Always(crate::config::AlwaysTag),
            instant: true,
            tamper: false,
        };
        let (mut sm, mut acts, _dir) = harness(PanelTimings::default(), vec![sensor]);
        sm.handle(PanelEvent::SensorTrip {
            sensor: "front_door".to_string(),
            description: "opened",
        });
        assert_eq!(sm.current(), AlarmState::Disarmed);
        assert!(acts.try_recv().is_err());
    }

    #[tokio::test]
    async fn sensor_inactive_in_current_mode_never_transitions() {
        let sensor = SensorConfig {
            name: "motion1".to_string(),
            kind: SensorKind::Motion,
            active: SensorActive::Modes(vec!["armed_away".to_string()]),
            instant: true,
            tamper: false,
        };
        let timings = PanelTimings {
            armed_home: ModeTimings {
                exit_delay: 0,
                entry_delay: 0,
                alarm_time: 30,
            },
            ..Default::default()
        };
        let (mut sm, _acts, _dir) = harness(timings, vec![sensor]);
        sm.handle(PanelEvent::Arm {
            mode: ArmedMode::Home,
            actor: "alice".to_string(),
            keypad: None,
        });
        sm.handle(PanelEvent::SensorTrip {
            sensor: "motion1".to_string(),
            description: "detected",
        });
        assert_eq!(sm.current(), AlarmState::ArmedHome);
    }

    #[tokio::test]
    async fn panic_from_disarmed_restores_to_disarmed() {
        let (mut sm, _acts, _dir) = harness(PanelTimings::default(), vec![]);
        sm.handle(PanelEvent::Panic {
            actor: "alice".to_string(),
        });
        assert_eq!(sm.current(), AlarmState::Triggered);
        assert_eq!(sm.previous(), AlarmState::Disarmed);
    }

    #[tokio::test]
    async fn panic_from_armed_restores_to_that_mode() {
        let (mut sm, _acts, _dir) = harness(away_timings(0, 0, 60), vec![]);
        sm.handle(PanelEvent::Arm {
            mode: ArmedMode::Away,
            actor: "alice".to_string(),
            keypad: None,
        });
        sm.handle(PanelEvent::Panic {
            actor: "bob".to_string(),
        });
        assert_eq!(sm.current(), AlarmState::Triggered);
        assert_eq!(sm.previous(), AlarmState::ArmedAway);
    }
}
