//! Parses incoming bus payloads, qualifies them against the registry, and
//! emits typed [`PanelEvent`]s onto the dispatch queue.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Registry;
use crate::error::PayloadError;
use crate::events::{
    button_outcome_to_internal, ArmedMode, InternalVerb, PanelEvent, SupervisorVerb,
};

/// Which bus-side device class a payload arrived from, resolved from the
/// originating topic before this module is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Sensor,
    Keypad,
    Keyfob,
    Button,
}

fn internal_to_event(verb: InternalVerb, actor: String, keypad: Option<String>) -> PanelEvent {
    match verb {
        InternalVerb::Disarm => PanelEvent::Disarm { actor },
        InternalVerb::Panic => PanelEvent::Panic { actor },
        InternalVerb::ArmDayZones => PanelEvent::Arm {
            mode: ArmedMode::Home,
            actor,
            keypad,
        },
        InternalVerb::ArmNightZones => PanelEvent::Arm {
            mode: ArmedMode::Night,
            actor,
            keypad,
        },
        InternalVerb::ArmAllZones => PanelEvent::Arm {
            mode: ArmedMode::Away,
            actor,
            keypad,
        },
    }
}

/// Route one gateway-sourced payload for a named device of the given class.
/// Returns `None` when the payload is malformed, the device is unknown or
/// disabled, or the verb does not qualify — every such case is logged at
/// an appropriate level rather than propagated as an error.
pub fn route_device_event(
    registry: &Registry,
    class: DeviceClass,
    device: &str,
    payload: &Value,
) -> Option<PanelEvent> {
    match class {
        DeviceClass::Sensor => route_sensor(registry, device, payload),
        DeviceClass::Keypad => route_keypad(registry, device, payload),
        DeviceClass::Keyfob => route_keyfob(registry, device, payload),
        DeviceClass::Button => route_button(registry, device, payload),
    }
}

fn route_sensor(registry: &Registry, device: &str, payload: &Value) -> Option<PanelEvent> {
    let sensor = registry.sensor(device)?;

    if let Some(tamper) = payload.get("tamper").and_then(Value::as_bool) {
        if sensor.tamper && tamper {
            return Some(PanelEvent::SensorTamper {
                sensor: device.to_string(),
            });
        }
    }

    let (sensor_on, description) = match sensor.kind {
        crate::config::SensorKind::Contact => {
            let contact = payload.get("contact").and_then(Value::as_bool);
            match contact {
                Some(false) => (true, "opened"),
                Some(true) => (false, "closed"),
                None => {
                    warn!(device, "sensor payload missing 'contact' field; dropped");
                    return None;
                }
            }
        }
        crate::config::SensorKind::Motion => {
            let occupancy = payload.get("occupancy").and_then(Value::as_bool);
            match occupancy {
                Some(true) => (true, "detected"),
                Some(false) => (false, "clear"),
                None => {
                    warn!(device, "sensor payload missing 'occupancy' field; dropped");
                    return None;
                }
            }
        }
    };

    if !sensor_on {
        debug!(device, "sensor report did not qualify as a trip");
        return None;
    }

    Some(PanelEvent::SensorTrip {
        sensor: device.to_string(),
        description,
    })
}

#[derive(Deserialize)]
struct KeypadPayload {
    action: Option<String>,
    action_code: Option<i64>,
}

fn route_keypad(registry: &Registry, device: &str, payload: &Value) -> Option<PanelEvent> {
    if !registry.is_keypad(device) {
        debug!(device, "keypad event from an unconfigured device; dropped");
        return None;
    }
    let payload: KeypadPayload = match serde_json::from_value(payload.clone()) {
        Ok(p) => p,
        Err(source) => {
            warn!(
                error = %PayloadError::NotJson { topic: device.to_string(), source },
                "keypad payload dropped"
            );
            return None;
        }
    };
    let Some(action) = payload.action else {
        warn!(
            error = %PayloadError::MissingField { topic: device.to_string(), field: "action" },
            "keypad payload dropped"
        );
        return None;
    };
    let Some(code) = payload.action_code else {
        warn!(
            error = %PayloadError::MissingField { topic: device.to_string(), field: "action_code" },
            "keypad payload dropped"
        );
        return None;
    };
    let Some(actor) = registry.codes.get(&(code as u32)) else {
        warn!(
            error = %PayloadError::UnknownCode { topic: device.to_string(), code },
            "keypad payload dropped"
        );
        return None;
    };
    let Some(verb) = InternalVerb::parse(&action) else {
        warn!(
            error = %PayloadError::UnknownVerb { topic: device.to_string(), verb: action.clone() },
            "keypad payload dropped"
        );
        return None;
    };
    Some(internal_to_event(verb, actor.clone(), Some(device.to_string())))
}

fn route_keyfob(registry: &Registry, device: &str, payload: &Value) -> Option<PanelEvent> {
    let Some(fob) = registry.keyfob(device) else {
        debug!(device, "keyfob event from an unconfigured device; dropped");
        return None;
    };
    if !fob.enabled {
        warn!(device, "keyfob is disabled; dropped");
        return None;
    }
    let action = payload.get("action").and_then(Value::as_str);
    let Some(action) = action.filter(|a| !a.is_empty()) else {
        debug!(device, "keyfob payload has empty or missing 'action'; dropped");
        return None;
    };
    let Some(verb) = InternalVerb::parse(action) else {
        warn!(device, action, "unknown keyfob action verb; dropped");
        return None;
    };
    let label = verb.allowed_mode_label();
    if !fob.allowed_modes.iter().any(|m| m == label) {
        warn!(device, mode = label, "keyfob mode not in allowed_modes; dropped");
        return None;
    }
    Some(internal_to_event(verb, device.to_string(), None))
}

fn route_button(registry: &Registry, device: &str, payload: &Value) -> Option<PanelEvent> {
    let Some(button) = registry.button(device) else {
        debug!(device, "button event from an unconfigured device; dropped");
        return None;
    };
    if !button.enabled {
        warn!(device, "button is disabled; dropped");
        return None;
    }
    let action = payload.get("action").and_then(Value::as_str).unwrap_or("");
    let gesture = match action {
        "on" | "off" | "single" => "single",
        "double" => "double",
        "" => {
            debug!(device, "button payload has empty 'action'; dropped");
            return None;
        }
        other => {
            warn!(device, action = other, "unrecognized button gesture; dropped");
            return None;
        }
    };
    let outcome = match gesture {
        "single" => &button.actions.single,
        "double" => &button.actions.double,
        _ => unreachable!(),
    };
    let Some(outcome) = outcome else {
        debug!(device, gesture, "gesture has no configured action; dropped");
        return None;
    };
    let Some(verb) = button_outcome_to_internal(outcome) else {
        warn!(device, outcome, "button outcome not in the command table; dropped");
        return None;
    };
    Some(internal_to_event(verb, device.to_string(), None))
}

#[derive(Deserialize)]
struct SetModePayload {
    action: Option<String>,
    code: Option<i64>,
}

/// Route a `<base_topic>/set_mode` payload, the supervisor verb dialect.
pub fn route_set_mode(registry: &Registry, payload: &Value) -> Option<PanelEvent> {
    let payload: SetModePayload = match serde_json::from_value(payload.clone()) {
        Ok(p) => p,
        Err(source) => {
            warn!(
                error = %PayloadError::NotJson { topic: "set_mode".to_string(), source },
                "set_mode payload dropped"
            );
            return None;
        }
    };
    let Some(code) = payload.code else {
        warn!(
            error = %PayloadError::MissingField { topic: "set_mode".to_string(), field: "code" },
            "set_mode payload dropped"
        );
        return None;
    };
    let Some(actor) = registry.codes.get(&(code as u32)) else {
        warn!(
            error = %PayloadError::UnknownCode { topic: "set_mode".to_string(), code },
            "set_mode payload dropped"
        );
        return None;
    };
    let Some(action) = payload.action else {
        warn!(
            error = %PayloadError::MissingField { topic: "set_mode".to_string(), field: "action" },
            "set_mode payload dropped"
        );
        return None;
    };
    let Some(verb) = SupervisorVerb::parse(&action) else {
        warn!(
            error = %PayloadError::UnknownVerb { topic: "set_mode".to_string(), verb: action.clone() },
            "set_mode payload dropped"
        );
        return None;
    };
    Some(internal_to_event(verb.to_internal(), actor.clone(), None))
}

/// `<base_topic>/reload_config` always qualifies; payload body is ignored.
pub fn route_reload() -> PanelEvent {
    PanelEvent::ReloadConfig
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AlwaysTag, ButtonActions, ButtonConfig, KeyfobConfig, KeypadConfig, LoggingConfig,
        ModeTimings, NotifyConfig, PanelTimings, SensorActive, SensorConfig, SensorKind,
        SirenConfig, StateConfig,
    };
    use serde_json::json;
    use std::collections::BTreeMap;

    fn registry() -> Registry {
        let mut codes = BTreeMap::new();
        codes.insert(1234, "alice".to_string());
        Registry {
            codes,
            timings: PanelTimings {
                armed_home: ModeTimings::default(),
                armed_night: ModeTimings::default(),
                armed_away: ModeTimings {
                    exit_delay: 30,
                    entry_delay: 30,
                    alarm_time: 180,
                },
            },
            sensors: vec![
                SensorConfig {
                    name: "front_door".to_string(),
                    kind: SensorKind::Contact,
                    active: SensorActive::Always(AlwaysTag),
                    instant: false,
                    tamper: false,
                },
                SensorConfig {
                    name: "safe".to_string(),
                    kind: SensorKind::Contact,
                    active: SensorActive::Always(AlwaysTag),
                    instant: false,
                    tamper: true,
                },
            ],
            keypads: vec![KeypadConfig {
                name: "keypad1".to_string(),
            }],
            sirens: vec![SirenConfig {
                name: "siren1".to_string(),
            }],
            keyfobs: vec![KeyfobConfig {
                name: "fob1".to_string(),
                enabled: true,
                allowed_modes: vec!["armed_home".to_string()],
            }],
            buttons: vec![ButtonConfig {
                name: "button1".to_string(),
                enabled: true,
                actions: ButtonActions {
                    single: Some("armed_home".to_string()),
                    double: Some("disarmed".to_string()),
                },
            }],
            notify: NotifyConfig::default(),
            logging: LoggingConfig::default(),
            state: StateConfig::default(),
        }
    }

    #[test]
    fn contact_sensor_opened_is_a_trip() {
        let reg = registry();
        let event = route_sensor(&reg, "front_door", &json!({"contact": false})).unwrap();
        assert_eq!(
            event,
            PanelEvent::SensorTrip {
                sensor: "front_door".to_string(),
                description: "opened"
            }
        );
    }

    #[test]
    fn contact_sensor_closed_is_not_a_trip() {
        let reg = registry();
        assert!(route_sensor(&reg, "front_door", &json!({"contact": true})).is_none());
    }

    #[test]
    fn tamper_true_on_monitored_sensor_emits_tamper() {
        let reg = registry();
        let event = route_sensor(&reg, "safe", &json!({"tamper": true, "contact": true})).unwrap();
        assert_eq!(
            event,
            PanelEvent::SensorTamper {
                sensor: "safe".to_string()
            }
        );
    }

    #[test]
    fn tamper_ignored_when_sensor_not_opted_in() {
        let reg = registry();
        let event =
            route_sensor(&reg, "front_door", &json!({"tamper": true, "contact": false})).unwrap();
        assert_eq!(
            event,
            PanelEvent::SensorTrip {
                sensor: "front_door".to_string(),
                description: "opened"
            }
        );
    }

    #[test]
    fn keypad_valid_code_maps_to_arm_event() {
        let reg = registry();
        let event = route_keypad(
            &reg,
            "keypad1",
            &json!({"action": "arm_all_zones", "action_code": 1234}),
        )
        .unwrap();
        assert_eq!(
            event,
            PanelEvent::Arm {
                mode: ArmedMode::Away,
                actor: "alice".to_string(),
                keypad: Some("keypad1".to_string())
            }
        );
    }

    #[test]
    fn keypad_unknown_code_is_dropped() {
        let reg = registry();
        let event = route_keypad(
            &reg,
            "keypad1",
            &json!({"action": "disarm", "action_code": 9999}),
        );
        assert!(event.is_none());
    }

    #[test]
    fn s5_keyfob_with_disallowed_mode_is_dropped() {
        let reg = registry();
        let event = route_keyfob(&reg, "fob1", &json!({"action": "arm_all_zones"}));
        assert!(event.is_none());
    }

    #[test]
    fn keyfob_disarm_not_in_allowed_modes_is_dropped() {
        let reg = registry();
        let event = route_keyfob(&reg, "fob1", &json!({"action": "disarm"}));
        assert!(event.is_none());
    }

    #[test]
    fn keyfob_panic_not_in_allowed_modes_is_dropped() {
        let reg = registry();
        let event = route_keyfob(&reg, "fob1", &json!({"action": "panic"}));
        assert!(event.is_none());
    }

    #[test]
    fn keyfob_disarm_allowed_when_configured() {
        let mut reg = registry();
        reg.keyfobs[0].allowed_modes.push("disarmed".to_string());
        let event = route_keyfob(&reg, "fob1", &json!({"action": "disarm"})).unwrap();
        assert_eq!(
            event,
            PanelEvent::Disarm {
                actor: "fob1".to_string()
            }
        );
    }

    #[test]
    fn keyfob_panic_allowed_when_configured() {
        let mut reg = registry();
        reg.keyfobs[0].allowed_modes.push("panic".to_string());
        let event = route_keyfob(&reg, "fob1", &json!({"action": "panic"})).unwrap();
        assert_eq!(
            event,
            PanelEvent::Panic {
                actor: "fob1".to_string()
            }
        );
    }

    #[test]
    fn keyfob_with_allowed_mode_emits_arm_event() {
        let reg = registry();
        let event = route_keyfob(&reg, "fob1", &json!({"action": "arm_day_zones"})).unwrap();
        assert_eq!(
            event,
            PanelEvent::Arm {
                mode: ArmedMode::Home,
                actor: "fob1".to_string(),
                keypad: None
            }
        );
    }

    #[test]
    fn disabled_keyfob_is_dropped() {
        let mut reg = registry();
        reg.keyfobs[0].enabled = false;
        assert!(route_keyfob(&reg, "fob1", &json!({"action": "arm_day_zones"})).is_none());
    }

    #[test]
    fn button_single_gesture_resolves_through_outcome_table() {
        let reg = registry();
        let event = route_button(&reg, "button1", &json!({"action": "on"})).unwrap();
        assert_eq!(
            event,
            PanelEvent::Arm {
                mode: ArmedMode::Home,
                actor: "button1".to_string(),
                keypad: None
            }
        );
    }

    #[test]
    fn button_unconfigured_gesture_is_dropped() {
        let mut reg = registry();
        reg.buttons[0].actions.double = None;
        assert!(route_button(&reg, "button1", &json!({"action": "double"})).is_none());
    }

    #[test]
    fn set_mode_translates_supervisor_verb() {
        let reg = registry();
        let event = route_set_mode(&reg, &json!({"action": "arm_away", "code": 1234})).unwrap();
        assert_eq!(
            event,
            PanelEvent::Arm {
                mode: ArmedMode::Away,
                actor: "alice".to_string(),
                keypad: None
            }
        );
    }

    #[test]
    fn set_mode_unknown_code_is_dropped() {
        let reg = registry();
        assert!(route_set_mode(&reg, &json!({"action": "disarm", "code": 1})).is_none());
    }
}
