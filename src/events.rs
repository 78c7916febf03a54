//! Typed events flowing through the dispatch loop, and the three verb
//! dialects (internal, gateway/keypad, supervisor) the router translates
//! between. Modeled as tagged unions rather than raw strings reaching the
//! state machine.

use std::fmt;

/// One of the three armed modes. `disarmed`, `arming`, `pending`, and
/// `triggered` are not "modes" in this sense — they are [`AlarmState`]
/// variants without an associated timing row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArmedMode {
    Home,
    Night,
    Away,
}

impl ArmedMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ArmedMode::Home => "armed_home",
            ArmedMode::Night => "armed_night",
            ArmedMode::Away => "armed_away",
        }
    }
}

impl fmt::Display for ArmedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The name or PIN-resolved identity attributed to a transition, for audit
/// logging.
pub type Actor = String;

/// Which device class originated a router-dispatched event, carried
/// through to the state machine only for logging — the state machine
/// itself only distinguishes events by the [`PanelEvent`] variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    Keypad(String),
    Keyfob(String),
    Button(String),
    Supervisor,
}

/// Typed input to the state machine. Synthetic timer-completion events
/// (`ArmComplete`, `EntryExpired`, `SirenExpired`) are enqueued by the
/// timer manager onto the same ingress queue as device-sourced events, so
/// both are processed strictly FIFO.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelEvent {
    Arm {
        mode: ArmedMode,
        actor: Actor,
        /// The keypad that issued the command, if any — needed to target
        /// the `arming_away` LED update during the exit delay.
        keypad: Option<String>,
    },
    Disarm {
        actor: Actor,
    },
    Panic {
        actor: Actor,
    },
    SensorTrip {
        sensor: String,
        description: &'static str,
    },
    SensorTamper {
        sensor: String,
    },
    ArmComplete {
        mode: ArmedMode,
        actor: Actor,
    },
    EntryExpired {
        sensor: String,
    },
    SirenExpired,
    ReloadConfig,
}

/// Internal verb dialect used by keypads and the state machine's transition
/// table (`disarm`, `arm_day_zones`, `arm_night_zones`, `arm_all_zones`,
/// `panic`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InternalVerb {
    Disarm,
    ArmDayZones,
    ArmNightZones,
    ArmAllZones,
    Panic,
}

impl InternalVerb {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "disarm" => Some(InternalVerb::Disarm),
            "arm_day_zones" => Some(InternalVerb::ArmDayZones),
            "arm_night_zones" => Some(InternalVerb::ArmNightZones),
            "arm_all_zones" => Some(InternalVerb::ArmAllZones),
            "panic" => Some(InternalVerb::Panic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InternalVerb::Disarm => "disarm",
            InternalVerb::ArmDayZones => "arm_day_zones",
            InternalVerb::ArmNightZones => "arm_night_zones",
            InternalVerb::ArmAllZones => "arm_all_zones",
            InternalVerb::Panic => "panic",
        }
    }

    /// The armed mode this verb arms, if it arms one at all.
    pub fn target_mode(self) -> Option<ArmedMode> {
        match self {
            InternalVerb::ArmDayZones => Some(ArmedMode::Home),
            InternalVerb::ArmNightZones => Some(ArmedMode::Night),
            InternalVerb::ArmAllZones => Some(ArmedMode::Away),
            InternalVerb::Disarm | InternalVerb::Panic => None,
        }
    }

    /// The label this verb is matched against in a keyfob's
    /// `allowed_modes`, covering every verb (not just the ones that arm a
    /// mode) since `allowed_modes` also gates `disarm` and `panic`.
    pub fn allowed_mode_label(self) -> &'static str {
        match self {
            InternalVerb::Disarm => "disarmed",
            InternalVerb::ArmDayZones => ArmedMode::Home.as_str(),
            InternalVerb::ArmNightZones => ArmedMode::Night.as_str(),
            InternalVerb::ArmAllZones => ArmedMode::Away.as_str(),
            InternalVerb::Panic => "panic",
        }
    }
}

/// External supervisor verb dialect (`set_mode` payload's `action` field),
/// translated to [`InternalVerb`] at the router boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupervisorVerb {
    Disarm,
    ArmHome,
    ArmNight,
    ArmAway,
    Panic,
}

impl SupervisorVerb {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "disarm" => Some(SupervisorVerb::Disarm),
            "arm_home" => Some(SupervisorVerb::ArmHome),
            "arm_night" => Some(SupervisorVerb::ArmNight),
            "arm_away" => Some(SupervisorVerb::ArmAway),
            "panic" => Some(SupervisorVerb::Panic),
            _ => None,
        }
    }

    pub fn to_internal(self) -> InternalVerb {
        match self {
            SupervisorVerb::Disarm => InternalVerb::Disarm,
            SupervisorVerb::ArmHome => InternalVerb::ArmDayZones,
            SupervisorVerb::ArmNight => InternalVerb::ArmNightZones,
            SupervisorVerb::ArmAway => InternalVerb::ArmAllZones,
            SupervisorVerb::Panic => InternalVerb::Panic,
        }
    }
}

/// Button-gesture outcome label (`armed_home`, `armed_night`, `armed_away`,
/// `disarmed`, `panic`), translated through the button-command table into
/// an [`InternalVerb`].
pub fn button_outcome_to_internal(outcome: &str) -> Option<InternalVerb> {
    match outcome {
        "disarmed" => Some(InternalVerb::Disarm),
        "armed_home" => Some(InternalVerb::ArmDayZones),
        "armed_night" => Some(InternalVerb::ArmNightZones),
        "armed_away" => Some(InternalVerb::ArmAllZones),
        "panic" => Some(InternalVerb::Panic),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_verb_round_trips_through_str() {
        for verb in [
            InternalVerb::Disarm,
            InternalVerb::ArmDayZones,
            InternalVerb::ArmNightZones,
            InternalVerb::ArmAllZones,
            InternalVerb::Panic,
        ] {
            assert_eq!(InternalVerb::parse(verb.as_str()), Some(verb));
        }
    }

    #[test]
    fn supervisor_verb_maps_to_expected_internal() {
        assert_eq!(
            SupervisorVerb::ArmAway.to_internal(),
            InternalVerb::ArmAllZones
        );
        assert_eq!(SupervisorVerb::Disarm.to_internal(), InternalVerb::Disarm);
    }

    #[test]
    fn button_outcome_maps_through_command_table() {
        assert_eq!(
            button_outcome_to_internal("armed_away"),
            Some(InternalVerb::ArmAllZones)
        );
        assert_eq!(button_outcome_to_internal("unknown"), None);
    }

    #[test]
    fn unknown_verbs_are_rejected() {
        assert_eq!(InternalVerb::parse("frobnicate"), None);
        assert_eq!(SupervisorVerb::parse("frobnicate"), None);
    }
}
