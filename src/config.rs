//! Loads the declarative YAML configuration into a [`Registry`] snapshot,
//! validating required sections and filling in the documented defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

fn default_mqtt_port() -> u16 {
    1883
}

fn default_qos() -> u8 {
    1
}

fn default_base_topic() -> String {
    "securitt".to_string()
}

fn default_sensor_instant() -> bool {
    false
}

fn default_sensor_tamper() -> bool {
    false
}

fn default_ha_discovery() -> bool {
    false
}

fn default_state_path() -> PathBuf {
    PathBuf::from("/var/lib/alarm-panel/state.json")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("/var/log/alarm-panel")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_retain_days() -> u32 {
    7
}

/// `mqtt` section: bus connection parameters. Stable for process lifetime;
/// never replaced by [`Registry::reload`].
#[derive(Clone, Debug, Deserialize)]
pub struct MqttConfig {
    pub host: String,
    #[serde(default = "default_mqtt_port")]
    pub port: u16,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_qos")]
    pub qos: u8,
    #[serde(default = "default_base_topic")]
    pub base_topic: String,
    pub gateway_topic: String,
    #[serde(default = "default_ha_discovery")]
    pub ha_discovery: bool,
}

/// Per-armed-mode timing triple. Zero means bypass the delay.
#[derive(Clone, Copy, Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ModeTimings {
    pub exit_delay: u64,
    pub entry_delay: u64,
    pub alarm_time: u64,
}

/// `panel.<mode>` timings for every armed mode, keyed by [`crate::state_machine::ArmedMode`].
#[derive(Clone, Debug, Default)]
pub struct PanelTimings {
    pub armed_home: ModeTimings,
    pub armed_night: ModeTimings,
    pub armed_away: ModeTimings,
}

impl PanelTimings {
    pub fn for_mode(&self, mode: crate::state_machine::ArmedMode) -> ModeTimings {
        use crate::state_machine::ArmedMode::*;
        match mode {
            Home => self.armed_home,
            Night => self.armed_night,
            Away => self.armed_away,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct RawPanel {
    codes: BTreeMap<u32, String>,
    armed_home: Option<ModeTimings>,
    armed_night: Option<ModeTimings>,
    armed_away: Option<ModeTimings>,
}

/// `sensors[]` entry.
#[derive(Clone, Debug, Deserialize)]
pub struct SensorConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SensorKind,
    pub active: SensorActive,
    #[serde(default = "default_sensor_instant")]
    pub instant: bool,
    #[serde(default = "default_sensor_tamper")]
    pub tamper: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Contact,
    Motion,
}

/// A sensor's `active` attribute: either `always`, or an explicit list of
/// armed-mode names the sensor participates in.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SensorActive {
    Always(AlwaysTag),
    Modes(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlwaysTag;

impl<'de> Deserialize<'de> for AlwaysTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == "always" {
            Ok(AlwaysTag)
        } else {
            Err(serde::de::Error::custom("expected \"always\""))
        }
    }
}

impl SensorActive {
    pub fn includes(&self, mode: crate::state_machine::ArmedMode) -> bool {
        match self {
            SensorActive::Always(_) => true,
            SensorActive::Modes(modes) => modes.iter().any(|m| m == mode.as_str()),
        }
    }
}

/// `keypads[]` entry. Identity-only.
#[derive(Clone, Debug, Deserialize)]
pub struct KeypadConfig {
    pub name: String,
}

/// `sirens[]` entry. Identity-only.
#[derive(Clone, Debug, Deserialize)]
pub struct SirenConfig {
    pub name: String,
}

/// `keyfobs[]` entry.
#[derive(Clone, Debug, Deserialize)]
pub struct KeyfobConfig {
    pub name: String,
    pub enabled: bool,
    pub allowed_modes: Vec<String>,
}

/// `buttons[]` entry.
#[derive(Clone, Debug, Deserialize)]
pub struct ButtonConfig {
    pub name: String,
    pub enabled: bool,
    pub actions: ButtonActions,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ButtonActions {
    pub single: Option<String>,
    pub double: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct NotifyConfig {
    #[serde(default)]
    pub gotify_key: Option<String>,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_retain_days")]
    pub retain_days: u32,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            retain_days: default_retain_days(),
            log_dir: default_log_dir(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

impl StateConfig {
    fn with_default_path() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    mqtt: MqttConfig,
    panel: RawPanel,
    sensors: Vec<SensorConfig>,
    keypads: Vec<KeypadConfig>,
    sirens: Vec<SirenConfig>,
    #[serde(default)]
    keyfobs: Vec<KeyfobConfig>,
    #[serde(default)]
    buttons: Vec<ButtonConfig>,
    #[serde(default)]
    notify: Option<NotifyConfig>,
    #[serde(default)]
    logging: Option<LoggingConfig>,
    #[serde(default)]
    state: Option<StateConfig>,
}

/// The device inventory, codes, and panel timings — reloadable, never
/// carrying the bus connection parameters (those stay fixed for the
/// life of the process).
#[derive(Clone, Debug)]
pub struct Registry {
    pub codes: BTreeMap<u32, String>,
    pub timings: PanelTimings,
    pub sensors: Vec<SensorConfig>,
    pub keypads: Vec<KeypadConfig>,
    pub sirens: Vec<SirenConfig>,
    pub keyfobs: Vec<KeyfobConfig>,
    pub buttons: Vec<ButtonConfig>,
    pub notify: NotifyConfig,
    pub logging: LoggingConfig,
    pub state: StateConfig,
}

impl Registry {
    pub fn sensor(&self, name: &str) -> Option<&SensorConfig> {
        self.sensors.iter().find(|s| s.name == name)
    }

    pub fn keyfob(&self, name: &str) -> Option<&KeyfobConfig> {
        self.keyfobs.iter().find(|f| f.name == name)
    }

    pub fn button(&self, name: &str) -> Option<&ButtonConfig> {
        self.buttons.iter().find(|b| b.name == name)
    }

    pub fn is_keypad(&self, name: &str) -> bool {
        self.keypads.iter().any(|k| k.name == name)
    }
}

/// Bus connection parameters, held separately because they are never
/// replaced on reload.
#[derive(Clone, Debug)]
pub struct BusConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub qos: u8,
    pub base_topic: String,
    pub gateway_topic: String,
    pub ha_discovery: bool,
}

/// Loaded configuration: the stable bus parameters plus the reloadable
/// registry.
#[derive(Debug)]
pub struct Config {
    pub bus: BusConfig,
    pub registry: Registry,
}

fn parse_raw(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound(path.to_path_buf())
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn build_timings(raw: &RawPanel) -> PanelTimings {
    PanelTimings {
        armed_home: raw.armed_home.unwrap_or_default(),
        armed_night: raw.armed_night.unwrap_or_default(),
        armed_away: raw.armed_away.unwrap_or_default(),
    }
}

fn build_registry(raw: RawConfig) -> Registry {
    let timings = build_timings(&raw.panel);
    Registry {
        codes: raw.panel.codes,
        timings,
        sensors: raw.sensors,
        keypads: raw.keypads,
        sirens: raw.sirens,
        keyfobs: raw.keyfobs,
        buttons: raw.buttons,
        notify: raw.notify.unwrap_or_default(),
        logging: raw.logging.unwrap_or_default(),
        state: raw.state.unwrap_or_else(StateConfig::with_default_path),
    }
}

/// Load the full configuration, including bus parameters. Used once at
/// startup; fails with [`ConfigError`] on missing required keys or
/// malformed types, which the caller treats as fatal.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let raw = parse_raw(path)?;
    let bus = BusConfig {
        host: raw.mqtt.host.clone(),
        port: raw.mqtt.port,
        user: raw.mqtt.user.clone(),
        password: raw.mqtt.password.clone(),
        qos: raw.mqtt.qos,
        base_topic: raw.mqtt.base_topic.clone(),
        gateway_topic: raw.mqtt.gateway_topic.clone(),
        ha_discovery: raw.mqtt.ha_discovery,
    };
    let registry = build_registry(raw);
    Ok(Config { bus, registry })
}

/// Reload just the device inventory, codes, and panel timings. Bus
/// parameters are intentionally not re-read; the caller already holds
/// them for the process lifetime.
pub fn reload(path: &Path) -> Result<Registry, ConfigError> {
    let raw = parse_raw(path)?;
    Ok(build_registry(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const MINIMAL: &str = r#"
mqtt:
  host: 127.0.0.1
  gateway_topic: zigbee2mqtt
panel:
  codes:
    1234: alice
  armed_away:
    exit_delay: 30
    entry_delay: 30
    alarm_time: 180
sensors:
  - name: front_door
    type: contact
    active: always
keypads:
  - name: keypad1
sirens:
  - name: siren1
"#;

    #[test]
    fn loads_minimal_config_with_defaults() {
        let file = write_config(MINIMAL);
        let config = load(file.path()).unwrap();
        assert_eq!(config.bus.port, 1883);
        assert_eq!(config.bus.qos, 1);
        assert_eq!(config.bus.base_topic, "securitt");
        assert!(!config.bus.ha_discovery);
        assert_eq!(config.registry.codes[&1234], "alice");
        assert_eq!(config.registry.timings.armed_away.exit_delay, 30);
        assert_eq!(config.registry.timings.armed_home.exit_delay, 0);
        let sensor = config.registry.sensor("front_door").unwrap();
        assert!(!sensor.instant);
        assert!(!sensor.tamper);
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = load(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn malformed_yaml_is_config_error() {
        let file = write_config("mqtt: [this is not a mapping");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn reload_does_not_touch_bus_config() {
        let file = write_config(MINIMAL);
        let initial = load(file.path()).unwrap();
        let reloaded = reload(file.path()).unwrap();
        assert_eq!(reloaded.codes, initial.registry.codes);
    }

    #[test]
    fn sensor_active_modes_list_is_exclusive() {
        let home_only = SensorActive::Modes(vec!["armed_home".to_string()]);
        assert!(home_only.includes(crate::state_machine::ArmedMode::Home));
        assert!(!home_only.includes(crate::state_machine::ArmedMode::Away));
    }

    #[test]
    fn sensor_active_always_matches_every_mode() {
        let always = SensorActive::Always(AlwaysTag);
        assert!(always.includes(crate::state_machine::ArmedMode::Home));
        assert!(always.includes(crate::state_machine::ArmedMode::Away));
    }
}
