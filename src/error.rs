use std::path::PathBuf;

use thiserror::Error;

/// Malformed or missing configuration. Fatal on initial load, logged and
/// ignored (prior registry kept) on reload.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("malformed value for field '{field}': {reason}")]
    Malformed {
        field: &'static str,
        reason: String,
    },
}

/// MQTT broker connection or subscription failure.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("failed to connect to MQTT broker at {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: rumqttc::v5::ConnectionError,
    },

    #[error("failed to subscribe to topic '{topic}': {source}")]
    Subscribe {
        topic: String,
        #[source]
        source: rumqttc::v5::ClientError,
    },

    #[error("failed to publish to topic '{topic}': {source}")]
    Publish {
        topic: String,
        #[source]
        source: rumqttc::v5::ClientError,
    },
}

/// Failure to read or write the persisted alarm state file.
#[derive(Debug, Error)]
pub enum StateFileError {
    #[error("failed to read state file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file {path} contains invalid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write state file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A malformed, non-JSON, or otherwise unusable incoming bus payload.
/// Always logged at warning level and the triggering message dropped.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload on topic '{topic}' is not valid JSON: {source}")]
    NotJson {
        topic: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("payload on topic '{topic}' is missing field '{field}'")]
    MissingField { topic: String, field: &'static str },

    #[error("payload on topic '{topic}' used unknown verb '{verb}'")]
    UnknownVerb { topic: String, verb: String },

    #[error("code '{code}' on topic '{topic}' is not in the code table")]
    UnknownCode { topic: String, code: i64 },
}
