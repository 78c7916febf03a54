//! Persists `{current_state, previous_state}` as a single-line JSON record
//! and republishes the retained alarm-state topic after every write.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::StateFileError;
use crate::state_machine::AlarmState;

/// On-disk representation of the panel's persisted state.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub current_state: AlarmState,
    pub previous_state: AlarmState,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            current_state: AlarmState::Disarmed,
            previous_state: AlarmState::Disarmed,
        }
    }
}

/// Owns the on-disk state file. There is no concurrent writer — only the
/// dispatch loop calls [`StateStore::save`].
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the persisted state, creating a default `(disarmed, disarmed)`
    /// record if the file is absent. A read or parse failure at startup is
    /// logged and treated the same as absence.
    pub fn load_or_default(&self) -> PersistedState {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(state) => state,
                Err(source) => {
                    error!(
                        path = %self.path.display(),
                        error = %StateFileError::Parse { path: self.path.clone(), source },
                        "defaulting to (disarmed, disarmed)"
                    );
                    PersistedState::default()
                }
            },
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                PersistedState::default()
            }
            Err(source) => {
                error!(
                    path = %self.path.display(),
                    error = %StateFileError::Read { path: self.path.clone(), source },
                    "defaulting to (disarmed, disarmed)"
                );
                PersistedState::default()
            }
        }
    }

    /// Write the state to disk. Best-effort: write failures are logged but
    /// non-fatal, since the next successful transition re-anchors truth.
    pub fn save(&self, state: PersistedState) {
        if let Err(source) = self.try_save(&self.path, state) {
            error!(error = %source, "failed to persist alarm state");
        }
    }

    fn try_save(&self, path: &Path, state: PersistedState) -> Result<(), StateFileError> {
        let json = serde_json::to_string(&state).expect("PersistedState always serializes");
        std::fs::write(path, json).map_err(|source| StateFileError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl From<AlarmState> for PersistedState {
    fn from(current_state: AlarmState) -> Self {
        Self {
            current_state,
            previous_state: current_state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_or_default_creates_disarmed_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join(".state"));
        let state = store.load_or_default();
        assert_eq!(state.current_state, AlarmState::Disarmed);
        assert_eq!(state.previous_state, AlarmState::Disarmed);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".state");
        let store = StateStore::new(path);
        let state = PersistedState {
            current_state: AlarmState::Triggered,
            previous_state: AlarmState::ArmedAway,
        };
        store.save(state);
        let loaded = store.load_or_default();
        assert_eq!(loaded.current_state, AlarmState::Triggered);
        assert_eq!(loaded.previous_state, AlarmState::ArmedAway);
    }

    #[test]
    fn malformed_state_file_defaults_to_disarmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".state");
        std::fs::write(&path, "not json").unwrap();
        let store = StateStore::new(path);
        let state = store.load_or_default();
        assert_eq!(state.current_state, AlarmState::Disarmed);
    }
}
