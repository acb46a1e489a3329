//! Persisted session state.
//!
//! The dashboard remembers the last selected application id across restarts
//! (the browser original kept this in local storage under `selectedAppID`).
//! Stored as TOML under the user data dir.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// State that outlives a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    /// Application id to re-select on startup
    pub selected_app_id: Option<String>,
}

impl SessionState {
    /// Session file path, respecting XDG_DATA_HOME.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME")
            && !xdg_data.is_empty()
        {
            return Some(PathBuf::from(xdg_data).join("sparkmon/session.toml"));
        }

        dirs::data_dir().map(|dir| dir.join("sparkmon/session.toml"))
    }

    /// Load session state from `path`. Missing or corrupt files are treated
    /// as empty state; corruption is logged, not surfaced.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };

        match toml::from_str(&contents) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt session file");
                Self::default()
            }
        }
    }

    /// Write session state to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load from the default location, or empty state if none exists.
    #[must_use]
    pub fn load() -> Self {
        Self::default_path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Persist to the default location. Failures are logged; losing the
    /// remembered selection is not worth interrupting the UI for.
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            return;
        };
        if let Err(e) = self.save_to(&path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to save session state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sparkmon-test-{name}-{}", std::process::id()))
    }

    #[test]
    fn test_round_trip() {
        let path = temp_session_path("roundtrip").join("session.toml");
        let state = SessionState {
            selected_app_id: Some("app-001".to_string()),
        };
        state.save_to(&path).unwrap();

        let loaded = SessionState::load_from(&path);
        assert_eq!(loaded, state);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_missing_file_is_empty_state() {
        let path = temp_session_path("missing").join("session.toml");
        let loaded = SessionState::load_from(&path);
        assert_eq!(loaded, SessionState::default());
    }

    #[test]
    fn test_corrupt_file_is_empty_state() {
        let dir = temp_session_path("corrupt");
        let path = dir.join("session.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "selected_app_id = [not toml").unwrap();

        let loaded = SessionState::load_from(&path);
        assert_eq!(loaded, SessionState::default());

        std::fs::remove_dir_all(&dir).ok();
    }
}
