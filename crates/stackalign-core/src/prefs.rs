//! Persisted UI preferences.
//!
//! A handful of flags that survive restarts: the rotation step used by the
//! property panel's angle buttons and two sidebar-collapse flags. Stored as
//! JSON in the platform config directory. Deliberately tiny; layer state is
//! never persisted here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default rotation increment in degrees.
pub const DEFAULT_ANGLE_STEP: f64 = 1.0;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("failed to write {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("preference serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Rotation step in degrees for the angle nudge buttons.
    pub angle_step: f64,
    pub layers_panel_collapsed: bool,
    pub inspector_collapsed: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            angle_step: DEFAULT_ANGLE_STEP,
            layers_panel_collapsed: false,
            inspector_collapsed: false,
        }
    }
}

impl Preferences {
    /// Location of the preferences file.
    ///
    /// On Unix: `~/.config/stackalign/preferences.json`
    /// On Windows: `%APPDATA%\stackalign\preferences.json`
    pub fn default_path() -> Result<PathBuf, PrefsError> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or(PrefsError::NoConfigDir)?;
        Ok(base.join("stackalign").join("preferences.json"))
    }

    /// Load from the default location. Missing or unreadable preferences
    /// are not an error; defaults are used.
    pub fn load() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    /// Load from a specific path, falling back to defaults on a missing or
    /// corrupt file.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                log::warn!("corrupt preferences at {}: {err}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), PrefsError> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PrefsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| PrefsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| PrefsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
