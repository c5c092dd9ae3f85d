//! Where the stores keep their files.

use std::path::{Path, PathBuf};

/// File name of the notes collection inside the data directory.
pub const NOTES_FILE: &str = "notes.json";

/// File name of the settings record inside the data directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Locations and options for opening the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding both JSON files. Created on first write.
    pub data_dir: PathBuf,
    pub notes_file: String,
    pub settings_file: String,
    /// Reload and republish when another process rewrites a file.
    pub watch_external_changes: bool,
}

impl StoreConfig {
    /// Config rooted at `data_dir` with the standard file names.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            notes_file: NOTES_FILE.to_string(),
            settings_file: SETTINGS_FILE.to_string(),
            watch_external_changes: true,
        }
    }

    pub fn with_watch(self, watch_external_changes: bool) -> Self {
        Self { watch_external_changes, ..self }
    }

    pub fn notes_path(&self) -> PathBuf {
        self.data_dir.join(&self.notes_file)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(&self.settings_file)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_dir(default_data_dir())
    }
}

/// Returns the default data directory.
///
/// - macOS / Linux: `~/.config/jotpad`
/// - Windows: `%APPDATA%/Jotpad`
pub fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("Jotpad")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("jotpad")
    }
}
