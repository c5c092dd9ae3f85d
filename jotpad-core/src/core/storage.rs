//! Whole-file JSON persistence for a single value.
//!
//! Reads fail closed: a missing, unreadable or malformed file yields the
//! value's default. Writes go to a temporary file in the same directory which
//! is then renamed over the target, so readers never see a half-written file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::Result;

/// A value that can live in a store: a complete JSON document with a default.
pub trait Document:
    Serialize + DeserializeOwned + Default + Clone + PartialEq + Send + Sync + 'static
{
}

impl<T> Document for T where
    T: Serialize + DeserializeOwned + Default + Clone + PartialEq + Send + Sync + 'static
{
}

/// Decodes `bytes`, substituting the default on any parse failure.
pub fn decode_or_default<T: Document>(bytes: &[u8]) -> T {
    match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(e) => {
            warn!("discarding unreadable document: {e}");
            T::default()
        }
    }
}

/// One JSON file holding one document.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, falling back to the default when the file is
    /// missing, unreadable or not valid JSON for `T`.
    pub fn load<T: Document>(&self) -> T {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, using defaults", self.path.display());
                return T::default();
            }
            Err(e) => {
                warn!("could not read {}: {e}; using defaults", self.path.display());
                return T::default();
            }
        };
        debug!("loaded {} bytes from {}", bytes.len(), self.path.display());
        decode_or_default(&bytes)
    }

    /// Serializes `value` and atomically replaces the file, creating parent
    /// directories as needed.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_vec_pretty(value)?;
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!("wrote {} bytes to {}", json.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Note, Settings, SortBy};
    use tempfile::TempDir;

    fn sample_notes(n: i64) -> Vec<Note> {
        (0..n)
            .map(|i| {
                Note::with_id(1000 + i, 2000 + i)
                    .with_title(format!("Note {i}"))
                    .with_content(format!("<b>body {i}</b>"))
                    .with_favourite(i % 2 == 0)
                    .with_color_index((i % 9) as i32)
            })
            .collect()
    }

    #[test]
    fn test_notes_survive_save_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("notes.json"));

        for n in [0, 1, 5] {
            let notes = sample_notes(n);
            storage.save(&notes).unwrap();
            let loaded: Vec<Note> = storage.load();
            assert_eq!(loaded, notes);
        }
    }

    #[test]
    fn test_missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.json"));

        let notes: Vec<Note> = storage.load();
        let settings: Settings = storage.load();
        assert!(notes.is_empty());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_fails_closed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, b"[{\"id\": 1, \"title\": ").unwrap();

        let notes: Vec<Note> = FileStorage::new(&path).load();
        assert!(notes.is_empty());
    }

    #[test]
    fn test_wrong_shape_fails_closed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, b"[1, 2, 3]").unwrap();

        let settings: Settings = FileStorage::new(&path).load();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_decode_or_default_on_garbage() {
        let notes: Vec<Note> = decode_or_default(&[0xff, 0xfe, 0x00, 0x7b]);
        assert!(notes.is_empty());
        let settings: Settings = decode_or_default(br#"{"sortBy":"RANDOM"}"#);
        assert_eq!(settings.sort_by, SortBy::Random);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("settings.json");
        let storage = FileStorage::new(&path);

        storage.save(&Settings::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("notes.json"));
        storage.save(&sample_notes(3)).unwrap();
        storage.save(&sample_notes(2)).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_settings_file_uses_symbolic_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        FileStorage::new(&path)
            .save(&Settings::default().with_sort_by(SortBy::DateAsc))
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"sortBy\": \"DATEASC\""));
    }
}
