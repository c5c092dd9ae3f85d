//! Notification of external rewrites of a store file.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::{JotpadError, Result};

/// Keeps a filesystem watch alive for as long as it is held.
///
/// The parent directory is watched rather than the file itself because saves
/// replace the file by rename, which would orphan a watch on the old inode.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Calls `on_change` (on the watcher's own thread) whenever the file at
    /// `path` is created, modified, renamed into place or removed.
    pub fn watch<F>(path: &Path, on_change: F) -> Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let file_name: OsString = path
            .file_name()
            .ok_or_else(|| {
                JotpadError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{} has no file name", path.display()),
                ))
            })?
            .to_os_string();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };
        fs::create_dir_all(&dir)?;

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(e) => e,
                Err(e) => {
                    warn!("file watch error: {e}");
                    return;
                }
            };
            if !matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) {
                return;
            }
            let touches_target = event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(file_name.as_os_str()));
            if touches_target {
                on_change();
            }
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        debug!("watching {} for external changes", path.display());

        Ok(Self { _watcher: watcher })
    }
}
