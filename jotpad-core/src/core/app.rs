//! The pair of stores a front-end works against.

use log::info;

use crate::core::home::HomeView;
use crate::{NoteStore, Result, SettingsStore, StoreConfig};

/// Both stores of one data directory, opened together and handed to every
/// screen that needs them.
#[derive(Clone)]
pub struct Jotpad {
    pub notes: NoteStore,
    pub settings: SettingsStore,
}

impl Jotpad {
    /// Opens `notes.json` and `settings.json` under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Fails only if an external-change watch cannot be installed; unreadable
    /// files open as defaults.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let notes = NoteStore::open(config).await?;
        let settings = SettingsStore::open(config).await?;
        info!(
            "opened {} notes from {}",
            notes.len(),
            config.data_dir().display()
        );
        Ok(Self { notes, settings })
    }

    /// Current home screen for `query`.
    pub fn home_view(&self, query: &str) -> HomeView {
        let settings = self.settings.get();
        HomeView::project(&self.notes.list(), &settings, query)
    }

    /// Waits for both stores to finish queued writes. Reports the notes
    /// failure first when both failed.
    pub async fn flush(&self) -> Result<()> {
        let notes = self.notes.flush().await;
        let settings = self.settings.flush().await;
        notes.and(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Note, SortBy};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_home_view_reflects_both_stores() {
        let dir = TempDir::new().unwrap();
        let app = Jotpad::open(&StoreConfig::in_dir(dir.path()).with_watch(false))
            .await
            .unwrap();

        app.notes.add(Note::with_id(1, 3).with_title("older?")).unwrap();
        app.notes.add(Note::with_id(2, 9).with_title("newer")).unwrap();
        app.settings.update_settings(|s| s.with_sort_by(SortBy::DateDes)).unwrap();
        app.flush().await.unwrap();

        let view = app.home_view("");
        assert_eq!(view.cards.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(view.sort_by, SortBy::DateDes);
    }

    #[tokio::test]
    async fn test_stores_use_separate_files() {
        let dir = TempDir::new().unwrap();
        let app = Jotpad::open(&StoreConfig::in_dir(dir.path()).with_watch(false))
            .await
            .unwrap();
        app.notes.add(Note::with_id(1, 1).with_title("n")).unwrap();
        app.settings.toggle_view_mode().unwrap();
        app.flush().await.unwrap();

        assert!(dir.path().join("notes.json").exists());
        assert!(dir.path().join("settings.json").exists());
    }
}
