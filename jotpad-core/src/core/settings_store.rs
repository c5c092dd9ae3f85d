//! The persisted, observable settings record.

use tokio::sync::{broadcast, watch};

use crate::core::storage::FileStorage;
use crate::core::store::{Store, StoreFailure};
use crate::{Result, Settings, SettingsFlag, StoreConfig};

/// The single [`Settings`] record mirrored to `settings.json`.
#[derive(Clone)]
pub struct SettingsStore {
    inner: Store<Settings>,
}

impl SettingsStore {
    /// Opens the settings file named by `config`. A missing or corrupt file
    /// yields [`Settings::default`].
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let storage = FileStorage::new(config.settings_path());
        let inner = Store::open("settings", storage, config.watch_external_changes).await?;
        Ok(Self { inner })
    }

    pub fn get(&self) -> Settings {
        self.inner.get()
    }

    /// Replaces the record with `transform(current)` and persists it.
    pub fn update_settings<F>(&self, transform: F) -> Result<()>
    where
        F: FnOnce(Settings) -> Settings + Send + 'static,
    {
        self.inner.mutate(move |settings| {
            *settings = transform(settings.clone());
        })
    }

    /// Switches between list and grid layout.
    pub fn toggle_view_mode(&self) -> Result<()> {
        self.update_settings(|s| {
            let mode = s.view_mode.toggled();
            s.with_view_mode(mode)
        })
    }

    /// Advances to the next sort order.
    pub fn cycle_sort_order(&self) -> Result<()> {
        self.update_settings(|s| {
            let order = s.sort_by.next();
            s.with_sort_by(order)
        })
    }

    pub fn set_flag(&self, flag: SettingsFlag, value: bool) -> Result<()> {
        self.update_settings(move |s| s.with_flag(flag, value))
    }

    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.inner.subscribe()
    }

    pub fn failures(&self) -> broadcast::Receiver<StoreFailure> {
        self.inner.failures()
    }

    pub fn reload(&self) -> Result<()> {
        self.inner.reload()
    }

    pub async fn flush(&self) -> Result<()> {
        self.inner.flush().await
    }
}
