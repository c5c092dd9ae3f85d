//! Core library for Jotpad — an offline, single-user note-taking application.
//!
//! The entry point is [`Jotpad`], which opens the two persisted stores of a
//! data directory: [`NoteStore`] (`notes.json`) and [`SettingsStore`]
//! (`settings.json`). Each store publishes its current value through a
//! `tokio::sync::watch` channel and writes every change back to disk on a
//! background task.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    app::Jotpad,
    config::{default_data_dir, StoreConfig, NOTES_FILE, SETTINGS_FILE},
    draft::NoteDraft,
    error::{JotpadError, Result},
    home::{
        filter_by_title, sort_notes, sort_notes_with, visible_notes, visible_notes_with, HomeView,
        NoteCard,
    },
    note::{Note, NoteId},
    note_store::NoteStore,
    palette::{card_color, color_at, editor_color, next_color_index, Argb, NoteColor, NOTE_COLORS},
    settings::{Settings, SettingsFlag, SortBy, ViewMode},
    settings_store::SettingsStore,
    storage::{decode_or_default, Document, FileStorage},
    store::{Store, StoreFailure},
};
