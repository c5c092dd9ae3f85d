//! Internal domain modules for the Jotpad core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod app;
pub mod config;
pub mod draft;
pub mod error;
pub mod home;
pub mod note;
pub mod note_store;
pub mod palette;
pub mod settings;
pub mod settings_store;
pub mod storage;
pub mod store;
pub mod watcher;

#[doc(inline)]
pub use app::Jotpad;
#[doc(inline)]
pub use config::{default_data_dir, StoreConfig};
#[doc(inline)]
pub use draft::NoteDraft;
#[doc(inline)]
pub use error::{JotpadError, Result};
#[doc(inline)]
pub use home::{filter_by_title, sort_notes, visible_notes, HomeView, NoteCard};
#[doc(inline)]
pub use note::{Note, NoteId};
#[doc(inline)]
pub use note_store::NoteStore;
#[doc(inline)]
pub use settings::{Settings, SettingsFlag, SortBy, ViewMode};
#[doc(inline)]
pub use settings_store::SettingsStore;
#[doc(inline)]
pub use store::{Store, StoreFailure};
