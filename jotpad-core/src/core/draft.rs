//! Editing buffer for the note screen.

use crate::core::palette::next_color_index;
use crate::{JotpadError, Note, NoteId, NoteStore, Result};

/// A note being edited.
///
/// Edits are written through to the store only while the title is non-blank.
/// The first such write of a brand-new note adds it; every later one replaces
/// it. A draft whose title never becomes non-blank leaves no trace.
pub struct NoteDraft {
    store: NoteStore,
    note: Note,
    persisted: bool,
}

impl NoteDraft {
    /// Starts a fresh, unsaved note.
    pub fn create(store: &NoteStore) -> Self {
        Self::from_note(store, Note::new())
    }

    /// Starts a draft from an explicit unsaved note.
    pub fn from_note(store: &NoteStore, note: Note) -> Self {
        Self {
            store: store.clone(),
            note,
            persisted: false,
        }
    }

    /// Opens an existing note for editing.
    ///
    /// # Errors
    ///
    /// Returns [`JotpadError::NoteNotFound`] if no note has `id`.
    pub fn open(store: &NoteStore, id: NoteId) -> Result<Self> {
        let note = store.find_by_id(id).ok_or(JotpadError::NoteNotFound(id))?;
        Ok(Self {
            store: store.clone(),
            note,
            persisted: true,
        })
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.note.title = title.into();
        self.write_through()
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> Result<()> {
        self.note.content = content.into();
        self.write_through()
    }

    /// Moves to the next palette color.
    pub fn cycle_color(&mut self) -> Result<()> {
        self.note.color_index = next_color_index(self.note.color_index);
        if self.persisted {
            self.store.update(self.note.clone())?;
        }
        Ok(())
    }

    /// Deletes the note and ends the edit.
    pub fn delete(self) -> Result<()> {
        self.store.remove(self.note.id)
    }

    fn write_through(&mut self) -> Result<()> {
        if !self.note.has_title() {
            return Ok(());
        }
        if self.persisted {
            self.store.update(self.note.clone())
        } else {
            self.store.add(self.note.clone())?;
            self.persisted = true;
            Ok(())
        }
    }
}
