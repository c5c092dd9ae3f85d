//! The persisted, observable collection of notes.

use tokio::sync::{broadcast, watch};

use crate::core::palette::next_color_index;
use crate::core::storage::FileStorage;
use crate::core::store::{Store, StoreFailure};
use crate::{Note, NoteId, Result, StoreConfig};

/// Ordered collection of [`Note`]s mirrored to `notes.json`.
///
/// Mutations are queued and return immediately; the collection visible through
/// [`list`](Self::list) and [`subscribe`](Self::subscribe) changes once the
/// write has reached disk. Use [`flush`](Self::flush) to wait for that.
#[derive(Clone)]
pub struct NoteStore {
    inner: Store<Vec<Note>>,
}

impl NoteStore {
    /// Opens the notes file named by `config`. A missing or corrupt file
    /// yields an empty collection.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let storage = FileStorage::new(config.notes_path());
        let inner = Store::open("notes", storage, config.watch_external_changes).await?;
        Ok(Self { inner })
    }

    /// Current snapshot, in stored order.
    pub fn list(&self) -> Vec<Note> {
        self.inner.get()
    }

    pub fn len(&self) -> usize {
        self.inner.read(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read(Vec::is_empty)
    }

    /// First note with `id`, if any.
    pub fn find_by_id(&self, id: NoteId) -> Option<Note> {
        self.inner.read(|notes| find(notes, id).cloned())
    }

    /// Appends `note`. Ids are not checked for uniqueness.
    pub fn add(&self, note: Note) -> Result<()> {
        self.inner.mutate(move |notes| notes.push(note))
    }

    /// Replaces the note sharing `note.id`; does nothing if there is none.
    pub fn update(&self, note: Note) -> Result<()> {
        self.inner.mutate(move |notes| replace(notes, note))
    }

    /// Removes the note with `id`; does nothing if there is none.
    pub fn remove(&self, id: NoteId) -> Result<()> {
        self.inner.mutate(move |notes| notes.retain(|n| n.id != id))
    }

    /// Flips the favourite flag of note `id`.
    pub fn toggle_favourite(&self, id: NoteId) -> Result<()> {
        self.inner.mutate(move |notes| {
            if let Some(note) = notes.iter_mut().find(|n| n.id == id) {
                note.is_favourite = !note.is_favourite;
            }
        })
    }

    /// Moves note `id` to the next palette color.
    pub fn cycle_color(&self, id: NoteId) -> Result<()> {
        self.inner.mutate(move |notes| {
            if let Some(note) = notes.iter_mut().find(|n| n.id == id) {
                note.color_index = next_color_index(note.color_index);
            }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Note>> {
        self.inner.subscribe()
    }

    pub fn failures(&self) -> broadcast::Receiver<StoreFailure> {
        self.inner.failures()
    }

    /// Re-reads `notes.json`.
    pub fn reload(&self) -> Result<()> {
        self.inner.reload()
    }

    /// Waits for all queued mutations to be written.
    pub async fn flush(&self) -> Result<()> {
        self.inner.flush().await
    }
}

fn find(notes: &[Note], id: NoteId) -> Option<&Note> {
    notes.iter().find(|n| n.id == id)
}

fn replace(notes: &mut [Note], note: Note) {
    if let Some(slot) = notes.iter_mut().find(|n| n.id == note.id) {
        *slot = note;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn titled(id: NoteId, title: &str) -> Note {
        Note::with_id(id, id).with_title(title)
    }

    async fn open_in(dir: &TempDir) -> NoteStore {
        NoteStore::open(&StoreConfig::in_dir(dir.path()).with_watch(false))
            .await
            .unwrap()
    }

    #[test]
    fn test_replace_is_idempotent() {
        let mut once = vec![titled(1, "a"), titled(2, "b")];
        let mut twice = once.clone();
        let edited = titled(2, "B");

        replace(&mut once, edited.clone());
        replace(&mut twice, edited.clone());
        replace(&mut twice, edited);
        assert_eq!(once, twice);
        assert_eq!(once[1].title, "B");
    }

    #[test]
    fn test_replace_missing_id_is_noop() {
        let mut notes = vec![titled(1, "a")];
        let before = notes.clone();
        replace(&mut notes, titled(99, "ghost"));
        assert_eq!(notes, before);
    }

    #[test]
    fn test_replace_touches_first_match_only() {
        let mut notes = vec![titled(1, "first"), titled(1, "second")];
        replace(&mut notes, titled(1, "edited"));
        assert_eq!(notes[0].title, "edited");
        assert_eq!(notes[1].title, "second");
    }

    #[tokio::test]
    async fn test_add_then_list_and_find() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;

        store.add(titled(1, "one")).unwrap();
        store.add(titled(2, "two")).unwrap();
        store.flush().await.unwrap();

        let titles: Vec<_> = store.list().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["one", "two"]);
        assert_eq!(store.find_by_id(2).unwrap().title, "two");
        assert!(store.find_by_id(3).is_none());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_remove_missing_id_leave_collection() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;
        store.add(titled(1, "keep")).unwrap();
        store.flush().await.unwrap();
        let before = store.list();

        store.update(titled(42, "nobody")).unwrap();
        store.remove(42).unwrap();
        store.flush().await.unwrap();

        assert_eq!(store.list(), before);
    }

    #[tokio::test]
    async fn test_remove_drops_note() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;
        store.add(titled(1, "a")).unwrap();
        store.add(titled(2, "b")).unwrap();
        store.remove(1).unwrap();
        store.flush().await.unwrap();

        assert_eq!(store.list(), vec![titled(2, "b")]);
    }

    #[tokio::test]
    async fn test_favourite_toggle_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = open_in(&dir).await;
            store.add(titled(5, "fav me")).unwrap();
            store.toggle_favourite(5).unwrap();
            store.flush().await.unwrap();
        }

        let reopened = open_in(&dir).await;
        assert!(reopened.find_by_id(5).unwrap().is_favourite);
    }

    #[tokio::test]
    async fn test_update_with_flipped_favourite_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let note = titled(8, "flip");
        {
            let store = open_in(&dir).await;
            store.add(note.clone()).unwrap();
            store.update(note.clone().with_favourite(true)).unwrap();
            store.flush().await.unwrap();
        }

        let reopened = open_in(&dir).await;
        assert_eq!(reopened.list(), vec![note.with_favourite(true)]);
    }

    #[tokio::test]
    async fn test_cycle_color_wraps() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;
        store.add(titled(1, "c").with_color_index(8)).unwrap();
        store.cycle_color(1).unwrap();
        store.cycle_color(1).unwrap();
        store.flush().await.unwrap();

        assert_eq!(store.find_by_id(1).unwrap().color_index, 1);
    }

    #[tokio::test]
    async fn test_cycle_color_from_max_stored_index() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("notes.json"),
            r#"[{"id":1,"title":"big","colorIndex":2147483647}]"#,
        )
        .unwrap();
        let store = open_in(&dir).await;

        store.cycle_color(1).unwrap();
        store.flush().await.unwrap();
        assert_eq!(store.find_by_id(1).unwrap().color_index, 2);

        store.add(titled(2, "still saving")).unwrap();
        store.flush().await.unwrap();
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.json"), "{ definitely not notes").unwrap();

        let store = open_in(&dir).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_rapid_edits_compose() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;
        store.add(titled(1, "")).unwrap();
        for title in ["h", "he", "hel", "hell", "hello"] {
            store.update(titled(1, title)).unwrap();
        }
        store.add(titled(2, "second")).unwrap();
        store.flush().await.unwrap();

        let notes = store.list();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "hello");
    }
}
