//! Home screen projection: search, ordering and the per-card view model.
//!
//! Nothing here touches storage. [`HomeView::project`] is a pure function of a
//! note snapshot, the current [`Settings`] and a transient search query, and
//! is meant to be re-run every time either store publishes a change.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::palette::{card_color, Argb};
use crate::{Note, NoteId, Settings, SortBy, ViewMode};

/// Notes whose title contains `query`, ignoring case. The empty query keeps
/// everything.
pub fn filter_by_title<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|n| n.title.to_lowercase().contains(&needle))
        .collect()
}

/// Orders `notes` in place. [`SortBy::Random`] shuffles with the thread RNG,
/// so repeated calls may differ.
pub fn sort_notes(notes: &mut [&Note], sort_by: SortBy) {
    sort_notes_with(notes, sort_by, &mut rand::rng());
}

/// [`sort_notes`] with an explicit source of randomness.
pub fn sort_notes_with<R: Rng + ?Sized>(notes: &mut [&Note], sort_by: SortBy, rng: &mut R) {
    match sort_by {
        SortBy::Alphabet => notes.sort_by_cached_key(|n| n.title.to_lowercase()),
        SortBy::DateDes => notes.sort_by(|a, b| b.created_date.cmp(&a.created_date)),
        SortBy::DateAsc => notes.sort_by_key(|n| n.created_date),
        SortBy::Random => notes.shuffle(rng),
    }
}

/// Notes the home screen shows, in display order. The query is ignored while
/// the search bar is hidden.
pub fn visible_notes<'a>(notes: &'a [Note], settings: &Settings, query: &str) -> Vec<&'a Note> {
    visible_notes_with(notes, settings, query, &mut rand::rng())
}

/// [`visible_notes`] with an explicit source of randomness.
pub fn visible_notes_with<'a, R: Rng + ?Sized>(
    notes: &'a [Note],
    settings: &Settings,
    query: &str,
    rng: &mut R,
) -> Vec<&'a Note> {
    let query = if settings.search_bar_visible { query } else { "" };
    let mut visible = filter_by_title(notes, query);
    sort_notes_with(&mut visible, settings.sort_by, rng);
    visible
}

/// One rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub id: NoteId,
    pub title: String,
    /// `dd/MM/yyyy`, present when dates are shown.
    pub date: Option<String>,
    /// Present when favourites are shown.
    pub favourite: Option<bool>,
    pub color: Argb,
}

/// Everything the home screen draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub view_mode: ViewMode,
    pub sort_by: SortBy,
    pub dark_mode: bool,
    pub search_enabled: bool,
    pub sort_button_visible: bool,
    pub view_toggle_visible: bool,
    pub cards: Vec<NoteCard>,
}

impl HomeView {
    /// Builds the cards for [`visible_notes`].
    pub fn project(notes: &[Note], settings: &Settings, query: &str) -> Self {
        Self::project_with(notes, settings, query, &mut rand::rng())
    }

    pub fn project_with<R: Rng + ?Sized>(
        notes: &[Note],
        settings: &Settings,
        query: &str,
        rng: &mut R,
    ) -> Self {
        let cards = visible_notes_with(notes, settings, query, rng)
            .into_iter()
            .map(|note| NoteCard {
                id: note.id,
                title: note.title.clone(),
                date: settings.date_visible.then(|| note.created_date_label()),
                favourite: settings.favourites_visible.then_some(note.is_favourite),
                color: card_color(note, settings),
            })
            .collect();

        Self {
            view_mode: settings.view_mode,
            sort_by: settings.sort_by,
            dark_mode: settings.dark_mode,
            search_enabled: settings.search_bar_visible,
            sort_button_visible: settings.sort_by_visible,
            view_toggle_visible: settings.view_toggle_visible,
            cards,
        }
    }
}
