//! The user preference record.
//!
//! One [`Settings`] value applies process-wide. It is persisted as a single
//! JSON object in which the enum fields are stored by symbolic name
//! (`"viewMode": "GRID"`, `"sortBy": "DATEDES"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::JotpadError;

/// How the home screen lays out note cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    /// Symbolic name, as written to the settings file.
    pub fn name(self) -> &'static str {
        match self {
            Self::List => "LIST",
            Self::Grid => "GRID",
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::List => Self::Grid,
            Self::Grid => Self::List,
        }
    }
}

/// Order in which the home screen presents notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortBy {
    /// Newest first.
    DateDes,
    /// Oldest first.
    DateAsc,
    /// Case-insensitive by title.
    #[default]
    Alphabet,
    /// Reshuffled on every render.
    Random,
}

impl SortBy {
    /// Symbolic name, as written to the settings file.
    pub fn name(self) -> &'static str {
        match self {
            Self::DateDes => "DATEDES",
            Self::DateAsc => "DATEASC",
            Self::Alphabet => "ALPHABET",
            Self::Random => "RANDOM",
        }
    }

    /// Next entry of the sort button cycle: DATEDES → DATEASC → ALPHABET → RANDOM → DATEDES.
    pub fn next(self) -> Self {
        match self {
            Self::DateDes => Self::DateAsc,
            Self::DateAsc => Self::Alphabet,
            Self::Alphabet => Self::Random,
            Self::Random => Self::DateDes,
        }
    }

    /// Single-letter label shown next to the sort button.
    pub fn label(self) -> &'static str {
        match self {
            Self::Alphabet => "A",
            Self::Random => "R",
            Self::DateDes | Self::DateAsc => "D",
        }
    }
}

/// Persisted user preferences.
///
/// Missing fields take their default so that files written by builds with
/// fewer flags still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub view_mode: ViewMode,
    pub sort_by: SortBy,
    pub dark_mode: bool,
    pub text_style_visible: bool,
    pub search_bar_visible: bool,
    pub view_toggle_visible: bool,
    pub sort_by_visible: bool,
    pub favourites_visible: bool,
    pub read_only_visible: bool,
    pub date_visible: bool,
    pub color_visible: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::List,
            sort_by: SortBy::Alphabet,
            dark_mode: false,
            text_style_visible: true,
            search_bar_visible: true,
            view_toggle_visible: true,
            sort_by_visible: true,
            favourites_visible: true,
            read_only_visible: true,
            date_visible: true,
            color_visible: true,
        }
    }
}

impl Settings {
    pub fn with_view_mode(self, view_mode: ViewMode) -> Self {
        Self { view_mode, ..self }
    }

    pub fn with_sort_by(self, sort_by: SortBy) -> Self {
        Self { sort_by, ..self }
    }

    /// Returns a copy with one boolean flag replaced.
    pub fn with_flag(mut self, flag: SettingsFlag, value: bool) -> Self {
        *flag.slot(&mut self) = value;
        self
    }

    /// Current value of a boolean flag.
    pub fn flag(&self, flag: SettingsFlag) -> bool {
        match flag {
            SettingsFlag::DarkMode => self.dark_mode,
            SettingsFlag::SearchBar => self.search_bar_visible,
            SettingsFlag::ViewToggle => self.view_toggle_visible,
            SettingsFlag::SortBy => self.sort_by_visible,
            SettingsFlag::Favourites => self.favourites_visible,
            SettingsFlag::Date => self.date_visible,
            SettingsFlag::TextStyle => self.text_style_visible,
            SettingsFlag::Color => self.color_visible,
            SettingsFlag::ReadOnly => self.read_only_visible,
        }
    }
}

/// The independent boolean switches of the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsFlag {
    DarkMode,
    SearchBar,
    ViewToggle,
    SortBy,
    Favourites,
    Date,
    TextStyle,
    Color,
    ReadOnly,
}

impl SettingsFlag {
    /// Every flag, in settings screen order.
    pub const ALL: [SettingsFlag; 9] = [
        Self::DarkMode,
        Self::SearchBar,
        Self::ViewToggle,
        Self::SortBy,
        Self::Favourites,
        Self::Date,
        Self::TextStyle,
        Self::Color,
        Self::ReadOnly,
    ];

    /// Kebab-case name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::DarkMode => "dark-mode",
            Self::SearchBar => "search-bar",
            Self::ViewToggle => "view-toggle",
            Self::SortBy => "sort-by",
            Self::Favourites => "favourites",
            Self::Date => "date",
            Self::TextStyle => "text-style",
            Self::Color => "color",
            Self::ReadOnly => "read-only",
        }
    }

    /// Human-readable label for the settings screen.
    pub fn label(self) -> &'static str {
        match self {
            Self::DarkMode => "Dark mode",
            Self::SearchBar => "Show search bar",
            Self::ViewToggle => "Show view toggle",
            Self::SortBy => "Show sort button",
            Self::Favourites => "Show favourites",
            Self::Date => "Show dates",
            Self::TextStyle => "Show text style buttons",
            Self::Color => "Show note colors",
            Self::ReadOnly => "Show read-only toggle",
        }
    }

    fn slot(self, settings: &mut Settings) -> &mut bool {
        match self {
            Self::DarkMode => &mut settings.dark_mode,
            Self::SearchBar => &mut settings.search_bar_visible,
            Self::ViewToggle => &mut settings.view_toggle_visible,
            Self::SortBy => &mut settings.sort_by_visible,
            Self::Favourites => &mut settings.favourites_visible,
            Self::Date => &mut settings.date_visible,
            Self::TextStyle => &mut settings.text_style_visible,
            Self::Color => &mut settings.color_visible,
            Self::ReadOnly => &mut settings.read_only_visible,
        }
    }
}

impl fmt::Display for SettingsFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingsFlag {
    type Err = JotpadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| JotpadError::InvalidSetting(format!("Unknown setting: {s}")))
    }
}
