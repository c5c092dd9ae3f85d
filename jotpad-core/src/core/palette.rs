//! Fixed note color palettes and the card color projection.

use crate::{Note, Settings};

/// A 32-bit ARGB color, as stored by the palettes below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argb(pub u32);

impl Argb {
    /// `#RRGGBB` form, alpha dropped.
    pub fn hex(self) -> String {
        format!("#{:06X}", self.0 & 0x00FF_FFFF)
    }
}

/// One palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteColor {
    pub name: &'static str,
    pub card: Argb,
    pub editor_light: Argb,
    pub editor_dark: Argb,
}

/// Colors a note may cycle through; `colorIndex` points into this list.
pub static NOTE_COLORS: [NoteColor; 9] = [
    NoteColor { name: "grey", card: Argb(0xFFDC_DCDC), editor_light: Argb(0xFFFF_FFFF), editor_dark: Argb(0xFF73_7373) },
    NoteColor { name: "yellow", card: Argb(0xFFFF_F9C4), editor_light: Argb(0x80FF_F9C4), editor_dark: Argb(0xFFB9_B590) },
    NoteColor { name: "orange", card: Argb(0xFFFF_CCBC), editor_light: Argb(0x80FF_CCBC), editor_dark: Argb(0xFFB4_9287) },
    NoteColor { name: "green", card: Argb(0xFFC8_E6C9), editor_light: Argb(0x80C8_E6C9), editor_dark: Argb(0xFF92_A893) },
    NoteColor { name: "blue", card: Argb(0xFFBB_DEFB), editor_light: Argb(0x80BB_DEFB), editor_dark: Argb(0xFF8C_A6BB) },
    NoteColor { name: "purple", card: Argb(0xFFE1_BEE7), editor_light: Argb(0x80E1_BEE7), editor_dark: Argb(0xFFA5_8BA9) },
    NoteColor { name: "red", card: Argb(0xFFF8_9494), editor_light: Argb(0x80F8_9494), editor_dark: Argb(0xFFAD_6767) },
    NoteColor { name: "cyan", card: Argb(0xFFB3_E5FC), editor_light: Argb(0x80B3_E5FC), editor_dark: Argb(0xFF77_97A6) },
    NoteColor { name: "pink", card: Argb(0xFFFF_CDD2), editor_light: Argb(0x80FF_CDD2), editor_dark: Argb(0xFFA8_888C) },
];

/// Card background of a favourite note while favourites are shown.
pub const FAVOURITE_CARD: Argb = Argb(0xFFFF_CE04);

/// Card background when note colors are hidden.
pub const DEFAULT_CARD: Argb = Argb(0xFFDC_DCDC);

/// Editor background when note colors are hidden.
pub const PLAIN_EDITOR: Argb = Argb(0xFFFF_FFFF);

/// Palette slot for `index`, falling back to the first slot when out of range.
pub fn color_at(index: i32) -> &'static NoteColor {
    usize::try_from(index)
        .ok()
        .and_then(|i| NOTE_COLORS.get(i))
        .unwrap_or(&NOTE_COLORS[0])
}

/// Index following `index` in the color cycle.
pub fn next_color_index(index: i32) -> i32 {
    let len = NOTE_COLORS.len() as i32;
    (index.max(0) % len + 1) % len
}

/// Background color of a note's card on the home screen.
pub fn card_color(note: &Note, settings: &Settings) -> Argb {
    if note.is_favourite && settings.favourites_visible {
        FAVOURITE_CARD
    } else if settings.color_visible {
        color_at(note.color_index).card
    } else {
        DEFAULT_CARD
    }
}

/// Background color of the note editor.
pub fn editor_color(note: &Note, settings: &Settings) -> Argb {
    if !settings.color_visible {
        return PLAIN_EDITOR;
    }
    let color = color_at(note.color_index);
    if settings.dark_mode {
        color.editor_dark
    } else {
        color.editor_light
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SettingsFlag;

    #[test]
    fn test_out_of_range_falls_back_to_first() {
        assert_eq!(color_at(42).name, "grey");
        assert_eq!(color_at(-1).name, "grey");
        assert_eq!(color_at(4).name, "blue");
    }

    #[test]
    fn test_color_cycle_wraps() {
        assert_eq!(next_color_index(0), 1);
        assert_eq!(next_color_index(8), 0);
        assert_eq!(next_color_index(-3), 1);
    }

    #[test]
    fn test_color_cycle_handles_extreme_indices() {
        // i32::MAX % 9 == 1
        assert_eq!(next_color_index(i32::MAX), 2);
        assert_eq!(next_color_index(i32::MIN), 1);
    }

    #[test]
    fn test_favourite_card_wins_when_visible() {
        let note = Note::with_id(1, 1).with_favourite(true).with_color_index(3);
        let settings = Settings::default();
        assert_eq!(card_color(&note, &settings), FAVOURITE_CARD);

        let hidden = settings.with_flag(SettingsFlag::Favourites, false);
        assert_eq!(card_color(&note, &hidden), NOTE_COLORS[3].card);
    }

    #[test]
    fn test_hidden_colors_use_default_card() {
        let note = Note::with_id(1, 1).with_color_index(5);
        let settings = Settings::default().with_flag(SettingsFlag::Color, false);
        assert_eq!(card_color(&note, &settings), DEFAULT_CARD);
        assert_eq!(editor_color(&note, &settings), PLAIN_EDITOR);
    }

    #[test]
    fn test_editor_color_follows_dark_mode() {
        let note = Note::with_id(1, 1).with_color_index(2);
        let light = Settings::default();
        let dark = Settings::default().with_flag(SettingsFlag::DarkMode, true);
        assert_eq!(editor_color(&note, &light), NOTE_COLORS[2].editor_light);
        assert_eq!(editor_color(&note, &dark), NOTE_COLORS[2].editor_dark);
    }

    #[test]
    fn test_hex() {
        assert_eq!(FAVOURITE_CARD.hex(), "#FFCE04");
    }
}
