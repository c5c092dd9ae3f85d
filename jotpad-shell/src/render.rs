//! Plain-text rendering of the home screen, a single note and the settings.

use jotpad_core::{color_at, editor_color, HomeView, Note, NoteCard, Settings, SettingsFlag, ViewMode};

const GRID_COLUMNS: usize = 2;

pub fn home(view: &HomeView) -> String {
    let mut out = String::new();

    let mut controls = Vec::new();
    if view.sort_button_visible {
        controls.push(format!("sort {} ({})", view.sort_by.label(), view.sort_by.name()));
    }
    if view.view_toggle_visible {
        controls.push(format!("view {}", view.view_mode.name()));
    }
    if !controls.is_empty() {
        out.push_str(&controls.join("  "));
        out.push('\n');
    }

    if view.cards.is_empty() {
        out.push_str("No notes.\n");
        return out;
    }

    match view.view_mode {
        ViewMode::List => {
            for card in &view.cards {
                out.push_str(&card_line(card));
                out.push('\n');
            }
        }
        ViewMode::Grid => {
            for row in view.cards.chunks(GRID_COLUMNS) {
                let cells: Vec<String> = row.iter().map(|c| format!("{:<36}", card_line(c))).collect();
                out.push_str(cells.join(" | ").trim_end());
                out.push('\n');
            }
        }
    }
    out
}

fn card_line(card: &NoteCard) -> String {
    let star = match card.favourite {
        Some(true) => "★ ",
        Some(false) => "☆ ",
        None => "",
    };
    let mut line = format!("[{}] {star}{}", card.id, card.title);
    if let Some(date) = &card.date {
        line.push_str("  ");
        line.push_str(date);
    }
    line.push_str("  ");
    line.push_str(&card.color.hex());
    line
}

pub fn note(note: &Note, settings: &Settings) -> String {
    let mut out = format!("{}\n", note.title);
    out.push_str(&format!("id: {}\n", note.id));
    if settings.date_visible {
        out.push_str(&format!("created: {}\n", note.created_date_label()));
    }
    if settings.favourites_visible {
        out.push_str(&format!("favourite: {}\n", yes_no(note.is_favourite)));
    }
    if settings.color_visible {
        out.push_str(&format!(
            "color: {} ({})\n",
            color_at(note.color_index).name,
            editor_color(note, settings).hex()
        ));
    }
    out.push('\n');
    out.push_str(&note.content);
    if !note.content.ends_with('\n') {
        out.push('\n');
    }
    out
}

pub fn settings(settings: &Settings) -> String {
    let mut out = format!(
        "view: {}\nsort: {}\n",
        settings.view_mode.name(),
        settings.sort_by.name()
    );
    for flag in SettingsFlag::ALL {
        out.push_str(&format!(
            "{:<12} {:<3}  {}\n",
            flag.name(),
            on_off(settings.flag(flag)),
            flag.label()
        ));
    }
    out
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

pub fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
