use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};
use jotpad_core::{NoteId, SettingsFlag};

#[derive(Debug, Parser)]
#[command(version, about = "Offline notes in the terminal")]
pub struct Cli {
    /// Directory holding notes.json and settings.json [default: ~/.config/jotpad]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Do not follow changes made to the data files by other processes
    #[arg(long, global = true, default_value_t = false)]
    pub no_watch: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List notes using the saved view and sort order
    List {
        /// Only notes whose title contains this text (case-insensitive)
        #[arg(long, short)]
        search: Option<String>,

        /// Print the notes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one note in full
    Show { id: NoteId },
    /// Create a note
    New {
        #[arg(long, short)]
        title: String,

        #[arg(long, short, default_value = "")]
        content: String,
    },
    /// Change the title or content of a note
    Edit {
        id: NoteId,

        #[arg(long, short)]
        title: Option<String>,

        #[arg(long, short)]
        content: Option<String>,
    },
    /// Delete a note
    Delete { id: NoteId },
    /// Toggle the favourite mark of a note
    Favourite { id: NoteId },
    /// Move a note to the next color
    Color { id: NoteId },
    /// Show the current settings
    Settings,
    /// Turn a settings switch on or off
    Set {
        flag: SettingsFlag,

        #[arg(action = ArgAction::Set, value_parser = BoolishValueParser::new())]
        value: bool,
    },
    /// Switch between list and grid layout
    View,
    /// Advance to the next sort order
    Sort,
    /// Keep printing the note list whenever notes or settings change
    Watch {
        #[arg(long, short)]
        search: Option<String>,
    },
}
