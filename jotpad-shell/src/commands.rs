//! Executes one parsed command against the stores.
//!
//! Errors are reported as user-facing strings, the same shape the front-end
//! shows in its error banner.

use jotpad_core::{color_at, visible_notes, Jotpad, JotpadError, NoteDraft, NoteId, StoreConfig};
use log::debug;

use crate::cli::{Cli, Command};
use crate::render;

type CommandResult = std::result::Result<(), String>;

pub async fn run(cli: Cli) -> CommandResult {
    let follow = matches!(cli.command, Command::Watch { .. }) && !cli.no_watch;
    let config = match cli.data_dir {
        Some(dir) => StoreConfig::in_dir(dir),
        None => StoreConfig::default(),
    }
    .with_watch(follow);
    debug!("using data directory {}", config.data_dir().display());

    let app = Jotpad::open(&config).await.map_err(|e| e.user_message())?;

    match cli.command {
        Command::List { search, json } => list(&app, search.as_deref().unwrap_or(""), json),
        Command::Show { id } => show(&app, id),
        Command::New { title, content } => create(&app, title, content).await,
        Command::Edit { id, title, content } => edit(&app, id, title, content).await,
        Command::Delete { id } => {
            require(&app, id)?;
            app.notes.remove(id).map_err(|e| e.user_message())?;
            flush(&app).await?;
            println!("Deleted note {id}.");
            Ok(())
        }
        Command::Favourite { id } => {
            require(&app, id)?;
            app.notes.toggle_favourite(id).map_err(|e| e.user_message())?;
            flush(&app).await?;
            let favourite = app.notes.find_by_id(id).is_some_and(|n| n.is_favourite);
            println!("Note {id} favourite: {}", render::on_off(favourite));
            Ok(())
        }
        Command::Color { id } => {
            require(&app, id)?;
            app.notes.cycle_color(id).map_err(|e| e.user_message())?;
            flush(&app).await?;
            let index = app.notes.find_by_id(id).map_or(0, |n| n.color_index);
            println!("Note {id} color: {}", color_at(index).name);
            Ok(())
        }
        Command::Settings => {
            print!("{}", render::settings(&app.settings.get()));
            Ok(())
        }
        Command::Set { flag, value } => {
            app.settings.set_flag(flag, value).map_err(|e| e.user_message())?;
            flush(&app).await?;
            println!("{flag}: {}", render::on_off(value));
            Ok(())
        }
        Command::View => {
            app.settings.toggle_view_mode().map_err(|e| e.user_message())?;
            flush(&app).await?;
            println!("view: {}", app.settings.get().view_mode.name());
            Ok(())
        }
        Command::Sort => {
            app.settings.cycle_sort_order().map_err(|e| e.user_message())?;
            flush(&app).await?;
            println!("sort: {}", app.settings.get().sort_by.name());
            Ok(())
        }
        Command::Watch { search } => watch(&app, search.as_deref().unwrap_or("")).await,
    }
}

fn list(app: &Jotpad, query: &str, json: bool) -> CommandResult {
    if json {
        let notes = app.notes.list();
        let visible = visible_notes(&notes, &app.settings.get(), query);
        let out = serde_json::to_string_pretty(&visible).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        print!("{}", render::home(&app.home_view(query)));
    }
    Ok(())
}

fn show(app: &Jotpad, id: NoteId) -> CommandResult {
    let note = app
        .notes
        .find_by_id(id)
        .ok_or_else(|| JotpadError::NoteNotFound(id).user_message())?;
    print!("{}", render::note(&note, &app.settings.get()));
    Ok(())
}

async fn create(app: &Jotpad, title: String, content: String) -> CommandResult {
    let mut draft = NoteDraft::create(&app.notes);
    draft.set_content(content).map_err(|e| e.user_message())?;
    draft.set_title(title).map_err(|e| e.user_message())?;
    if !draft.is_persisted() {
        return Err("A note needs a title before it can be saved".to_string());
    }
    flush(app).await?;
    println!("Created note {}.", draft.note().id);
    Ok(())
}

async fn edit(
    app: &Jotpad,
    id: NoteId,
    title: Option<String>,
    content: Option<String>,
) -> CommandResult {
    if title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err("A note needs a title before it can be saved".to_string());
    }
    let mut draft = NoteDraft::open(&app.notes, id).map_err(|e| e.user_message())?;
    if let Some(title) = title {
        draft.set_title(title).map_err(|e| e.user_message())?;
    }
    if let Some(content) = content {
        draft.set_content(content).map_err(|e| e.user_message())?;
    }
    flush(app).await?;
    println!("Updated note {id}.");
    Ok(())
}

async fn watch(app: &Jotpad, query: &str) -> CommandResult {
    let mut notes = app.notes.subscribe();
    let mut settings = app.settings.subscribe();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        notes.borrow_and_update();
        settings.borrow_and_update();
        print!("{}", render::home(&app.home_view(query)));
        println!("--");

        tokio::select! {
            changed = notes.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = settings.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = &mut ctrl_c => break,
        }
    }
    Ok(())
}

fn require(app: &Jotpad, id: NoteId) -> CommandResult {
    match app.notes.find_by_id(id) {
        Some(_) => Ok(()),
        None => Err(JotpadError::NoteNotFound(id).user_message()),
    }
}

async fn flush(app: &Jotpad) -> CommandResult {
    app.flush().await.map_err(|e| e.user_message())
}
