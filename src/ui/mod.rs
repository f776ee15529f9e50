mod browser;
pub mod confirm_dialog;
mod dialogs;
pub mod folder_dialog;
pub mod login;
mod preview;
pub mod search_dialog;
mod status_bar;
pub mod upload_dialog;

use ratatui::prelude::*;

use crate::app::{App, AppMode};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // The login screen owns the whole terminal.
    if app.mode == AppMode::Login {
        login::render(frame, &app.login_dialog, area);
        return;
    }

    // Main layout: content area + status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    // Three-column layout for the browser
    let browser_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25), // Folders
            Constraint::Percentage(40), // Photos
            Constraint::Percentage(35), // Details
        ])
        .split(main_chunks[0]);

    browser::render_folders(frame, app, browser_chunks[0]);
    browser::render_photos(frame, app, browser_chunks[1]);
    preview::render(frame, app, browser_chunks[2]);

    status_bar::render(frame, app, main_chunks[1]);

    // Overlays
    match app.mode {
        AppMode::Help => dialogs::render_help(frame, area),
        AppMode::Searching => {
            if let Some(ref dialog) = app.search_dialog {
                search_dialog::render(frame, dialog, area);
            }
        }
        AppMode::CreatingFolder => {
            if let Some(ref dialog) = app.folder_dialog {
                folder_dialog::render(frame, dialog, area);
            }
        }
        AppMode::Uploading => {
            if let Some(ref dialog) = app.upload_dialog {
                upload_dialog::render(frame, dialog, area);
            }
        }
        AppMode::Confirming => {
            if let Some(ref dialog) = app.confirm_dialog {
                confirm_dialog::render(frame, dialog, area);
            }
        }
        _ => {}
    }
}
