//! Folder and photo list panes.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::app::{ActivePane, App};
use crate::format;

pub fn render_folders(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.active_pane == ActivePane::Folders;
    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let items: Vec<ListItem> = app
        .library
        .folders()
        .iter()
        .map(|folder| {
            let count = app.library.photos_by_folder(folder.id).len();
            let marker = if app.library.current_folder() == Some(folder.id) {
                "> "
            } else {
                "  "
            };
            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Green)),
                Span::raw(&folder.name),
                Span::styled(
                    format!(" ({})", count),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = format!(" Folders ({}) ", app.library.folders().len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.library.folders().is_empty() {
        state.select(Some(app.selected_folder_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_photos(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.active_pane == ActivePane::Photos;
    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let photos = app.visible_photos();

    let items: Vec<ListItem> = photos
        .iter()
        .map(|photo| {
            let star = if photo.is_favorite { "★ " } else { "  " };
            let size = photo
                .file_size
                .map(format::format_size)
                .unwrap_or_default();
            let line = Line::from(vec![
                Span::styled(star, Style::default().fg(Color::Yellow)),
                Span::raw(&photo.title),
                Span::styled(
                    format!("  {}", size),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = format!(" {} ({}) ", app.photo_view.title(app), photos.len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !photos.is_empty() {
        state.select(Some(app.selected_photo_index.min(photos.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
