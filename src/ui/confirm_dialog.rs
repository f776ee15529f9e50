//! Confirmation dialog for destructive operations.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::api::Folder;
use crate::store::PhotoEntry;

/// The operation waiting on the user's confirmation.
#[derive(Debug, Clone)]
pub enum PendingAction {
    DeleteFolder {
        folder_id: i64,
        name: String,
    },
    DeletePhoto {
        folder_id: i64,
        photo_id: i64,
        title: String,
    },
}

pub struct ConfirmDialog {
    pub action: PendingAction,
    pub message: String,
}

impl ConfirmDialog {
    pub fn delete_folder(folder: &Folder, photo_count: usize) -> Self {
        let message = format!(
            "Delete folder '{}' and the {} photo(s) in it? This cannot be undone.",
            folder.name, photo_count
        );
        Self {
            action: PendingAction::DeleteFolder {
                folder_id: folder.id,
                name: folder.name.clone(),
            },
            message,
        }
    }

    pub fn delete_photo(photo: &PhotoEntry) -> Self {
        let message = format!(
            "Delete photo '{}' from folder '{}'? This cannot be undone.",
            photo.title, photo.folder_name
        );
        Self {
            action: PendingAction::DeletePhoto {
                folder_id: photo.folder_id,
                photo_id: photo.id,
                title: photo.title.clone(),
            },
            message,
        }
    }
}

pub fn render(frame: &mut Frame, dialog: &ConfirmDialog, area: Rect) {
    let dialog_width = 60.min(area.width.saturating_sub(4));
    let dialog_height = 9;

    let x = (area.width.saturating_sub(dialog_width)) / 2;
    let y = (area.height.saturating_sub(dialog_height)) / 2;
    let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

    frame.render_widget(Clear, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Message
            Constraint::Length(3), // Buttons
        ])
        .margin(1)
        .split(dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Confirm ");
    frame.render_widget(block, dialog_area);

    let message = Paragraph::new(dialog.message.as_str())
        .wrap(ratatui::widgets::Wrap { trim: true })
        .alignment(Alignment::Center);
    frame.render_widget(message, chunks[0]);

    let buttons = Line::from(vec![
        Span::styled(
            "  [Enter/y] ",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("Yes"),
        Span::raw("    "),
        Span::styled(
            "[Esc/n] ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw("No"),
    ]);
    let button_widget = Paragraph::new(buttons).alignment(Alignment::Center);
    frame.render_widget(button_widget, chunks[1]);
}
