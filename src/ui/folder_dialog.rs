//! Input dialog for creating a folder.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

pub struct FolderDialog {
    pub name: String,
    pub cursor: usize,
    pub status: Option<String>,
}

impl FolderDialog {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            cursor: 0,
            status: None,
        }
    }

    pub fn handle_char(&mut self, c: char) {
        self.name.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.name.remove(self.cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.name.len() {
            self.cursor += 1;
        }
    }
}

impl Default for FolderDialog {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame, dialog: &FolderDialog, area: Rect) {
    let dialog_width = 50.min(area.width.saturating_sub(4));
    let dialog_height = 8;

    let x = (area.width.saturating_sub(dialog_width)) / 2;
    let y = (area.height.saturating_sub(dialog_height)) / 2;
    let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" New Folder ");
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Length(1), // status
            Constraint::Length(1), // footer
        ])
        .split(dialog_area);

    let input_text = format!(
        "{}|{}",
        &dialog.name[..dialog.cursor],
        &dialog.name[dialog.cursor..]
    );
    let input = Paragraph::new(input_text)
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Name ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(input, chunks[0]);

    if let Some(ref status) = dialog.status {
        let status_line = Paragraph::new(status.as_str()).style(Style::default().fg(Color::Red));
        frame.render_widget(status_line, chunks[1]);
    }

    let footer = Paragraph::new("Enter: create | Esc: cancel")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[2]);
}
