//! Upload dialog: path input for a single file or a whole directory.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

pub struct UploadDialog {
    /// Target folder for the upload.
    pub folder_id: i64,
    pub folder_name: String,
    /// Local path typed by the user. A directory uploads every image in it.
    pub path: String,
    pub cursor: usize,
    pub status: Option<String>,
}

impl UploadDialog {
    pub fn new(folder_id: i64, folder_name: &str) -> Self {
        Self {
            folder_id,
            folder_name: folder_name.to_string(),
            path: String::new(),
            cursor: 0,
            status: None,
        }
    }

    pub fn handle_char(&mut self, c: char) {
        self.path.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.path.remove(self.cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.path.len() {
            self.cursor += 1;
        }
    }
}

pub fn render(frame: &mut Frame, dialog: &UploadDialog, area: Rect) {
    let dialog_width = 70.min(area.width.saturating_sub(4));
    let dialog_height = 9;

    let x = (area.width.saturating_sub(dialog_width)) / 2;
    let y = (area.height.saturating_sub(dialog_height)) / 2;
    let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Upload to '{}' ", dialog.folder_name));
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // hint
            Constraint::Length(3), // input
            Constraint::Length(1), // status
            Constraint::Length(1), // footer
        ])
        .split(dialog_area);

    let hint = Paragraph::new("Path to an image file, or a directory to upload all images in it:")
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(hint, chunks[0]);

    let input_text = format!(
        "{}|{}",
        &dialog.path[..dialog.cursor],
        &dialog.path[dialog.cursor..]
    );
    let input = Paragraph::new(input_text)
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Path ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(input, chunks[1]);

    if let Some(ref status) = dialog.status {
        let status_line = Paragraph::new(status.as_str()).style(Style::default().fg(Color::Red));
        frame.render_widget(status_line, chunks[2]);
    }

    let footer = Paragraph::new("Enter: upload | Esc: cancel")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);
}
