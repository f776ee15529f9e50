//! Library search dialog: live substring search over titles, descriptions
//! and folder names.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::format;
use crate::store::PhotoEntry;

pub struct SearchDialog {
    /// Search query input
    pub query: String,
    /// Cursor position
    pub cursor: usize,
    /// Matching photos (owned copies of library entries)
    pub results: Vec<PhotoEntry>,
    /// Selected result index
    pub selected_index: usize,
    /// Status message
    pub status: Option<String>,
}

impl SearchDialog {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            cursor: 0,
            results: Vec::new(),
            selected_index: 0,
            status: None,
        }
    }

    pub fn handle_char(&mut self, c: char) {
        self.query.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.query.remove(self.cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.query.len() {
            self.cursor += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if !self.results.is_empty() && self.selected_index < self.results.len() - 1 {
            self.selected_index += 1;
        }
    }

    pub fn set_results(&mut self, results: Vec<PhotoEntry>) {
        self.results = results;
        self.selected_index = 0;
        if self.query.trim().is_empty() {
            self.status = None;
        } else if self.results.is_empty() {
            self.status = Some("No results found".to_string());
        } else {
            self.status = Some(format!("Found {} results", self.results.len()));
        }
    }

    pub fn selected_result(&self) -> Option<&PhotoEntry> {
        self.results.get(self.selected_index)
    }
}

impl Default for SearchDialog {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame, dialog: &SearchDialog, area: Rect) {
    // Center the dialog
    let dialog_width = 80.min(area.width.saturating_sub(4));
    let dialog_height = 25.min(area.height.saturating_sub(4));

    let x = (area.width - dialog_width) / 2;
    let y = (area.height - dialog_height) / 2;

    let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    // Main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(10),   // Results list
            Constraint::Length(2), // Status
            Constraint::Length(2), // Footer
        ])
        .split(dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Search Library ")
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(block, dialog_area);

    // Search input
    let input_text = format!(
        "{}|{}",
        &dialog.query[..dialog.cursor],
        &dialog.query[dialog.cursor..]
    );
    let input = Paragraph::new(input_text)
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Query ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(input, chunks[0]);

    // Results list
    let items: Vec<ListItem> = dialog
        .results
        .iter()
        .map(|photo| {
            let star = if photo.is_favorite { "★ " } else { "  " };
            let description = photo
                .description
                .as_deref()
                .map(|d| format::truncate(d, 50))
                .unwrap_or_else(|| "(no description)".to_string());

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(star, Style::default().fg(Color::Yellow)),
                    Span::styled(&photo.title, Style::default().fg(Color::White)),
                    Span::styled(
                        format!("  [{}]", photo.folder_name),
                        Style::default().fg(Color::Cyan),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", description),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let results_title = if dialog.results.is_empty() {
        " Results ".to_string()
    } else {
        format!(" Results ({}) ", dialog.results.len())
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(results_title)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !dialog.results.is_empty() {
        state.select(Some(dialog.selected_index));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);

    // Status
    let status_text = dialog.status.as_deref().unwrap_or("");
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, chunks[2]);

    // Footer
    let footer = Paragraph::new("type to search | ↑↓: select | Enter: go to photo | Esc: close")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);
}
