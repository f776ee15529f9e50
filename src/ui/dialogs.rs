//! Help overlay.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn render_help(frame: &mut Frame, area: Rect) {
    let dialog_width = 62.min(area.width.saturating_sub(4));
    let dialog_height = 22.min(area.height.saturating_sub(2));

    let x = (area.width.saturating_sub(dialog_width)) / 2;
    let y = (area.height.saturating_sub(dialog_height)) / 2;
    let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

    frame.render_widget(Clear, dialog_area);

    let key = |k: &str, action: &str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", k), Style::default().fg(Color::Cyan)),
            Span::raw(action.to_string()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            "Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        key("Tab", "switch between folders and photos"),
        key("j/k, ↑/↓", "move selection"),
        key("Enter", "open folder (folders pane)"),
        key("1/2/3/4", "view: folder / all / favorites / recent"),
        Line::from(""),
        Line::from(Span::styled(
            "Library",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        key("r", "refresh folders and photos"),
        key("n", "new folder"),
        key("u", "upload photo(s) to selected folder"),
        key("d", "delete selected folder/photo"),
        key("f", "toggle favorite on selected photo"),
        key("/", "search library"),
        Line::from(""),
        Line::from(Span::styled(
            "Session",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        key("x", "log out"),
        key("Esc", "dismiss message / close dialog"),
        key("q", "quit"),
    ];

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help ")
            .title_style(Style::default().add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(paragraph, dialog_area);
}
