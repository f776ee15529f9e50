use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::app::{ActivePane, App};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    // The latest error wins, then transient status messages.
    if let Some(error) = app.library.error() {
        let line = Line::from(vec![Span::styled(
            format!(" {} ", error),
            Style::default().fg(Color::White).bg(Color::Red),
        )]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    if let Some(ref message) = app.status_message {
        let line = Line::from(vec![Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Yellow).bg(Color::DarkGray),
        )]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let mut spans = Vec::new();

    // Left: user @ server
    let account = match app.user {
        Some(ref user) => format!(" {}@{} ", user.username, app.config.server.base_url),
        None => format!(" {} ", app.config.server.base_url),
    };
    spans.push(Span::styled(
        account,
        Style::default().fg(Color::White).bg(Color::DarkGray),
    ));

    // Middle: folder/photo counts
    spans.push(Span::styled(
        format!(
            " {} folders, {} photos ",
            app.library.folders().len(),
            app.library.photos().len()
        ),
        Style::default().fg(Color::Gray),
    ));

    if app.library.loading() {
        spans.push(Span::styled(
            " [refreshing...] ",
            Style::default().fg(Color::Cyan),
        ));
    }

    // Position within the active pane
    let (selected, total) = match app.active_pane {
        ActivePane::Folders => (app.selected_folder_index, app.library.folders().len()),
        ActivePane::Photos => (app.selected_photo_index, app.visible_photos().len()),
    };
    let position = if total > 0 {
        format!("{}/{}", selected + 1, total)
    } else {
        "0/0".to_string()
    };

    let help_text = format!(" {} | r:refresh /:search ?:help q:quit ", position);

    let content_len: usize = spans.iter().map(|s| s.content.len()).sum();
    let available = area.width as usize;
    if available > content_len + help_text.len() {
        let spacing = " ".repeat(available - content_len - help_text.len());
        spans.push(Span::raw(spacing));
    }

    spans.push(Span::styled(
        help_text,
        Style::default().fg(Color::White).bg(Color::DarkGray),
    ));

    let line = Line::from(spans);
    frame.render_widget(Paragraph::new(line), area);
}
