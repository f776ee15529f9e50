//! Metadata panel for the current selection.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{ActivePane, App};
use crate::format;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Details ");

    match app.active_pane {
        ActivePane::Folders => render_folder_details(frame, app, block, area),
        ActivePane::Photos => render_photo_details(frame, app, block, area),
    }
}

fn render_folder_details(frame: &mut Frame, app: &App, block: Block, area: Rect) {
    let Some(folder) = app.selected_folder() else {
        let paragraph = Paragraph::new("No folder selected")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    };

    let photos = app.library.photos_by_folder(folder.id);
    let favorites = photos.iter().filter(|p| p.is_favorite).count();
    let total_size: u64 = photos.iter().filter_map(|p| p.file_size).sum();

    let lines = vec![
        Line::from(vec![
            Span::styled("Folder: ", Style::default().fg(Color::DarkGray)),
            Span::raw(folder.name.clone()),
        ]),
        Line::from(vec![
            Span::styled("Photos: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} ({} favorite)", photos.len(), favorites)),
        ]),
        Line::from(vec![
            Span::styled("Total size: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format::format_size(total_size)),
        ]),
        Line::from(vec![
            Span::styled("Created: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!(
                "{} ({})",
                format::format_timestamp(&folder.created_at),
                format::format_relative(&folder.created_at)
            )),
        ]),
        Line::from(vec![
            Span::styled("Updated: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format::format_timestamp(&folder.updated_at)),
        ]),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_photo_details(frame: &mut Frame, app: &App, block: Block, area: Rect) {
    let Some(photo) = app.selected_photo() else {
        let paragraph = Paragraph::new("No photo selected")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Title: ", Style::default().fg(Color::DarkGray)),
            Span::raw(photo.title.clone()),
        ]),
        Line::from(vec![
            Span::styled("Folder: ", Style::default().fg(Color::DarkGray)),
            Span::raw(photo.folder_name.clone()),
        ]),
    ];

    if let Some(size) = photo.file_size {
        lines.push(Line::from(vec![
            Span::styled("Size: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format::format_size(size)),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("Created: ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(
            "{} ({})",
            format::format_timestamp(&photo.created_at),
            format::format_relative(&photo.created_at)
        )),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Favorite: ", Style::default().fg(Color::DarkGray)),
        if photo.is_favorite {
            Span::styled("★ yes", Style::default().fg(Color::Yellow))
        } else {
            Span::raw("no")
        },
    ]));

    lines.push(Line::from(vec![
        Span::styled("Image: ", Style::default().fg(Color::DarkGray)),
        Span::raw(photo.image.clone()),
    ]));

    if let Some(ref description) = photo.description {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Description:",
            Style::default().fg(Color::Cyan),
        )));
        for text_line in description.lines() {
            lines.push(Line::from(text_line.to_string()));
        }
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
