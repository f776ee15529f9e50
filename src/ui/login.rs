//! Login and registration screen.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::api::types::{Credentials, Registration};

/// State for the login/register form.
pub struct LoginDialog {
    /// false: sign-in form (username/password); true: registration form.
    pub registering: bool,
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    /// Index of the focused field within the active form.
    pub focus: usize,
    /// Validation or server feedback shown under the form.
    pub status: Option<String>,
}

impl LoginDialog {
    pub fn new() -> Self {
        Self {
            registering: false,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            password_confirm: String::new(),
            focus: 0,
            status: None,
        }
    }

    pub fn field_count(&self) -> usize {
        if self.registering {
            4
        } else {
            2
        }
    }

    fn field_mut(&mut self, index: usize) -> &mut String {
        if self.registering {
            match index {
                0 => &mut self.username,
                1 => &mut self.email,
                2 => &mut self.password,
                _ => &mut self.password_confirm,
            }
        } else {
            match index {
                0 => &mut self.username,
                _ => &mut self.password,
            }
        }
    }

    pub fn handle_char(&mut self, c: char) {
        let index = self.focus;
        self.field_mut(index).push(c);
    }

    pub fn backspace(&mut self) {
        let index = self.focus;
        self.field_mut(index).pop();
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.field_count();
    }

    pub fn prev_field(&mut self) {
        let count = self.field_count();
        self.focus = (self.focus + count - 1) % count;
    }

    pub fn toggle_mode(&mut self) {
        self.registering = !self.registering;
        self.focus = 0;
        self.status = None;
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        }
    }

    pub fn registration(&self) -> Registration {
        Registration {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            password_confirm: self.password_confirm.clone(),
        }
    }
}

impl Default for LoginDialog {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame, dialog: &LoginDialog, area: Rect) {
    let dialog_width = 50.min(area.width.saturating_sub(4));
    let dialog_height = if dialog.registering { 18 } else { 12 };
    let dialog_height = dialog_height.min(area.height.saturating_sub(2));

    let x = (area.width.saturating_sub(dialog_width)) / 2;
    let y = (area.height.saturating_sub(dialog_height)) / 2;
    let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

    frame.render_widget(Clear, dialog_area);

    let title = if dialog.registering {
        " picshelf - Create Account "
    } else {
        " picshelf - Sign In "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(block, dialog_area);

    let mut constraints = vec![Constraint::Length(3), Constraint::Length(3)];
    if dialog.registering {
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(1)); // status
    constraints.push(Constraint::Length(1)); // footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(dialog_area);

    let masked = |value: &str| "\u{2022}".repeat(value.chars().count());

    let fields: Vec<(&str, String)> = if dialog.registering {
        vec![
            ("Username", dialog.username.clone()),
            ("Email", dialog.email.clone()),
            ("Password", masked(&dialog.password)),
            ("Confirm password", masked(&dialog.password_confirm)),
        ]
    } else {
        vec![
            ("Username", dialog.username.clone()),
            ("Password", masked(&dialog.password)),
        ]
    };

    for (index, (label, value)) in fields.iter().enumerate() {
        let focused = dialog.focus == index;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text = if focused {
            format!("{}|", value)
        } else {
            value.clone()
        };
        let input = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", label))
                .border_style(border_style),
        );
        frame.render_widget(input, chunks[index]);
    }

    let status_index = fields.len();
    if let Some(ref status) = dialog.status {
        let status_line = Paragraph::new(status.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(status_line, chunks[status_index]);
    }

    let footer_text = if dialog.registering {
        "Enter: create account | Tab: next field | Ctrl+R: back to sign in | Esc: quit"
    } else {
        "Enter: sign in | Tab: next field | Ctrl+R: create account | Esc: quit"
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[status_index + 1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_navigation_wraps() {
        let mut dialog = LoginDialog::new();
        assert_eq!(dialog.field_count(), 2);

        dialog.next_field();
        assert_eq!(dialog.focus, 1);
        dialog.next_field();
        assert_eq!(dialog.focus, 0);
        dialog.prev_field();
        assert_eq!(dialog.focus, 1);
    }

    #[test]
    fn test_editing_targets_focused_field() {
        let mut dialog = LoginDialog::new();
        dialog.handle_char('a');
        dialog.next_field();
        dialog.handle_char('p');
        dialog.handle_char('w');
        dialog.backspace();

        assert_eq!(dialog.username, "a");
        assert_eq!(dialog.password, "p");
    }

    #[test]
    fn test_toggle_mode_resets_focus_and_status() {
        let mut dialog = LoginDialog::new();
        dialog.focus = 1;
        dialog.status = Some("bad password".to_string());

        dialog.toggle_mode();

        assert!(dialog.registering);
        assert_eq!(dialog.field_count(), 4);
        assert_eq!(dialog.focus, 0);
        assert!(dialog.status.is_none());
    }

    #[test]
    fn test_credentials_are_trimmed() {
        let mut dialog = LoginDialog::new();
        dialog.username = "  alice ".to_string();
        dialog.password = "secret".to_string();

        let credentials = dialog.credentials();
        assert_eq!(credentials.username, "alice");
        assert_eq!(credentials.password, "secret");
    }
}
