// Login screen: centered form with username and masked password.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{LoginField, LoginForm};

/// Render the login form centered in `area`.
pub fn render(frame: &mut Frame, area: Rect, form: &LoginForm) {
    let box_area = centered_rect(area, 46, 9);

    let mut lines = vec![
        Line::from(Span::styled(
            "Manager sign in",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        field_line("Username", &form.username, form.focus == LoginField::Username),
        field_line(
            "Password",
            &"•".repeat(form.password.chars().count()),
            form.focus == LoginField::Password,
        ),
        Line::raw(""),
    ];

    match &form.error {
        Some(message) => lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::raw("")),
    }
    lines.push(Line::from(Span::styled(
        "Tab: switch field   Enter: sign in   Esc: quit",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default().borders(Borders::ALL).title(" Touchline ");
    frame.render_widget(Paragraph::new(lines).block(block), box_area);
}

/// One labelled input line, with the focused field marked.
fn field_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let marker = if focused { "> " } else { "  " };
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(marker, style),
        Span::styled(format!("{label}: "), style),
        Span::styled(value.to_string(), style),
        Span::styled(if focused { "_" } else { "" }.to_string(), style),
    ])
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
