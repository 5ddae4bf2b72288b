// Nav bar, help bar, and the loading/notice banner.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{Section, ViewState};

/// Section tabs plus the welcome text, one line.
pub fn render_nav(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = nav_spans(state.section);
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        state.tiles.welcome.clone(),
        Style::default().fg(Color::Green),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " r:refresh  l:logout  q:quit",
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}

/// Full-width centered notice, used for loading states.
pub fn render_banner(frame: &mut Frame, area: Rect, message: &str) {
    frame.render_widget(
        Paragraph::new(message).centered().style(Style::default().fg(Color::Yellow)),
        area,
    );
}

/// Build tab indicator spans with the active section highlighted.
pub fn nav_spans(active: Section) -> Vec<Span<'static>> {
    let tabs = [
        (Section::Dashboard, "1:Dashboard"),
        (Section::Achievements, "2:Achievements"),
        (Section::LeagueTable, "3:League Table"),
    ];

    let mut spans = Vec::new();
    for (section, label) in tabs {
        let style = if section == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{label}]"), style));
        spans.push(Span::raw(" "));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_spans_highlight_only_the_active_section() {
        let spans = nav_spans(Section::Achievements);
        // Three labelled tabs with separators.
        assert_eq!(spans.len(), 6);
        let highlighted: Vec<&str> = spans
            .iter()
            .filter(|s| s.style.bg == Some(Color::White))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(highlighted, vec!["[2:Achievements]"]);
    }
}
