// League table section.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use ratatui::Frame;

use crate::league_table::TableRow;

/// Render the standings table, highlighting the logged-in manager's row.
/// With no standings, a single "not available" row is shown instead of an
/// empty table.
pub fn render(frame: &mut Frame, area: Rect, rows: &[TableRow]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" League Table ");

    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new("League data not available").block(block),
            area,
        );
        return;
    }

    let header = Row::new(["Rank", "Manager", "Team", "Total Points"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let body = rows.iter().map(|row| {
        let style = if row.is_current_user {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new([
            format!("#{}", row.position),
            row.player_name.clone(),
            row.entry_name.clone(),
            row.total.to_string(),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(38),
        Constraint::Percentage(38),
        Constraint::Length(12),
    ];
    frame.render_widget(Table::new(body, widths).header(header).block(block), area);
}
