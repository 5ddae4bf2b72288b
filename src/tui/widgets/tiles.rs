// Dashboard section: a grid of stat tiles for the logged-in manager.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the dashboard tile grid.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let tiles = &state.tiles;

    let [notice_area, top_row, bottom_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(4),
        Constraint::Min(4),
    ])
    .areas(area);

    if let Some(error) = &state.standings_error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            notice_area,
        );
    }

    let [overview, last_gw, next_gw] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(top_row);

    let [transfers, bank] =
        Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(bottom_row);

    render_tile(
        frame,
        overview,
        "Season",
        vec![
            Line::raw(format!("Overall rank: {}", tiles.overall_rank)),
            Line::raw(format!("Overall points: {}", tiles.overall_points)),
            Line::raw(format!("Team: {}", tiles.team_name)),
        ],
    );
    render_tile(
        frame,
        last_gw,
        "Last Gameweek",
        vec![
            Line::raw(format!("{}{}", tiles.last_gw_points, tiles.last_gw_average)),
            Line::raw(tiles.last_gw_captain.clone()),
        ],
    );
    render_tile(
        frame,
        next_gw,
        "Next Deadline",
        vec![
            Line::raw(tiles.next_gw_deadline.clone()),
            Line::raw(tiles.next_gw_countdown.clone()),
            Line::raw(tiles.next_gw_captain.clone()),
        ],
    );
    render_tile(
        frame,
        transfers,
        "Transfers",
        vec![Line::raw(tiles.free_transfers.clone())],
    );
    render_tile(frame, bank, "Bank", vec![Line::raw(tiles.bank.clone())]);
}

fn render_tile(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
