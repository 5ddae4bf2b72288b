// Achievements section: the ranked boards and their placeholders.
//
// The line builders are plain string functions so the board text can be
// unit-tested without a terminal.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AchievementsView;
use crate::leaderboards::{BenchEntry, ComebackEntry, RangeBoard, RangeEntry};

/// Render the achievements board grid.
pub fn render(frame: &mut Frame, area: Rect, view: Option<&AchievementsView>) {
    let Some(view) = view else {
        frame.render_widget(
            Paragraph::new("Loading...").style(Style::default().fg(Color::Yellow)),
            area,
        );
        return;
    };

    let [top_row, bottom_row] =
        Layout::vertical([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(area);
    let [podium_area, early_area, endgame_area] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(top_row);
    let [bench_area, comeback_area, soon_area] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(bottom_row);

    render_board(frame, podium_area, "Grand Champion", podium_lines(&view.grand_champions));
    render_board(frame, early_area, "Early Bird (GW1-10)", range_lines(&view.early_bird));
    render_board(frame, endgame_area, "Endgame Strategist (GW29-38)", range_lines(&view.endgame));
    render_board(frame, bench_area, "Bench Warmer", bench_lines(&view.bench_warmers));
    render_board(frame, comeback_area, "Comeback Kid", comeback_lines(&view.comeback));
    render_board(
        frame,
        soon_area,
        "More Awards",
        crate::app::COMING_SOON
            .iter()
            .map(|name| format!("{name}: Coming soon"))
            .collect(),
    );
}

fn render_board(frame: &mut Frame, area: Rect, title: &str, lines: Vec<String>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "));
    let text = lines.join("\n");
    frame.render_widget(Paragraph::new(text).block(block), area);
}

// ---------------------------------------------------------------------------
// Line builders
// ---------------------------------------------------------------------------

/// Top-of-table podium from the startup standings.
pub fn podium_lines(champions: &[(String, i64)]) -> Vec<String> {
    if champions.is_empty() {
        return vec!["League data not available".into()];
    }
    champions
        .iter()
        .enumerate()
        .map(|(i, (name, total))| format!("#{} {name}  {total} pts", i + 1))
        .collect()
}

/// A range board: ranked rows, or the waiting placeholder when the window
/// has not opened.
pub fn range_lines(board: &RangeBoard) -> Vec<String> {
    match board {
        RangeBoard::Waiting { start, end } => vec![
            format!("Waiting for GW{start}-GW{end} to begin"),
            "Will update automatically once gameweeks begin".into(),
        ],
        RangeBoard::Ranked(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("#{} {}  {}", i + 1, e.display_name, range_value(e)))
            .collect(),
    }
}

fn range_value(entry: &RangeEntry) -> String {
    if entry.gameweeks > 0 {
        format!("{} pts ({} GWs)", entry.points, entry.gameweeks)
    } else {
        "No data yet".into()
    }
}

/// Bench-points rows; a failed-fetch manager is annotated, not hidden.
pub fn bench_lines(entries: &[BenchEntry]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let note = if e.has_data { "" } else { " (no data)" };
            format!("#{} {}  {} pts{}", i + 1, e.display_name, e.points, note)
        })
        .collect()
}

/// Comeback rows, or the checkpoint error text.
pub fn comeback_lines(board: &Result<Vec<ComebackEntry>, String>) -> Vec<String> {
    match board {
        Err(message) => vec![message.clone()],
        Ok(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let sign = if e.places > 0 { "+" } else { "" };
                format!("#{} {}  {}{} places", i + 1, e.display_name, sign, e.places)
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waiting_board_renders_placeholder_not_rankings() {
        let lines = range_lines(&RangeBoard::Waiting { start: 29, end: 38 });
        assert_eq!(lines[0], "Waiting for GW29-GW38 to begin");
    }

    #[test]
    fn ranked_board_numbers_rows_and_shows_gameweek_counts() {
        let board = RangeBoard::Ranked(vec![
            RangeEntry { display_name: "Ann".into(), points: 712, gameweeks: 10 },
            RangeEntry { display_name: "Bob".into(), points: 0, gameweeks: 0 },
        ]);
        let lines = range_lines(&board);
        assert_eq!(lines[0], "#1 Ann  712 pts (10 GWs)");
        assert_eq!(lines[1], "#2 Bob  No data yet");
    }

    #[test]
    fn bench_lines_annotate_missing_data() {
        let lines = bench_lines(&[
            BenchEntry { display_name: "Ann".into(), points: 143, has_data: true },
            BenchEntry { display_name: "Bob".into(), points: 0, has_data: false },
        ]);
        assert_eq!(lines[0], "#1 Ann  143 pts");
        assert_eq!(lines[1], "#2 Bob  0 pts (no data)");
    }

    #[test]
    fn comeback_lines_sign_improvements_and_show_errors() {
        let ok: Result<Vec<ComebackEntry>, String> = Ok(vec![
            ComebackEntry { display_name: "Ann".into(), places: 5 },
            ComebackEntry { display_name: "Bob".into(), places: -2 },
        ]);
        let lines = comeback_lines(&ok);
        assert_eq!(lines[0], "#1 Ann  +5 places");
        assert_eq!(lines[1], "#2 Bob  -2 places");

        let err: Result<Vec<ComebackEntry>, String> =
            Err("could not load GW19 standings: timeout".into());
        assert_eq!(comeback_lines(&err), vec!["could not load GW19 standings: timeout"]);
    }

    #[test]
    fn podium_handles_missing_standings() {
        assert_eq!(podium_lines(&[]), vec!["League data not available"]);
        let lines = podium_lines(&[("Ann One".into(), 2201)]);
        assert_eq!(lines, vec!["#1 Ann One  2201 pts"]);
    }
}
