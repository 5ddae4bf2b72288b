// Achievement leaderboards: ranked derived statistics across the roster.
//
// Three boards: range-windowed points (e.g. GW1-10, GW29-38), season bench
// points, and rank improvement between two standings checkpoints. Each
// board fetches its own inputs on demand; histories are pulled one manager
// at a time in roster order so the proxy's pacing gate spaces the requests
// out. That serialization is a rate-limit accommodation, not an accident.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::client::{ApiClient, FetchError};
use crate::config::Manager;
use crate::models::{HistoryRecord, Standing};

/// How many managers a capped board shows.
pub const BOARD_SIZE: usize = 5;

/// Standings checkpoints for the comeback board: mid-season and final.
pub const CHECKPOINT_EARLY: u32 = 19;
pub const CHECKPOINT_FINAL: u32 = 38;

// ---------------------------------------------------------------------------
// History collection
// ---------------------------------------------------------------------------

/// One manager's fetched season history. `None` means the fetch failed;
/// the manager still appears in boards, annotated as having no data.
#[derive(Debug, Clone)]
pub struct ManagerHistories {
    pub display_name: String,
    pub history: Option<Vec<HistoryRecord>>,
}

/// Fetch every roster member's history, strictly sequentially in roster
/// order. A per-manager failure is logged and recorded as `None`; it never
/// aborts the collection.
pub async fn collect_histories(client: &ApiClient, roster: &[Manager]) -> Vec<ManagerHistories> {
    let mut rows = Vec::with_capacity(roster.len());
    for manager in roster {
        let history = match client.history(manager.entry_id).await {
            Ok(h) => Some(h.current),
            Err(e) => {
                warn!(entry_id = manager.entry_id, "history fetch failed: {e}");
                None
            }
        };
        rows.push(ManagerHistories {
            display_name: manager.display_name.to_string(),
            history,
        });
    }
    rows
}

// ---------------------------------------------------------------------------
// Range board
// ---------------------------------------------------------------------------

/// One ranked row of a range board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEntry {
    pub display_name: String,
    /// Points summed over gameweeks inside the window.
    pub points: i64,
    /// How many in-window gameweeks the manager has played.
    pub gameweeks: usize,
}

/// A range board is either ranked or still waiting for its window to open.
///
/// "Waiting" means no manager in the roster has played any gameweek inside
/// the window yet, which is distinct from everyone scoring zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeBoard {
    Waiting { start: u32, end: u32 },
    Ranked(Vec<RangeEntry>),
}

/// Rank the roster by points over the closed gameweek window
/// `[start, end]`. Sorted descending by points, ties broken by descending
/// gameweeks played; top [`BOARD_SIZE`] kept. Managers without data are
/// included at zero.
pub fn compute_range_board(start: u32, end: u32, rows: &[ManagerHistories]) -> RangeBoard {
    let mut entries = Vec::with_capacity(rows.len());
    let mut has_data = false;

    for row in rows {
        let records = row.history.as_deref().unwrap_or(&[]);
        let in_range: Vec<&HistoryRecord> = records
            .iter()
            .filter(|r| r.event >= start && r.event <= end)
            .collect();
        let points: i64 = in_range.iter().map(|r| r.points).sum();
        if !in_range.is_empty() {
            has_data = true;
        }
        entries.push(RangeEntry {
            display_name: row.display_name.clone(),
            points,
            gameweeks: in_range.len(),
        });
    }

    if !has_data {
        return RangeBoard::Waiting { start, end };
    }

    entries.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.gameweeks.cmp(&a.gameweeks))
    });
    entries.truncate(BOARD_SIZE);
    RangeBoard::Ranked(entries)
}

/// Fetch histories and build the range board for `[start, end]`.
pub async fn range_board(
    client: &ApiClient,
    roster: &[Manager],
    start: u32,
    end: u32,
) -> RangeBoard {
    let rows = collect_histories(client, roster).await;
    let board = compute_range_board(start, end, &rows);
    if let RangeBoard::Waiting { .. } = board {
        info!("range board GW{start}-GW{end}: no gameweeks played yet");
    }
    board
}

// ---------------------------------------------------------------------------
// Bench board
// ---------------------------------------------------------------------------

/// One ranked row of the bench-points board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchEntry {
    pub display_name: String,
    /// Season total of points left on the bench.
    pub points: i64,
    /// False when the manager's history could not be fetched.
    pub has_data: bool,
}

/// Rank the roster by season bench points, descending, top [`BOARD_SIZE`].
///
/// A manager whose history fetch failed is included at zero and flagged
/// `has_data: false`, ranked below managers with data at the same score.
pub fn compute_bench_board(rows: &[ManagerHistories]) -> Vec<BenchEntry> {
    let mut entries: Vec<BenchEntry> = rows
        .iter()
        .map(|row| {
            let points = row
                .history
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .map(|r| r.points_on_bench)
                .sum();
            BenchEntry {
                display_name: row.display_name.clone(),
                points,
                has_data: row.history.is_some(),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.has_data.cmp(&a.has_data))
    });
    entries.truncate(BOARD_SIZE);
    entries
}

/// Fetch histories and build the bench board.
pub async fn bench_board(client: &ApiClient, roster: &[Manager]) -> Vec<BenchEntry> {
    let rows = collect_histories(client, roster).await;
    compute_bench_board(&rows)
}

// ---------------------------------------------------------------------------
// Comeback board
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ComebackError {
    #[error("could not load GW{event} standings: {source}")]
    Checkpoint {
        event: u32,
        #[source]
        source: FetchError,
    },
}

/// One row of the comeback board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComebackEntry {
    pub display_name: String,
    /// Places gained between the checkpoints; positive means the manager
    /// moved toward rank 1.
    pub places: i64,
}

/// Rank improvement between the two checkpoint snapshots, descending.
/// Uncapped; managers absent from either snapshot are excluded.
pub fn compute_comeback_board(
    roster: &[Manager],
    early: &[Standing],
    late: &[Standing],
) -> Vec<ComebackEntry> {
    let early_ranks: HashMap<u64, u32> = early.iter().map(|s| (s.entry, s.rank)).collect();
    let late_ranks: HashMap<u64, u32> = late.iter().map(|s| (s.entry, s.rank)).collect();

    let mut entries: Vec<ComebackEntry> = roster
        .iter()
        .filter_map(|m| {
            let early_rank = early_ranks.get(&m.entry_id)?;
            let late_rank = late_ranks.get(&m.entry_id)?;
            Some(ComebackEntry {
                display_name: m.display_name.to_string(),
                places: i64::from(*early_rank) - i64::from(*late_rank),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.places.cmp(&a.places));
    entries
}

/// Fetch both checkpoint snapshots and build the comeback board.
///
/// Unlike the history boards this is all-or-nothing per checkpoint: if
/// either snapshot cannot be loaded the whole board fails, naming the
/// checkpoint that was missing.
pub async fn comeback_board(
    client: &ApiClient,
    league_id: u64,
    roster: &[Manager],
) -> Result<Vec<ComebackEntry>, ComebackError> {
    let early = client
        .standings(league_id, Some(CHECKPOINT_EARLY))
        .await
        .map_err(|source| ComebackError::Checkpoint {
            event: CHECKPOINT_EARLY,
            source,
        })?;
    let late = client
        .standings(league_id, Some(CHECKPOINT_FINAL))
        .await
        .map_err(|source| ComebackError::Checkpoint {
            event: CHECKPOINT_FINAL,
            source,
        })?;
    Ok(compute_comeback_board(roster, &early, &late))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(event: u32, points: i64, bench: i64) -> HistoryRecord {
        HistoryRecord {
            event,
            points,
            points_on_bench: bench,
            event_transfers: 1,
        }
    }

    fn manager_rows(rows: &[(&str, Option<Vec<HistoryRecord>>)]) -> Vec<ManagerHistories> {
        rows.iter()
            .map(|(name, history)| ManagerHistories {
                display_name: name.to_string(),
                history: history.clone(),
            })
            .collect()
    }

    fn standing(entry: u64, rank: u32) -> Standing {
        Standing {
            entry,
            player_name: format!("Player {entry}"),
            entry_name: format!("Team {entry}"),
            total: 0,
            rank,
        }
    }

    fn roster_member(username: &'static str, entry_id: u64) -> Manager {
        Manager {
            username,
            entry_id,
            display_name: username,
        }
    }

    // --- range board ---

    #[test]
    fn range_board_waits_when_window_has_no_records() {
        let rows = manager_rows(&[
            ("a", Some(vec![record(1, 60, 0), record(2, 55, 0)])),
            ("b", Some(vec![])),
            ("c", None),
        ]);

        // Window 29-38 hasn't started: GW1-2 rows fall outside it.
        let board = compute_range_board(29, 38, &rows);
        assert_eq!(board, RangeBoard::Waiting { start: 29, end: 38 });
    }

    #[test]
    fn range_board_all_zero_scores_is_not_waiting() {
        let rows = manager_rows(&[
            ("a", Some(vec![record(1, 0, 0)])),
            ("b", Some(vec![record(1, 0, 0)])),
        ]);

        // Records exist inside the window, so zeros are a real result.
        match compute_range_board(1, 10, &rows) {
            RangeBoard::Ranked(entries) => {
                assert_eq!(entries.len(), 2);
                assert!(entries.iter().all(|e| e.points == 0));
            }
            RangeBoard::Waiting { .. } => panic!("zero scores must rank, not wait"),
        }
    }

    #[test]
    fn range_board_sums_only_in_window_points() {
        let rows = manager_rows(&[(
            "a",
            Some(vec![
                record(9, 40, 0),
                record(10, 50, 0),
                record(11, 90, 0), // outside [1, 10]
            ]),
        )]);

        let RangeBoard::Ranked(entries) = compute_range_board(1, 10, &rows) else {
            panic!("expected ranked board");
        };
        assert_eq!(entries[0].points, 90);
        assert_eq!(entries[0].gameweeks, 2);
    }

    #[test]
    fn range_board_orders_by_points_then_gameweeks() {
        let rows = manager_rows(&[
            ("fewer_gws", Some(vec![record(1, 100, 0)])),
            ("more_gws", Some(vec![record(1, 60, 0), record(2, 40, 0)])),
            ("top", Some(vec![record(1, 120, 0)])),
        ]);

        let RangeBoard::Ranked(entries) = compute_range_board(1, 10, &rows) else {
            panic!("expected ranked board");
        };
        let names: Vec<&str> = entries.iter().map(|e| e.display_name.as_str()).collect();
        // 120 first; the 100-point tie breaks toward more gameweeks played.
        assert_eq!(names, vec!["top", "more_gws", "fewer_gws"]);
    }

    #[test]
    fn range_board_keeps_top_five() {
        let rows: Vec<ManagerHistories> = (0..8)
            .map(|i| ManagerHistories {
                display_name: format!("m{i}"),
                history: Some(vec![record(1, i, 0)]),
            })
            .collect();

        let RangeBoard::Ranked(entries) = compute_range_board(1, 10, &rows) else {
            panic!("expected ranked board");
        };
        assert_eq!(entries.len(), BOARD_SIZE);
        assert_eq!(entries[0].points, 7);
    }

    #[test]
    fn range_board_includes_failed_manager_at_zero() {
        let rows = manager_rows(&[
            ("ok", Some(vec![record(1, 70, 0)])),
            ("failed", None),
        ]);

        let RangeBoard::Ranked(entries) = compute_range_board(1, 10, &rows) else {
            panic!("expected ranked board");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].display_name, "failed");
        assert_eq!(entries[1].points, 0);
        assert_eq!(entries[1].gameweeks, 0);
    }

    // --- bench board ---

    #[test]
    fn bench_board_sums_all_bench_points() {
        let rows = manager_rows(&[
            ("a", Some(vec![record(1, 50, 4), record(2, 60, 11)])),
            ("b", Some(vec![record(1, 80, 2)])),
        ]);

        let board = compute_bench_board(&rows);
        assert_eq!(board[0].display_name, "a");
        assert_eq!(board[0].points, 15);
        assert_eq!(board[1].points, 2);
    }

    #[test]
    fn bench_board_includes_failed_manager_with_no_data_flag() {
        let rows = manager_rows(&[
            ("ok", Some(vec![record(1, 50, 6)])),
            ("failed", None),
        ]);

        let board = compute_bench_board(&rows);
        assert_eq!(board.len(), 2);
        assert_eq!(board[1].display_name, "failed");
        assert_eq!(board[1].points, 0);
        assert!(!board[1].has_data);
    }

    #[test]
    fn bench_board_ranks_no_data_below_equal_scores() {
        let rows = manager_rows(&[
            ("failed", None),
            ("zero_season", Some(vec![])),
        ]);

        let board = compute_bench_board(&rows);
        // Equal at zero, but real (empty) data outranks a failed fetch.
        assert_eq!(board[0].display_name, "zero_season");
        assert!(board[0].has_data);
        assert_eq!(board[1].display_name, "failed");
    }

    #[test]
    fn bench_board_keeps_top_five() {
        let rows: Vec<ManagerHistories> = (0..7)
            .map(|i| ManagerHistories {
                display_name: format!("m{i}"),
                history: Some(vec![record(1, 0, i)]),
            })
            .collect();

        let board = compute_bench_board(&rows);
        assert_eq!(board.len(), BOARD_SIZE);
        assert_eq!(board[0].points, 6);
        assert_eq!(board[4].points, 2);
    }

    // --- comeback board ---

    #[test]
    fn comeback_board_scores_rank_improvement() {
        let roster = [roster_member("climber", 1), roster_member("slider", 2)];
        let early = [standing(1, 8), standing(2, 2)];
        let late = [standing(1, 3), standing(2, 6)];

        let board = compute_comeback_board(&roster, &early, &late);
        assert_eq!(board.len(), 2);
        // 8 -> 3 is +5 places; 2 -> 6 is -4.
        assert_eq!(board[0].display_name, "climber");
        assert_eq!(board[0].places, 5);
        assert_eq!(board[1].places, -4);
    }

    #[test]
    fn comeback_board_excludes_managers_missing_from_a_snapshot() {
        let roster = [
            roster_member("both", 1),
            roster_member("only_early", 2),
            roster_member("only_late", 3),
            roster_member("neither", 4),
        ];
        let early = [standing(1, 5), standing(2, 1)];
        let late = [standing(1, 4), standing(3, 1)];

        let board = compute_comeback_board(&roster, &early, &late);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].display_name, "both");
        assert_eq!(board[0].places, 1);
    }

    #[test]
    fn comeback_board_is_uncapped() {
        let roster: Vec<Manager> = (1..=8).map(|i| roster_member("m", i)).collect();
        let early: Vec<Standing> = (1..=8).map(|i| standing(i, i as u32)).collect();
        let late: Vec<Standing> = (1..=8).map(|i| standing(i, 9 - i as u32)).collect();

        let board = compute_comeback_board(&roster, &early, &late);
        assert_eq!(board.len(), 8);
        // Last place to first place: 8 - 1 = +7.
        assert_eq!(board[0].places, 7);
        assert_eq!(board[7].places, -7);
    }

    #[test]
    fn checkpoint_error_names_the_missing_gameweek() {
        let err = ComebackError::Checkpoint {
            event: CHECKPOINT_EARLY,
            source: FetchError::Http {
                status: 503,
                status_text: "Service Unavailable".into(),
                url: "/leagues-classic/1/standings/?event=19".into(),
                snippet: String::new(),
            },
        };
        assert!(err.to_string().contains("GW19"));
    }
}
